use std::fmt;

/// Errors raised while normalizing or resolving a schema document.
///
/// Every variant carries a message that names the offending schema path.
/// These are fatal: the input is static data, so nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No `type` keyword and no sibling keyword implies one
    MissingType(String),
    /// A `type` keyword names something outside the grammar
    UnknownType(String),
    /// A `required` entry references a property that does not exist
    UnknownRequired(String),
    /// An array node without an `items` schema
    MissingItems(String),
    /// An `enum` keyword with no values
    EmptyEnum(String),
    /// A `$ref` that does not point anywhere in the source document
    UnresolvedRef(String),
    /// A `$ref` that re-enters one of its own ancestors
    CyclicRef(String),
    /// Nesting deeper than the configured limit
    DepthExceeded(String),
    /// The document is structurally wrong (not a mapping, bad keyword shape)
    InvalidDocument(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SchemaError::MissingType(msg) => write!(f, "Missing type: {}", msg),
            SchemaError::UnknownType(msg) => write!(f, "Unknown type: {}", msg),
            SchemaError::UnknownRequired(msg) => write!(f, "Unknown required property: {}", msg),
            SchemaError::MissingItems(msg) => write!(f, "Items missing: {}", msg),
            SchemaError::EmptyEnum(msg) => write!(f, "Empty enum: {}", msg),
            SchemaError::UnresolvedRef(msg) => write!(f, "Unresolved reference: {}", msg),
            SchemaError::CyclicRef(msg) => write!(f, "Cyclic reference: {}", msg),
            SchemaError::DepthExceeded(msg) => write!(f, "Nesting too deep: {}", msg),
            SchemaError::InvalidDocument(msg) => write!(f, "Invalid document: {}", msg),
        }
    }
}

impl std::error::Error for SchemaError {}
