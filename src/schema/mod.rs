pub mod types;
pub mod normalize;
pub mod resolver;
pub(crate) mod refs;
mod defaults;

pub use normalize::{key_to_title, normalize, NormalizeOptions, Normalizer, DEFAULT_MAX_DEPTH};
pub use resolver::resolve;

// Re-export the data model at the schema module level
pub use types::{
    Direction,
    FieldHints,
    FieldKind,
    PathSegment,
    SchemaError,
    SchemaNode,
    SchemaPath,
    SchemaTree,
};
