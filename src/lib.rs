//! # schemaform
//!
//! Turns the input/output schemas of a served compute endpoint into a
//! descriptor of form fields, and binds user-supplied rendering functions
//! to the schema locations they consume.
//!
//! The pipeline runs bottom-up:
//!
//! * [`schema::normalize`] builds a typed [`SchemaTree`] per direction.
//! * [`schema::resolve`] fills defaults and hints on every node.
//! * [`udf::bind`] matches user functions against both trees.
//! * [`descriptor::compose`] / [`descriptor::generate`] package the result
//!   as an immutable [`ComposedDescriptor`].

pub mod config;
pub mod descriptor;
pub mod error;
pub mod input_parsing;
pub mod logging;
pub mod schema;
pub mod udf;

pub use config::{ConfigError, GeneratorConfig, LoggingConfig};
pub use descriptor::{compose, flatten, generate, ComposedDescriptor, EndpointMetadata, FlatField};
pub use error::{FormError, FormResult};
pub use schema::{
    normalize, resolve, Direction, FieldKind, Normalizer, NormalizeOptions, SchemaError,
    SchemaNode, SchemaPath, SchemaTree,
};
pub use udf::{bind, bind_with_report, UdfBinding, UdfManifest, UserFunction};
