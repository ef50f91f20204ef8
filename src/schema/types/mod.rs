pub mod errors;
pub mod node;
pub mod path;

pub use errors::SchemaError;
pub use node::{
    ArrayConstraints, EncodedArray, FieldHints, FieldKind, Nodes, NumberConstraints, SchemaNode, SchemaTree,
    UnionMembers, UnionMode,
};
pub use path::{Direction, InvalidPath, PathSegment, SchemaPath};
