//! User-defined rendering functions and their binding to schema paths.

pub mod binder;
pub mod function;
pub mod manifest;
pub mod register;

pub use binder::{bind, bind_with_report, BindReport, ParameterBinding, UdfBinding, UdfRejection};
pub use function::{split_doc, RenderBackend, UdfParameter, UserFunction};
pub use manifest::{ManifestFunction, UdfManifest};
pub use register::UdfRegister;
