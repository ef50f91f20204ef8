use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendering technology a user function's output needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderBackend {
    /// Supported natively by the generated application
    #[default]
    Builtin,
    /// Needs the 3D plotting backend
    Pyvista,
}

impl fmt::Display for RenderBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderBackend::Builtin => write!(f, "builtin"),
            RenderBackend::Pyvista => write!(f, "pyvista"),
        }
    }
}

/// A formal parameter of a user function.
///
/// `path` plays the role of a type annotation: when present it names the
/// schema location feeding this parameter (`input_schema.a.v`,
/// `output_schema`, or a bare sub-path). Without it, the parameter name
/// itself is the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UdfParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl UdfParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    pub fn with_path(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
        }
    }

    /// Schema target this parameter asks for.
    pub fn target(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }
}

/// A callable custom visualization offered by the extension module.
///
/// Implementations describe themselves once at load time; the binder treats
/// what they report as static data.
pub trait UserFunction: fmt::Debug + Send + Sync {
    /// Function name as declared by the extension module.
    fn name(&self) -> &str;

    /// Documentation string, if the function has one.
    fn doc(&self) -> Option<&str>;

    /// Formal parameters in declaration order.
    fn parameters(&self) -> &[UdfParameter];

    fn backend(&self) -> RenderBackend {
        RenderBackend::Builtin
    }
}

/// Splits a documentation string into its first line and the rest.
pub fn split_doc(doc: &str) -> (String, String) {
    let doc = doc.trim();
    match doc.split_once('\n') {
        Some((title, docs)) => (title.trim_end().to_string(), docs.trim().to_string()),
        None => (doc.to_string(), String::new()),
    }
}
