//! Declarative manifest of user functions.
//!
//! The extension module ships a TOML (or JSON) file listing its functions
//! and the schema location each parameter reads:
//!
//! ```toml
//! [[functions]]
//! name = "plot_vectors"
//! doc = "Vector addition\nDraws both inputs and their sum."
//! backend = "builtin"
//!
//! [[functions.parameters]]
//! name = "input_schema"
//!
//! [[functions.parameters]]
//! name = "result"
//! path = "output_schema.result"
//! ```

use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::function::{RenderBackend, UdfParameter, UserFunction};
use crate::config::ConfigError;

/// One function entry of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFunction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub parameters: Vec<UdfParameter>,
    #[serde(default)]
    pub backend: RenderBackend,
}

impl UserFunction for ManifestFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn parameters(&self) -> &[UdfParameter] {
        &self.parameters
    }

    fn backend(&self) -> RenderBackend {
        self.backend
    }
}

/// Ordered function list loaded from the extension module's manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UdfManifest {
    #[serde(default)]
    pub functions: Vec<ManifestFunction>,
}

impl UdfManifest {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Loads a manifest, choosing the format from the file extension
    /// (`.json`, anything else is read as TOML).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let manifest = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents)?,
            _ => Self::from_toml_str(&contents)?,
        };
        info!(
            "📁 Loaded {} user functions from {}",
            manifest.functions.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Functions as trait objects, in declaration order.
    pub fn into_functions(self) -> Vec<Arc<dyn UserFunction>> {
        self.functions
            .into_iter()
            .map(|function| Arc::new(function) as Arc<dyn UserFunction>)
            .collect()
    }
}
