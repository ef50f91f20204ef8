//! Composed Descriptor: both resolved trees plus the accepted bindings,
//! handed as one read-only value to whatever renders the form.

pub mod flatten;
pub mod openapi;

pub use flatten::{flatten, FlatField};
pub use openapi::{extract_schemas, EndpointMetadata};

use log::info;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::config::GeneratorConfig;
use crate::error::FormResult;
use crate::schema::normalize::Normalizer;
use crate::schema::resolver::resolve;
use crate::schema::types::{Direction, SchemaError, SchemaTree};
use crate::udf::{bind_with_report, RenderBackend, UdfBinding, UdfRegister, UdfRejection, UserFunction};

/// Immutable result of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<EndpointMetadata>,
    input: SchemaTree,
    output: SchemaTree,
    bindings: Vec<UdfBinding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<UdfRejection>,
    needs_pyvista: bool,
}

impl ComposedDescriptor {
    pub fn metadata(&self) -> Option<&EndpointMetadata> {
        self.metadata.as_ref()
    }

    pub fn input(&self) -> &SchemaTree {
        &self.input
    }

    pub fn output(&self) -> &SchemaTree {
        &self.output
    }

    pub fn tree(&self, direction: Direction) -> &SchemaTree {
        match direction {
            Direction::Input => &self.input,
            Direction::Output => &self.output,
        }
    }

    /// Accepted bindings in declaration order.
    pub fn bindings(&self) -> &[UdfBinding] {
        &self.bindings
    }

    /// Functions left out of [`bindings`](Self::bindings), with reasons.
    pub fn rejected(&self) -> &[UdfRejection] {
        &self.rejected
    }

    pub fn register(&self) -> UdfRegister {
        UdfRegister::from_bindings(&self.bindings)
    }

    /// Whether any accepted function renders through the pyvista backend.
    pub fn needs_pyvista(&self) -> bool {
        self.needs_pyvista
    }

    /// Input form fields in the flat template layout.
    pub fn input_fields(&self) -> Vec<FlatField> {
        flatten(&self.input)
    }
}

/// Resolves both normalized trees and binds `functions` against them.
pub fn compose(
    input: SchemaTree,
    output: SchemaTree,
    functions: &[Arc<dyn UserFunction>],
) -> Result<ComposedDescriptor, SchemaError> {
    for (tree, expected) in [(&input, Direction::Input), (&output, Direction::Output)] {
        if tree.direction != expected {
            return Err(SchemaError::InvalidDocument(format!(
                "expected an {} tree, got {}",
                expected, tree.direction
            )));
        }
    }

    let input = resolve(input)?;
    let output = resolve(output)?;
    let report = bind_with_report(functions, &input, &output);
    let needs_pyvista = report
        .accepted
        .iter()
        .any(|binding| binding.backend() == RenderBackend::Pyvista);

    Ok(ComposedDescriptor {
        metadata: None,
        input,
        output,
        bindings: report.accepted,
        rejected: report.rejected,
        needs_pyvista,
    })
}

/// Full run over an OpenAPI document: metadata, both schemas with `$ref`
/// support, resolution and binding.
pub fn generate(
    document: &Value,
    functions: &[Arc<dyn UserFunction>],
    config: &GeneratorConfig,
) -> FormResult<ComposedDescriptor> {
    config.validate()?;
    let metadata = EndpointMetadata::from_document(document)?;
    let (raw_input, raw_output) = extract_schemas(
        document,
        &config.input_schema_name,
        &config.output_schema_name,
    )?;

    let normalizer = Normalizer::new(config.normalize_options()).with_document(document);
    let input = normalizer.normalize(raw_input, Direction::Input)?;
    let output = normalizer.normalize(raw_output, Direction::Output)?;

    let mut descriptor = compose(input, output, functions)?;
    info!(
        "🚀 Generated descriptor for '{}' v{} with {} bindings",
        metadata.title,
        metadata.version,
        descriptor.bindings.len()
    );
    descriptor.metadata = Some(metadata);
    Ok(descriptor)
}
