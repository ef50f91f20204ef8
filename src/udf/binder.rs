//! UDF Binder: matches user function parameters against schema paths.
//!
//! A function is accepted only when every one of its parameters resolves to
//! exactly one `(direction, path)`. Anything else excludes the function as a
//! whole; binding never fails outright.

use log::{info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use super::function::{split_doc, RenderBackend, UserFunction};
use crate::schema::types::{Direction, SchemaPath, SchemaTree};

/// Which schema location feeds one formal parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterBinding {
    pub parameter: String,
    pub direction: Direction,
    pub path: SchemaPath,
}

/// An accepted user function and its parameter table.
#[derive(Debug, Clone, Serialize)]
pub struct UdfBinding {
    #[serde(skip)]
    function: Arc<dyn UserFunction>,
    name: String,
    doc: String,
    title: String,
    docs: String,
    backend: RenderBackend,
    parameter_bindings: Vec<ParameterBinding>,
}

impl UdfBinding {
    /// Handle to the bound callable.
    pub fn function(&self) -> &Arc<dyn UserFunction> {
        &self.function
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full documentation string, empty when the function has none.
    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// First line of the documentation.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Documentation after the first line.
    pub fn docs(&self) -> &str {
        &self.docs
    }

    pub fn backend(&self) -> RenderBackend {
        self.backend
    }

    /// One entry per formal parameter, in declaration order.
    pub fn parameter_bindings(&self) -> &[ParameterBinding] {
        &self.parameter_bindings
    }

    pub fn reads(&self, direction: Direction) -> bool {
        self.parameter_bindings
            .iter()
            .any(|binding| binding.direction == direction)
    }
}

/// A function that was left out, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UdfRejection {
    pub name: String,
    pub reason: String,
}

/// Outcome of a binding pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BindReport {
    pub accepted: Vec<UdfBinding>,
    pub rejected: Vec<UdfRejection>,
}

/// Binds `functions` in order and returns the accepted ones.
pub fn bind(
    functions: &[Arc<dyn UserFunction>],
    input: &SchemaTree,
    output: &SchemaTree,
) -> Vec<UdfBinding> {
    bind_with_report(functions, input, output).accepted
}

/// Like [`bind`], but also reports every rejected function.
pub fn bind_with_report(
    functions: &[Arc<dyn UserFunction>],
    input: &SchemaTree,
    output: &SchemaTree,
) -> BindReport {
    let mut report = BindReport::default();
    let mut accepted_names: HashSet<String> = HashSet::new();

    for function in functions {
        let name = function.name().to_string();
        let outcome = if accepted_names.contains(&name) {
            Err(format!("a function named '{}' was already bound", name))
        } else {
            bind_one(function, input, output)
        };

        match outcome {
            Ok(binding) => {
                accepted_names.insert(name);
                report.accepted.push(binding);
            }
            Err(reason) => {
                warn!("⚠️ Skipping user function '{}': {}", name, reason);
                report.rejected.push(UdfRejection { name, reason });
            }
        }
    }

    info!(
        "✅ Bound {} user functions ({} rejected)",
        report.accepted.len(),
        report.rejected.len()
    );
    report
}

fn bind_one(
    function: &Arc<dyn UserFunction>,
    input: &SchemaTree,
    output: &SchemaTree,
) -> Result<UdfBinding, String> {
    let name = function.name();
    if name.starts_with('_') {
        return Err("private helper".to_string());
    }
    let parameters = function.parameters();
    if parameters.is_empty() {
        return Err("declares no parameters".to_string());
    }

    let mut seen = HashSet::new();
    let mut parameter_bindings = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        if !seen.insert(parameter.name.as_str()) {
            return Err(format!("parameter '{}' is declared twice", parameter.name));
        }
        let (direction, path) = locate(parameter.target(), [input, output])
            .map_err(|reason| format!("parameter '{}': {}", parameter.name, reason))?;
        parameter_bindings.push(ParameterBinding {
            parameter: parameter.name.clone(),
            direction,
            path,
        });
    }

    let doc = match function.doc() {
        Some(doc) => doc.to_string(),
        None => {
            warn!(
                "⚠️ Function '{}' has no documentation; title and docs will be empty",
                name
            );
            String::new()
        }
    };
    let (title, docs) = split_doc(&doc);

    Ok(UdfBinding {
        function: Arc::clone(function),
        name: name.to_string(),
        doc,
        title,
        docs,
        backend: function.backend(),
        parameter_bindings,
    })
}

/// Resolves one parameter target to the single schema node it names.
fn locate(target: &str, trees: [&SchemaTree; 2]) -> Result<(Direction, SchemaPath), String> {
    for tree in trees {
        let root = tree.direction.root_parameter();
        let Some(rest) = target.strip_prefix(root) else {
            continue;
        };
        if rest.is_empty() {
            return Ok((tree.direction, SchemaPath::root()));
        }
        let relative = match rest.strip_prefix('.') {
            Some(relative) => relative,
            None if rest.starts_with('[') || rest.starts_with('<') => rest,
            // Longer identifier that merely starts with the root name
            None => continue,
        };
        return find(tree, relative).map(|path| (tree.direction, path));
    }

    let path: SchemaPath = target.parse().map_err(|err| format!("{}", err))?;
    if path.is_root() {
        return Err("empty schema path".to_string());
    }
    let mut hits: Vec<(Direction, SchemaPath)> = trees
        .iter()
        .filter_map(|tree| tree.find(&path).map(|node| (tree.direction, node.path.clone())))
        .collect();
    match hits.len() {
        0 => Err(format!("'{}' matches nothing in either schema", target)),
        1 => Ok(hits.remove(0)),
        _ => Err(format!("'{}' is ambiguous between input and output", target)),
    }
}

fn find(tree: &SchemaTree, relative: &str) -> Result<SchemaPath, String> {
    let path: SchemaPath = relative.parse().map_err(|err| format!("{}", err))?;
    tree.find(&path)
        .map(|node| node.path.clone())
        .ok_or_else(|| format!("'{}' does not exist in the {} schema", relative, tree.direction))
}
