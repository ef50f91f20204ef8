use serde::Serialize;

use super::binder::UdfBinding;
use crate::schema::types::Direction;

/// Accepted bindings grouped by the data they read, so the rendering layer
/// can hand each function the right arguments after the endpoint returns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UdfRegister {
    pub inputs: Vec<UdfBinding>,
    pub outputs: Vec<UdfBinding>,
    pub both: Vec<UdfBinding>,
}

impl UdfRegister {
    pub fn from_bindings(bindings: &[UdfBinding]) -> Self {
        let mut register = Self::default();
        for binding in bindings {
            let slot = match (binding.reads(Direction::Input), binding.reads(Direction::Output)) {
                (true, true) => &mut register.both,
                (false, true) => &mut register.outputs,
                _ => &mut register.inputs,
            };
            slot.push(binding.clone());
        }
        register
    }

    pub fn len(&self) -> usize {
        self.inputs.len() + self.outputs.len() + self.both.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
