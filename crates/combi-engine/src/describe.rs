//! Debug renderings of the engine's current combination.

use combi_ir::value::{value_to_literal, value_to_string};

use crate::dimension::Dimension;
use crate::engine::CombinatorialEngine;

/// Returned when there is no current combination.
pub const NO_STATE: &str = "[none]";

impl CombinatorialEngine {
    /// Multi-line `name = value` listing of the current combination, in
    /// dimension order.
    pub fn describe_state(&self) -> String {
        match self.current_indices() {
            Some(indices) => describe(self.dimensions(), indices),
            None => NO_STATE.to_string(),
        }
    }

    /// The current combination as a boolean expression, e.g.
    /// `Color == "Red" && Size == "Small"`, usable as a conditional
    /// breakpoint.
    pub fn describe_state_condition(&self) -> String {
        match self.current_indices() {
            Some(indices) => describe_condition(self.dimensions(), indices),
            None => NO_STATE.to_string(),
        }
    }
}

pub fn describe(dimensions: &[Dimension], indices: &[usize]) -> String {
    dimensions
        .iter()
        .zip(indices)
        .map(|(d, &i)| format!("{} = {}", d.name(), value_to_string(&d.values()[i])))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn describe_condition(dimensions: &[Dimension], indices: &[usize]) -> String {
    dimensions
        .iter()
        .zip(indices)
        .map(|(d, &i)| format!("{} == {}", d.name(), value_to_literal(&d.values()[i])))
        .collect::<Vec<_>>()
        .join(" && ")
}
