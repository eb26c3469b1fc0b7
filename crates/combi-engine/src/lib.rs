//! Combinatorial enumeration of named value dimensions.
//!
//! A [`CombinatorialEngine`] walks a fixed set of [`Dimension`]s and yields
//! one [`Combination`] (a value per dimension) per `next` call, according to
//! the selected [`Mode`]. An optional filter can reject candidates before
//! they are yielded.

pub mod coverage;
pub mod describe;
pub mod dimension;
pub mod engine;
pub mod filter;
pub mod select;

use std::collections::BTreeMap;

pub use combi_ir::types::Mode;
pub use combi_ir::value::Value;
pub use dimension::{Dimension, DimensionError};
pub use engine::{CombinatorialEngine, EngineError};
pub use filter::{FilterEvent, FilterFn};

/// Dimension name -> selected value.
///
/// Uses BTreeMap for deterministic iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Combination {
    pub values: BTreeMap<String, Value>,
}

impl Combination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
