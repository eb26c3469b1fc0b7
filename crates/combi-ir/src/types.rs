use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Top-level matrix definition: the dimension set for one data-driven test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixDef {
    /// Dimensions in increment-precedence order (first = fastest-varying).
    pub dimensions: Vec<DimensionDef>,
    #[serde(default)]
    pub mode: Mode,
    /// Declarative filter rules; a candidate matching any rule is rejected.
    #[serde(default)]
    pub exclusions: Vec<Exclusion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionDef {
    pub name: String,
    pub values: Vec<Value>,
}

/// Rejects every candidate whose values equal all entries of `when`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub when: BTreeMap<String, Value>,
}

impl Exclusion {
    /// True when every `when` entry matches the value `lookup` yields for it.
    /// A rule with no entries matches nothing.
    pub fn matches<'a, F>(&self, lookup: F) -> bool
    where
        F: Fn(&str) -> Option<&'a Value>,
    {
        !self.when.is_empty()
            && self
                .when
                .iter()
                .all(|(name, expected)| lookup(name.as_str()) == Some(expected))
    }
}

/// Enumeration strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Exhaustive cross-product.
    #[default]
    FullCombinatorial,
    /// Every pair of values across two dimensions. Not implemented.
    PairWise,
    /// Every individual value appears in at least one combination.
    EveryElement,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::FullCombinatorial => "full_combinatorial",
            Mode::PairWise => "pair_wise",
            Mode::EveryElement => "every_element",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
