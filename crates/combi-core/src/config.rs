//! Driver configuration for a combination run.

use serde::{Deserialize, Serialize};

/// Controls how [`run_combinations`](crate::runner::run_combinations) drains
/// the engine and executes cases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Stop after this many accepted combinations. None = drain fully.
    pub max_combinations: Option<usize>,
    /// Stop at the first failing case. Sequential runs only.
    pub stop_on_failure: bool,
    /// Drain the engine first, then execute cases on the rayon pool.
    pub parallel: bool,
}

impl RunConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        assert_eq!(RunConfig::from_json("{}").unwrap(), RunConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = RunConfig::from_json(r#"{ "max_combinations": 10, "parallel": true }"#).unwrap();
        assert_eq!(config.max_combinations, Some(10));
        assert!(config.parallel);
        assert!(!config.stop_on_failure);
    }
}
