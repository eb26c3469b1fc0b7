use std::collections::HashSet;

use combi_engine::{CombinatorialEngine, Dimension, DimensionError, EngineError, FilterEvent};
use combi_ir::parse::{parse_matrix, ParseError};
use combi_ir::types::MatrixDef;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("matrix parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid dimension: {0}")]
    Dimension(#[from] DimensionError),

    #[error("invalid engine: {0}")]
    Engine(#[from] EngineError),

    #[error("exclusion #{rule} names unknown dimension '{name}'")]
    UnknownExclusionDimension { rule: usize, name: String },
}

/// Parse a JSON matrix definition and build its engine.
pub fn load_engine(json: &str) -> Result<CombinatorialEngine, BuildError> {
    let def = parse_matrix(json)?;
    build_engine(&def)
}

/// Build an engine from a matrix definition: dimensions, mode, and the
/// exclusions installed as the filter.
pub fn build_engine(def: &MatrixDef) -> Result<CombinatorialEngine, BuildError> {
    let dimensions = def
        .dimensions
        .iter()
        .map(Dimension::from_def)
        .collect::<Result<Vec<_>, _>>()?;

    let mut names = HashSet::new();
    for dimension in &dimensions {
        if !names.insert(dimension.name()) {
            warn!(name = dimension.name(), "duplicate dimension name; later values win");
        }
    }

    for (rule, exclusion) in def.exclusions.iter().enumerate() {
        if let Some(name) = exclusion.when.keys().find(|k| !names.contains(k.as_str())) {
            return Err(BuildError::UnknownExclusionDimension {
                rule,
                name: name.clone(),
            });
        }
    }

    let mut engine = CombinatorialEngine::from_dimensions(dimensions)?.with_mode(def.mode)?;

    if !def.exclusions.is_empty() {
        let exclusions = def.exclusions.clone();
        engine.set_filter(move |event: &FilterEvent<'_>| {
            !exclusions
                .iter()
                .any(|rule| rule.matches(|name| event.value(name)))
        });
    }

    debug!(
        dimensions = engine.dimensions().len(),
        mode = %engine.mode(),
        exclusions = def.exclusions.len(),
        "engine built"
    );
    Ok(engine)
}
