use combi_engine::coverage::{all_pairs_targets, every_element_targets, CoverageTracker};
use combi_engine::{Combination, CombinatorialEngine};
use combi_ir::types::MatrixDef;
use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::config::RunConfig;
use crate::matrix::{build_engine, BuildError};

/// A combination whose test case returned an error.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseFailure {
    /// Position among executed combinations, starting at 0.
    pub ordinal: usize,
    /// Multi-line description of the combination.
    pub description: String,
    /// The combination as a breakpoint condition.
    pub condition: String,
    pub message: String,
}

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Combinations whose case was executed.
    pub executed: usize,
    pub failures: Vec<CaseFailure>,
    /// Fraction of dimension values exercised.
    pub element_coverage: f64,
    /// Fraction of cross-dimension value pairs exercised.
    pub pair_coverage: f64,
    /// True when the run stopped before the engine was exhausted.
    pub stopped_early: bool,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn recorded failures into an error.
    pub fn into_result(self) -> Result<RunReport, RunError> {
        match self.failures.first() {
            None => Ok(self),
            Some(first) => Err(RunError::CasesFailed {
                failed: self.failures.len(),
                executed: self.executed,
                first: first.condition.clone(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("{failed} of {executed} combinations failed (first: {first})")]
    CasesFailed {
        failed: usize,
        executed: usize,
        first: String,
    },
}

/// An accepted combination captured for later execution.
struct PendingCase {
    combination: Combination,
    description: String,
    condition: String,
}

/// Build the engine for `def` and run `case` over it.
pub fn run_matrix<F>(def: &MatrixDef, config: &RunConfig, case: F) -> Result<RunReport, RunError>
where
    F: Fn(&Combination) -> anyhow::Result<()> + Sync,
{
    let mut engine = build_engine(def)?;
    Ok(run_combinations(&mut engine, config, case))
}

/// Run `case` once per accepted combination, starting from a reset engine.
///
/// Failing cases are recorded with the engine's description of the
/// combination; the run continues unless `stop_on_failure` is set.
pub fn run_combinations<F>(
    engine: &mut CombinatorialEngine,
    config: &RunConfig,
    case: F,
) -> RunReport
where
    F: Fn(&Combination) -> anyhow::Result<()> + Sync,
{
    engine.reset();
    let mut tracker = CoverageTracker::new();

    let (executed, failures, stopped_early) = if config.parallel {
        run_parallel(engine, config, &mut tracker, &case)
    } else {
        run_sequential(engine, config, &mut tracker, &case)
    };

    let element_coverage = tracker.ratio(&every_element_targets(engine.dimensions()));
    let pair_coverage = tracker.ratio(&all_pairs_targets(engine.dimensions()));

    info!(
        mode = %engine.mode(),
        executed,
        failed = failures.len(),
        element_coverage,
        pair_coverage,
        stopped_early,
        "combination run finished"
    );

    RunReport {
        executed,
        failures,
        element_coverage,
        pair_coverage,
        stopped_early,
    }
}

fn limit_reached(config: &RunConfig, executed: usize) -> bool {
    config.max_combinations.is_some_and(|max| executed >= max)
}

fn run_sequential<F>(
    engine: &mut CombinatorialEngine,
    config: &RunConfig,
    tracker: &mut CoverageTracker,
    case: &F,
) -> (usize, Vec<CaseFailure>, bool)
where
    F: Fn(&Combination) -> anyhow::Result<()>,
{
    let mut executed = 0;
    let mut failures = Vec::new();
    let mut combination = Combination::new();

    while engine.next(&mut combination) {
        if limit_reached(config, executed) {
            return (executed, failures, true);
        }
        if let Some(indices) = engine.current_indices() {
            tracker.record(indices);
        }
        let ordinal = executed;
        executed += 1;

        if let Err(err) = case(&combination) {
            let failure = CaseFailure {
                ordinal,
                description: engine.describe_state(),
                condition: engine.describe_state_condition(),
                message: format!("{err:#}"),
            };
            log_failure(&failure);
            failures.push(failure);
            if config.stop_on_failure {
                return (executed, failures, true);
            }
        }
    }

    (executed, failures, false)
}

fn run_parallel<F>(
    engine: &mut CombinatorialEngine,
    config: &RunConfig,
    tracker: &mut CoverageTracker,
    case: &F,
) -> (usize, Vec<CaseFailure>, bool)
where
    F: Fn(&Combination) -> anyhow::Result<()> + Sync,
{
    if config.stop_on_failure {
        warn!("stop_on_failure is ignored for parallel runs");
    }

    let mut pending = Vec::new();
    let mut stopped_early = false;
    let mut combination = Combination::new();

    while engine.next(&mut combination) {
        if limit_reached(config, pending.len()) {
            stopped_early = true;
            break;
        }
        if let Some(indices) = engine.current_indices() {
            tracker.record(indices);
        }
        pending.push(PendingCase {
            combination: combination.clone(),
            description: engine.describe_state(),
            condition: engine.describe_state_condition(),
        });
    }

    let failures: Vec<CaseFailure> = pending
        .par_iter()
        .enumerate()
        .filter_map(|(ordinal, p)| {
            case(&p.combination).err().map(|err| CaseFailure {
                ordinal,
                description: p.description.clone(),
                condition: p.condition.clone(),
                message: format!("{err:#}"),
            })
        })
        .collect();

    for failure in &failures {
        log_failure(failure);
    }

    (pending.len(), failures, stopped_early)
}

fn log_failure(failure: &CaseFailure) {
    error!(
        ordinal = failure.ordinal,
        condition = %failure.condition,
        error = %failure.message,
        "combination failed:\n{}",
        failure.description
    );
}
