//! The enumeration state machine.
//!
//! State is an index per dimension plus a mode, a before-start flag and,
//! for every-element traversal, a sweep cursor. Each `next` call either
//! validates the initial state (first call) or advances it, then asks the
//! filter about the candidate, repeating until a candidate is accepted or
//! the traversal is exhausted.

use std::fmt;

use combi_ir::types::Mode;
use tracing::{debug, trace};

use crate::dimension::{Dimension, DimensionError};
use crate::filter::{FilterEvent, FilterFn};
use crate::Combination;

/// Errors from engine construction and mode selection.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("an engine needs at least one dimension")]
    NoDimensions,

    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error("cannot change mode from {current} to {requested} after enumeration has started")]
    ModeLocked { current: Mode, requested: Mode },

    #[error("mode {0} is not implemented")]
    NotImplemented(Mode),
}

pub struct CombinatorialEngine {
    dimensions: Vec<Dimension>,
    /// Current value index per dimension, parallel to `dimensions`.
    indices: Vec<usize>,
    mode: Mode,
    before_start: bool,
    exhausted: bool,
    /// True while `indices` describe an accepted combination.
    has_current: bool,
    /// Every-element: the dimension being swept.
    sweep_dimension: usize,
    /// Every-element: last index visited in the swept dimension.
    /// `None` until the sweep of that dimension begins.
    sweep_index: Option<usize>,
    filter: Option<Box<FilterFn>>,
    candidates_evaluated: u64,
}

impl CombinatorialEngine {
    /// Create an engine over `dimensions`, in full-combinatorial mode.
    ///
    /// Dimension order defines increment precedence: dimension 0 varies
    /// fastest.
    pub fn from_dimensions(dimensions: Vec<Dimension>) -> Result<Self, EngineError> {
        if dimensions.is_empty() {
            return Err(EngineError::NoDimensions);
        }
        let indices = vec![0; dimensions.len()];
        Ok(Self {
            dimensions,
            indices,
            mode: Mode::FullCombinatorial,
            before_start: true,
            exhausted: false,
            has_current: false,
            sweep_dimension: 0,
            sweep_index: None,
            filter: None,
            candidates_evaluated: 0,
        })
    }

    /// Builder form of [`set_mode`](Self::set_mode).
    pub fn with_mode(mut self, mode: Mode) -> Result<Self, EngineError> {
        self.set_mode(mode)?;
        Ok(self)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Select the enumeration mode.
    ///
    /// Only allowed before the first `next` (or after `reset`). Re-selecting
    /// the current mode is always a no-op.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), EngineError> {
        if mode == Mode::PairWise {
            return Err(EngineError::NotImplemented(mode));
        }
        if mode == self.mode {
            return Ok(());
        }
        if !self.before_start {
            return Err(EngineError::ModeLocked {
                current: self.mode,
                requested: mode,
            });
        }
        debug!(from = %self.mode, to = %mode, "mode changed");
        self.mode = mode;
        Ok(())
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Install the filter, returning the previous one.
    pub fn set_filter<F>(&mut self, filter: F) -> Option<Box<FilterFn>>
    where
        F: FnMut(&FilterEvent<'_>) -> bool + 'static,
    {
        self.filter.replace(Box::new(filter))
    }

    pub fn clear_filter(&mut self) -> Option<Box<FilterFn>> {
        self.filter.take()
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    pub fn is_started(&self) -> bool {
        !self.before_start
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of candidates judged since construction or the last reset,
    /// accepted or not.
    pub fn candidates_evaluated(&self) -> u64 {
        self.candidates_evaluated
    }

    /// Advance to the next accepted combination and write it into
    /// `combination` (one entry per dimension; other entries are untouched).
    ///
    /// Returns `false` once no further combination exists; subsequent calls
    /// keep returning `false` until [`reset`](Self::reset).
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self, combination: &mut Combination) -> bool {
        if self.dimensions.is_empty() || self.exhausted {
            return false;
        }

        let mut candidate = if self.before_start {
            self.before_start = false;
            self.start();
            true
        } else {
            self.advance()
        };

        while candidate {
            if self.accept_current() {
                self.has_current = true;
                self.write_current(combination);
                return true;
            }
            candidate = self.advance();
        }

        self.exhausted = true;
        self.has_current = false;
        debug!(
            mode = %self.mode,
            candidates = self.candidates_evaluated,
            "enumeration exhausted"
        );
        false
    }

    /// Rewind to the pre-enumeration state. Dimensions, mode and filter are
    /// kept.
    pub fn reset(&mut self) {
        self.indices.iter_mut().for_each(|i| *i = 0);
        self.before_start = true;
        self.exhausted = false;
        self.has_current = false;
        self.sweep_dimension = 0;
        self.sweep_index = None;
        self.candidates_evaluated = 0;
        debug!(mode = %self.mode, "engine reset");
    }

    /// Snapshot of the current combination, if one has been accepted.
    pub fn current(&self) -> Option<Combination> {
        self.has_current.then(|| self.snapshot())
    }

    /// Value indices of the current combination, parallel to `dimensions()`.
    pub fn current_indices(&self) -> Option<&[usize]> {
        self.has_current.then_some(self.indices.as_slice())
    }

    /// Drain the remaining combinations as an iterator.
    pub fn iter(&mut self) -> Combinations<'_> {
        Combinations { engine: self }
    }

    fn start(&mut self) {
        match self.mode {
            Mode::EveryElement => {
                for (index, dimension) in self.indices.iter_mut().zip(&self.dimensions) {
                    *index = dimension.middle_index();
                }
                self.sweep_dimension = 0;
                self.sweep_index = None;
            }
            _ => self.indices.iter_mut().for_each(|i| *i = 0),
        }
    }

    /// Move to the next structural candidate. Returns false when exhausted.
    fn advance(&mut self) -> bool {
        match self.mode {
            Mode::FullCombinatorial => self.advance_full(),
            Mode::EveryElement => self.advance_every_element(),
            // Rejected by set_mode.
            Mode::PairWise => false,
        }
    }

    /// Odometer step with dimension 0 as the fastest digit.
    fn advance_full(&mut self) -> bool {
        let mut cursor = 0;
        while cursor < self.dimensions.len() {
            self.indices[cursor] += 1;
            if self.indices[cursor] < self.dimensions[cursor].len() {
                return true;
            }
            for index in &mut self.indices[..=cursor] {
                *index = 0;
            }
            cursor += 1;
        }
        false
    }

    /// Sweep one dimension at a time through its non-middle indices while
    /// every other dimension stays pinned at its middle index.
    fn advance_every_element(&mut self) -> bool {
        while self.sweep_dimension < self.dimensions.len() {
            let dim = self.sweep_dimension;
            let middle = self.dimensions[dim].middle_index();

            let mut next = self.sweep_index.map_or(0, |i| i + 1);
            if next == middle {
                // Covered by the initial all-middle candidate.
                next += 1;
            }
            if next < self.dimensions[dim].len() {
                self.indices[dim] = next;
                self.sweep_index = Some(next);
                return true;
            }

            self.indices[dim] = middle;
            self.sweep_dimension += 1;
            self.sweep_index = None;
        }
        false
    }

    fn accept_current(&mut self) -> bool {
        self.candidates_evaluated += 1;
        let Some(filter) = self.filter.as_mut() else {
            return true;
        };
        let candidate = snapshot_of(&self.dimensions, &self.indices);
        let accepted = filter(&FilterEvent::new(&candidate));
        if !accepted {
            trace!(indices = ?self.indices, "candidate rejected by filter");
        }
        accepted
    }

    fn snapshot(&self) -> Combination {
        snapshot_of(&self.dimensions, &self.indices)
    }

    fn write_current(&self, combination: &mut Combination) {
        for (dimension, &index) in self.dimensions.iter().zip(&self.indices) {
            combination.insert(dimension.name(), dimension.values()[index].clone());
        }
    }
}

fn snapshot_of(dimensions: &[Dimension], indices: &[usize]) -> Combination {
    let mut combination = Combination::new();
    for (dimension, &index) in dimensions.iter().zip(indices) {
        combination.insert(dimension.name(), dimension.values()[index].clone());
    }
    combination
}

impl fmt::Debug for CombinatorialEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinatorialEngine")
            .field("dimensions", &self.dimensions)
            .field("indices", &self.indices)
            .field("mode", &self.mode)
            .field("before_start", &self.before_start)
            .field("exhausted", &self.exhausted)
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

/// Iterator adaptor returned by [`CombinatorialEngine::iter`].
pub struct Combinations<'a> {
    engine: &'a mut CombinatorialEngine,
}

impl Iterator for Combinations<'_> {
    type Item = Combination;

    fn next(&mut self) -> Option<Combination> {
        let mut combination = Combination::new();
        self.engine.next(&mut combination).then_some(combination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(sizes: &[usize]) -> Vec<Dimension> {
        sizes
            .iter()
            .enumerate()
            .map(|(d, &n)| Dimension::new(format!("D{d}"), 0..n as i64).unwrap())
            .collect()
    }

    fn drain_indices(engine: &mut CombinatorialEngine) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        let mut c = Combination::new();
        while engine.next(&mut c) {
            out.push(engine.current_indices().unwrap().to_vec());
        }
        out
    }

    #[test]
    fn test_no_dimensions_rejected() {
        let err = CombinatorialEngine::from_dimensions(vec![]).unwrap_err();
        assert!(matches!(err, EngineError::NoDimensions));
    }

    #[test]
    fn test_full_odometer_order() {
        let mut engine = CombinatorialEngine::from_dimensions(dims(&[2, 2])).unwrap();
        assert_eq!(
            drain_indices(&mut engine),
            vec![vec![0, 0], vec![1, 0], vec![0, 1], vec![1, 1]]
        );
    }

    #[test]
    fn test_single_value_dimensions_yield_once() {
        let mut engine = CombinatorialEngine::from_dimensions(dims(&[1, 1, 1])).unwrap();
        assert_eq!(drain_indices(&mut engine), vec![vec![0, 0, 0]]);
    }

    #[test]
    fn test_every_element_sweep_order() {
        let mut engine = CombinatorialEngine::from_dimensions(dims(&[3, 2]))
            .unwrap()
            .with_mode(Mode::EveryElement)
            .unwrap();
        // Middles are 1 and 1.
        assert_eq!(
            drain_indices(&mut engine),
            vec![vec![1, 1], vec![0, 1], vec![2, 1], vec![1, 0]]
        );
    }

    #[test]
    fn test_exhausted_stays_exhausted() {
        let mut engine = CombinatorialEngine::from_dimensions(dims(&[2])).unwrap();
        let mut c = Combination::new();
        assert!(engine.next(&mut c));
        assert!(engine.next(&mut c));
        assert!(!engine.next(&mut c));
        assert!(engine.is_exhausted());
        assert!(!engine.next(&mut c));
        assert!(engine.current().is_none());
    }

    #[test]
    fn test_candidates_counted_per_candidate() {
        let mut engine = CombinatorialEngine::from_dimensions(dims(&[4])).unwrap();
        engine.set_filter(|e: &FilterEvent<'_>| e.value("D0") != Some(&crate::Value::Int(2)));
        assert_eq!(drain_indices(&mut engine).len(), 3);
        assert_eq!(engine.candidates_evaluated(), 4);
    }

    #[test]
    fn test_filter_replacement_returns_previous() {
        let mut engine = CombinatorialEngine::from_dimensions(dims(&[2])).unwrap();
        assert!(engine.set_filter(|_: &FilterEvent<'_>| true).is_none());
        assert!(engine.set_filter(|_: &FilterEvent<'_>| false).is_some());
        assert!(engine.clear_filter().is_some());
        assert!(!engine.has_filter());
    }
}
