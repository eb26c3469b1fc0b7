//! Candidate filtering.
//!
//! A filter sees each candidate combination once, before it is yielded, and
//! returns whether to accept it. The candidate is a read-only snapshot.

use combi_ir::value::Value;

use crate::Combination;

/// Boxed filter callback. Returns `true` to accept the candidate.
pub type FilterFn = dyn FnMut(&FilterEvent<'_>) -> bool;

/// What a filter is asked to judge.
#[derive(Debug, Clone, Copy)]
pub struct FilterEvent<'a> {
    candidate: &'a Combination,
    default_accept: bool,
}

impl<'a> FilterEvent<'a> {
    pub(crate) fn new(candidate: &'a Combination) -> Self {
        Self {
            candidate,
            default_accept: true,
        }
    }

    pub fn candidate(&self) -> &'a Combination {
        self.candidate
    }

    /// Value of dimension `name` in the candidate.
    pub fn value(&self, name: &str) -> Option<&'a Value> {
        self.candidate.get(name)
    }

    /// The decision the engine would make without a filter.
    pub fn default_accept(&self) -> bool {
        self.default_accept
    }
}
