//! Coverage accounting over produced combinations.
//!
//! Coverage points are expressed in value indices, not values, so that
//! dimensions holding unhashable values (floats, nested lists) still work:
//! - **element**: a single dimension value appears in some combination.
//! - **pair**: two values of two distinct dimensions appear together.

use std::collections::HashSet;

use crate::dimension::Dimension;

/// A specific value (or value pair) that should be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoveragePoint {
    Element {
        dimension: usize,
        index: usize,
    },
    /// Always stored with `dimension1 < dimension2`.
    Pair {
        dimension1: usize,
        index1: usize,
        dimension2: usize,
        index2: usize,
    },
}

/// One element target per value of every dimension.
pub fn every_element_targets(dimensions: &[Dimension]) -> Vec<CoveragePoint> {
    dimensions
        .iter()
        .enumerate()
        .flat_map(|(dimension, d)| {
            (0..d.len()).map(move |index| CoveragePoint::Element { dimension, index })
        })
        .collect()
}

/// One pair target per value pair of every two distinct dimensions.
pub fn all_pairs_targets(dimensions: &[Dimension]) -> Vec<CoveragePoint> {
    let mut targets = Vec::new();

    for i in 0..dimensions.len() {
        for j in (i + 1)..dimensions.len() {
            for index1 in 0..dimensions[i].len() {
                for index2 in 0..dimensions[j].len() {
                    targets.push(CoveragePoint::Pair {
                        dimension1: i,
                        index1,
                        dimension2: j,
                        index2,
                    });
                }
            }
        }
    }

    targets
}

/// Records the points hit by produced combinations.
#[derive(Debug, Clone, Default)]
pub struct CoverageTracker {
    covered: HashSet<CoveragePoint>,
    combinations: usize,
}

impl CoverageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one combination given as value indices per dimension.
    pub fn record(&mut self, indices: &[usize]) {
        self.combinations += 1;
        for (dimension, &index) in indices.iter().enumerate() {
            self.covered
                .insert(CoveragePoint::Element { dimension, index });
        }
        for i in 0..indices.len() {
            for j in (i + 1)..indices.len() {
                self.covered.insert(CoveragePoint::Pair {
                    dimension1: i,
                    index1: indices[i],
                    dimension2: j,
                    index2: indices[j],
                });
            }
        }
    }

    /// Combinations recorded so far.
    pub fn combinations(&self) -> usize {
        self.combinations
    }

    pub fn is_covered(&self, point: &CoveragePoint) -> bool {
        self.covered.contains(point)
    }

    /// Targets not yet hit, in target order.
    pub fn uncovered(&self, targets: &[CoveragePoint]) -> Vec<CoveragePoint> {
        targets
            .iter()
            .filter(|t| !self.covered.contains(*t))
            .copied()
            .collect()
    }

    /// Fraction of `targets` hit. An empty target list counts as fully covered.
    pub fn ratio(&self, targets: &[CoveragePoint]) -> f64 {
        if targets.is_empty() {
            return 1.0;
        }
        let hit = targets.iter().filter(|t| self.covered.contains(*t)).count();
        hit as f64 / targets.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Vec<Dimension> {
        vec![
            Dimension::new("A", [1, 2, 3]).unwrap(),
            Dimension::new("B", ["x", "y"]).unwrap(),
            Dimension::new("C", [true]).unwrap(),
        ]
    }

    #[test]
    fn test_target_counts() {
        let d = dims();
        assert_eq!(every_element_targets(&d).len(), 6);
        // A×B + A×C + B×C
        assert_eq!(all_pairs_targets(&d).len(), 6 + 3 + 2);
    }

    #[test]
    fn test_record_and_ratio() {
        let d = dims();
        let targets = every_element_targets(&d);
        let mut tracker = CoverageTracker::new();
        assert_eq!(tracker.ratio(&targets), 0.0);

        tracker.record(&[0, 0, 0]);
        tracker.record(&[2, 1, 0]);
        assert_eq!(tracker.combinations(), 2);
        assert_eq!(
            tracker.uncovered(&targets),
            vec![CoveragePoint::Element {
                dimension: 0,
                index: 1
            }]
        );
        assert!((tracker.ratio(&targets) - 5.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_pairs_recorded() {
        let mut tracker = CoverageTracker::new();
        tracker.record(&[1, 0, 0]);
        assert!(tracker.is_covered(&CoveragePoint::Pair {
            dimension1: 0,
            index1: 1,
            dimension2: 2,
            index2: 0,
        }));
        assert!(!tracker.is_covered(&CoveragePoint::Pair {
            dimension1: 0,
            index1: 0,
            dimension2: 1,
            index2: 0,
        }));
    }

    #[test]
    fn test_empty_targets_fully_covered() {
        assert_eq!(CoverageTracker::new().ratio(&[]), 1.0);
    }
}
