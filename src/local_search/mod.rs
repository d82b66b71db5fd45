//! Neighbor selection policies built on the swap neighborhood.

pub mod swap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::DistanceTable;
use crate::tour::Tour;

/// Number of random neighbors drawn by the randomized policy unless configured.
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

/// How a single search attempt picks a neighbor of its random start tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPolicy {
    /// Evaluate every swap neighbor once and keep the shortest.
    ExhaustiveBest,
    /// Take the first swap neighbor that beats the start tour.
    FirstImprovement,
    /// Evaluate `sample_size` random swap neighbors and keep the shortest.
    RandomizedSample { sample_size: usize },
}

impl Default for SearchPolicy {
    fn default() -> Self {
        SearchPolicy::ExhaustiveBest
    }
}

impl SearchPolicy {
    /// Randomized sampling with the default sample size.
    pub fn randomized_sample() -> Self {
        SearchPolicy::RandomizedSample {
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    /// Build a policy from its CLI selector.
    pub fn from_kind(kind: PolicyKind, sample_size: usize) -> Self {
        match kind {
            PolicyKind::ExhaustiveBest => SearchPolicy::ExhaustiveBest,
            PolicyKind::FirstImprovement => SearchPolicy::FirstImprovement,
            PolicyKind::RandomizedSample => SearchPolicy::RandomizedSample { sample_size },
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            SearchPolicy::ExhaustiveBest => PolicyKind::ExhaustiveBest,
            SearchPolicy::FirstImprovement => PolicyKind::FirstImprovement,
            SearchPolicy::RandomizedSample { .. } => PolicyKind::RandomizedSample,
        }
    }

    /// Run one search attempt from `start`.
    ///
    /// The randomized policy reports its best sampled neighbor even when that
    /// neighbor is longer than `start`; the restart driver filters those out
    /// through its own running best.
    pub fn search<R: Rng + ?Sized>(&self, start: &Tour, table: &DistanceTable, rng: &mut R) -> Tour {
        match *self {
            SearchPolicy::ExhaustiveBest => {
                best_of(swap::enumerate_all(start, table)).unwrap_or_else(|| start.clone())
            }
            SearchPolicy::FirstImprovement => swap::first_improving(start, start.length(), table)
                .unwrap_or_else(|| start.clone()),
            SearchPolicy::RandomizedSample { sample_size } => {
                best_of(swap::sample_random(start, table, sample_size, rng))
                    .unwrap_or_else(|| start.clone())
            }
        }
    }
}

/// Shortest tour of the sequence; ties go to the earliest.
fn best_of<I: Iterator<Item = Tour>>(tours: I) -> Option<Tour> {
    let mut best: Option<Tour> = None;
    for tour in tours {
        if best.as_ref().map_or(true, |b| tour.length() < b.length()) {
            best = Some(tour);
        }
    }
    best
}

/// Policy selector for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyKind {
    ExhaustiveBest,
    FirstImprovement,
    RandomizedSample,
}

impl PolicyKind {
    /// Algorithm label used in output file names.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::ExhaustiveBest => "steepest_hill_climbing",
            PolicyKind::FirstImprovement => "hill_climbing",
            PolicyKind::RandomizedSample => "gradient_descent",
        }
    }
}
