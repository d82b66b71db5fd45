//! Search results: per-round traces and the best tour of a run.

use serde::Serialize;
use std::time::Duration;

use crate::problem::{City, Problem};
use crate::tour::Tour;

/// Running-best length after one restart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TracePoint {
    /// Global iteration index, `round * iterations + i`
    pub iteration: usize,
    /// Shortest length found in the round so far
    pub best_length: f64,
}

/// Append-only convergence trace of one round.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchTrace {
    points: Vec<TracePoint>,
}

impl SearchTrace {
    pub fn new() -> Self {
        SearchTrace::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SearchTrace {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, iteration: usize, best_length: f64) {
        self.points.push(TracePoint {
            iteration,
            best_length,
        });
    }

    pub fn points(&self) -> &[TracePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last recorded running-best length.
    pub fn final_length(&self) -> Option<f64> {
        self.points.last().map(|p| p.best_length)
    }

    /// True if the running best never goes up.
    pub fn is_non_increasing(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[1].best_length <= w[0].best_length)
    }
}

/// Best tour of a single round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundResult {
    pub round: usize,
    pub best: Tour,
    pub trace: SearchTrace,
    pub duration: Duration,
}

impl RoundResult {
    pub fn best_length(&self) -> f64 {
        self.best.length()
    }
}

/// Best tour across all rounds of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub best: Tour,
    pub rounds: Vec<RoundResult>,
    pub run_time: Duration,
}

impl RunResult {
    pub fn best_length(&self) -> f64 {
        self.best.length()
    }

    /// Translate the best tour back into cities, in visiting order.
    pub fn visiting_order<'a>(&self, problem: &'a Problem) -> Vec<&'a City> {
        self.best
            .order()
            .iter()
            .map(|&index| problem.city(index))
            .collect()
    }

    /// Per-round traces, in round order.
    pub fn traces(&self) -> impl Iterator<Item = &SearchTrace> {
        self.rounds.iter().map(|round| &round.trace)
    }
}
