//! Tour representation: a permutation of city indices with an implicit
//! closing edge back to the first city.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::DistanceTable;
use crate::error::{Error, Result};

/// Total length of a visiting order, including the edge from the last city
/// back to the first.
pub fn total_length(order: &[usize], table: &DistanceTable) -> f64 {
    let n = order.len();
    if n < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    for k in 0..n - 1 {
        total += table.get(order[k], order[k + 1]);
    }
    total + table.get(order[n - 1], order[0])
}

/// A candidate tour and its evaluated length.
///
/// Tours are never changed after construction; neighbors are derived as new
/// tours through [`Tour::swapped`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    order: Vec<usize>,
    length: f64,
}

impl Tour {
    /// Create a tour from a visiting order and evaluate it.
    pub fn new(order: Vec<usize>, table: &DistanceTable) -> Self {
        debug_assert!(
            check_permutation(&order, table.len()).is_ok(),
            "tour is not a permutation of 0..{}",
            table.len()
        );
        let length = total_length(&order, table);
        Tour { order, length }
    }

    /// A uniformly random tour over `n` cities (Fisher-Yates shuffle).
    pub fn random<R: Rng + ?Sized>(n: usize, table: &DistanceTable, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        Tour::new(order, table)
    }

    /// The neighbor obtained by exchanging the cities at positions `i` and `j`.
    pub fn swapped(&self, i: usize, j: usize, table: &DistanceTable) -> Self {
        let mut order = self.order.clone();
        order.swap(i, j);
        let length = total_length(&order, table);
        Tour { order, length }
    }

    /// Check that the tour visits each of the `n` cities exactly once.
    pub fn validate(&self, n: usize) -> Result<()> {
        check_permutation(&self.order, n)
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn check_permutation(order: &[usize], n: usize) -> Result<()> {
    if order.len() != n {
        return Err(Error::invalid_tour(format!(
            "expected {} cities, found {}",
            n,
            order.len()
        )));
    }

    let mut seen = vec![false; n];
    for &city in order {
        if city >= n {
            return Err(Error::invalid_tour(format!("city index {} out of range", city)));
        }
        if seen[city] {
            return Err(Error::invalid_tour(format!("city {} visited twice", city)));
        }
        seen[city] = true;
    }

    Ok(())
}
