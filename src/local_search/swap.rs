//! Swap neighborhood: exchange the cities at two distinct tour positions.

use itertools::Itertools;
use rand::seq::index;
use rand::Rng;

use crate::distance::DistanceTable;
use crate::tour::Tour;

/// All position pairs `(i, j)` with `i < j`, `i` ascending in the outer loop
/// and `j` ascending in the inner loop.
pub fn swap_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).tuple_combinations()
}

/// Number of distinct swap neighbors of a tour over `n` cities.
pub fn neighborhood_size(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Lazily evaluate every swap neighbor of `tour`, in [`swap_pairs`] order.
pub fn enumerate_all<'a>(
    tour: &'a Tour,
    table: &'a DistanceTable,
) -> impl Iterator<Item = Tour> + 'a {
    swap_pairs(tour.len()).map(move |(i, j)| tour.swapped(i, j, table))
}

/// Lazily evaluate `count` random swap neighbors of `tour`.
///
/// Each draw picks two distinct positions; draws are independent, so the same
/// pair can come up more than once.
pub fn sample_random<'a, R: Rng + ?Sized>(
    tour: &'a Tour,
    table: &'a DistanceTable,
    count: usize,
    rng: &'a mut R,
) -> impl Iterator<Item = Tour> + 'a {
    let n = tour.len();
    let count = if n < 2 { 0 } else { count };

    (0..count).map(move |_| {
        let pair = index::sample(&mut *rng, n, 2);
        tour.swapped(pair.index(0), pair.index(1), table)
    })
}

/// The first neighbor in enumeration order strictly shorter than
/// `base_length`, or `None` if `tour` is a local optimum.
pub fn first_improving(tour: &Tour, base_length: f64, table: &DistanceTable) -> Option<Tour> {
    enumerate_all(tour, table).find(|neighbor| neighbor.length() < base_length)
}
