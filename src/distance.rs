//! Pairwise great-circle distance table.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::problem::City;

/// Earth radius used by the haversine formula, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6373.0;

/// How raw haversine distances are stored in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Precision {
    /// Keep full floating-point kilometers.
    Exact,
    /// Truncate to whole kilometers.
    TruncatedKm,
}

impl Default for Precision {
    fn default() -> Self {
        Precision::Exact
    }
}

impl Precision {
    #[inline]
    fn apply(self, km: f64) -> f64 {
        match self {
            Precision::Exact => km,
            Precision::TruncatedKm => km.trunc(),
        }
    }
}

/// Great-circle distance in kilometers between two (longitude, latitude)
/// points given in degrees.
pub fn haversine_km(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let s1 = (dlat / 2.0).sin();
    let s2 = (dlon / 2.0).sin();
    let h = s1 * s1 + phi1.cos() * phi2.cos() * s2 * s2;
    // Rounding can push h a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.min(1.0).sqrt().asin()
}

/// Dense all-pairs distance table, addressed as `i * n + j`.
///
/// Both triangles are stored so a lookup is a single index, and the diagonal
/// is zero. The table is never mutated after construction and can be shared
/// across search threads by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceTable {
    n: usize,
    precision: Precision,
    distances: Vec<f64>,
}

impl DistanceTable {
    /// Build the table sequentially.
    pub fn build(cities: &[City], precision: Precision) -> Result<Self> {
        Self::build_with(cities, precision, |distances, n| {
            for (i, row) in distances.chunks_mut(n).enumerate() {
                fill_row(cities, precision, i, row);
            }
        })
    }

    /// Build the table with one rayon task per row. Produces the same table as
    /// [`DistanceTable::build`].
    pub fn build_parallel(cities: &[City], precision: Precision) -> Result<Self> {
        Self::build_with(cities, precision, |distances, n| {
            distances
                .par_chunks_mut(n)
                .enumerate()
                .for_each(|(i, row)| fill_row(cities, precision, i, row));
        })
    }

    fn build_with<F>(cities: &[City], precision: Precision, fill: F) -> Result<Self>
    where
        F: FnOnce(&mut [f64], usize),
    {
        check_coordinates(cities)?;
        let n = cities.len();
        let mut distances = vec![0.0; n * n];
        if n > 0 {
            fill(&mut distances, n);
        }

        Ok(DistanceTable {
            n,
            precision,
            distances,
        })
    }

    /// Distance from city `from` to city `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        debug_assert!(from < self.n && to < self.n, "city index out of range");
        self.distances[from * self.n + to]
    }

    /// Number of cities covered by the table.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }
}

/// Fill row `i` of the table; the diagonal cell stays zero.
fn fill_row(cities: &[City], precision: Precision, i: usize, row: &mut [f64]) {
    let from = &cities[i];
    for (j, cell) in row.iter_mut().enumerate() {
        if i != j {
            let to = &cities[j];
            *cell = precision.apply(haversine_km(
                from.longitude,
                from.latitude,
                to.longitude,
                to.latitude,
            ));
        }
    }
}

fn check_coordinates(cities: &[City]) -> Result<()> {
    for city in cities {
        if !city.longitude.is_finite() {
            return Err(Error::malformed_coordinate(
                &city.name,
                city.longitude.to_string(),
            ));
        }
        if !city.latitude.is_finite() {
            return Err(Error::malformed_coordinate(
                &city.name,
                city.latitude.to_string(),
            ));
        }
    }
    Ok(())
}
