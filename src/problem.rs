//! Problem definition: the fixed set of cities and their distance table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::distance::{DistanceTable, Precision};
use crate::error::{Error, Result};

/// A city to visit, located by longitude and latitude in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl City {
    /// Create a new city.
    pub fn new(name: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        City {
            name: name.into(),
            longitude,
            latitude,
        }
    }

    /// Create a city from unparsed coordinate fields.
    pub fn from_raw(name: &str, longitude: &str, latitude: &str) -> Result<Self> {
        let longitude = parse_coordinate(name, longitude)?;
        let latitude = parse_coordinate(name, latitude)?;
        Ok(City::new(name, longitude, latitude))
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.name, self.longitude, self.latitude)
    }
}

fn parse_coordinate(city: &str, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::malformed_coordinate(city, raw)),
    }
}

/// A TSP instance. City indices are positions in `cities`, which doubles as
/// the index-to-city mapping used when writing results.
#[derive(Debug, Clone)]
pub struct Problem {
    pub name: String,
    pub cities: Vec<City>,
    pub distances: DistanceTable,
}

impl Problem {
    /// Create a new problem and build its distance table.
    pub fn new(name: impl Into<String>, cities: Vec<City>, precision: Precision) -> Result<Self> {
        let distances = DistanceTable::build(&cities, precision)?;
        Ok(Problem {
            name: name.into(),
            cities,
            distances,
        })
    }

    /// Same as [`Problem::new`] but builds the distance table on the rayon pool.
    pub fn new_parallel(
        name: impl Into<String>,
        cities: Vec<City>,
        precision: Precision,
    ) -> Result<Self> {
        let distances = DistanceTable::build_parallel(&cities, precision)?;
        Ok(Problem {
            name: name.into(),
            cities,
            distances,
        })
    }

    /// Number of cities.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// The home city, index 0 by convention.
    pub fn home(&self) -> Option<&City> {
        self.cities.first()
    }

    /// Look up the city behind an index.
    pub fn city(&self, index: usize) -> &City {
        &self.cities[index]
    }

    /// Load a problem from a city list file, named after the file stem. With
    /// `parallel` set the distance table is built on the rayon pool.
    pub fn from_file<P: AsRef<Path>>(path: P, precision: Precision, parallel: bool) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let cities = parse_cities(io::BufReader::new(File::open(path)?))?;
        log::debug!("parsed {} cities from {}", cities.len(), path.display());

        if parallel {
            Self::new_parallel(name, cities, precision)
        } else {
            Self::new(name, cities, precision)
        }
    }

    /// Parse a city list: a header line, then one `name,longitude,latitude`
    /// record per line.
    pub fn parse<R: BufRead>(name: impl Into<String>, reader: R, precision: Precision) -> Result<Self> {
        let cities = parse_cities(reader)?;
        log::debug!("parsed {} cities", cities.len());
        Self::new(name, cities, precision)
    }
}

/// Read city records, skipping the header line and blank lines.
pub fn parse_cities<R: BufRead>(reader: R) -> Result<Vec<City>> {
    let mut cities = Vec::new();

    for (i, line_result) in reader.lines().enumerate().skip(1) {
        let line = line_result?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 3 {
            return Err(Error::invalid_input(
                i + 1,
                format!("expected 3 comma-separated fields, found {}", parts.len()),
            ));
        }

        cities.push(City::from_raw(parts[0], parts[1], parts[2])?);
    }

    // Some inputs close the loop by repeating home at the end; the closing
    // edge is implicit in a tour, so drop the copy.
    if cities.len() > 2 && cities.first() == cities.last() {
        log::debug!("dropping trailing copy of the home city");
        cities.pop();
    }

    Ok(cities)
}
