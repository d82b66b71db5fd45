//! Output and reporting helpers: the best-tour file, trace export, and
//! console summaries.

use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::problem::{City, Problem};
use crate::solution::{RunResult, SearchTrace};

const LENGTH_PREFIX: &str = "Shortest path found: ";
const LENGTH_SUFFIX: &str = " km";

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Name of the best-solution file for an algorithm and input file, e.g.
/// `hill_climbing_49_cities_best_solution.txt`.
pub fn output_file_name<P: AsRef<Path>>(algorithm: &str, input: P) -> String {
    let base = input
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = base.split('.').next().unwrap_or_default();
    format!("{}_{}_best_solution.txt", algorithm, base)
}

/// Write the best tour: a length line, then one `name,longitude,latitude`
/// line per city in visiting order. The last city has no line break.
pub fn write_solution<W: Write>(mut writer: W, run: &RunResult, problem: &Problem) -> io::Result<()> {
    write!(writer, "{}{}{}", LENGTH_PREFIX, run.best_length(), LENGTH_SUFFIX)?;
    for city in run.visiting_order(problem) {
        write!(writer, "\n{}", city)?;
    }
    writer.flush()
}

/// Save the best tour to `path`.
pub fn save_solution<P: AsRef<Path>>(path: P, run: &RunResult, problem: &Problem) -> Result<()> {
    let file = File::create(path)?;
    write_solution(BufWriter::new(file), run, problem)?;
    Ok(())
}

/// A best-tour file read back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSolution {
    pub length: f64,
    pub cities: Vec<City>,
}

/// Parse the format produced by [`write_solution`].
pub fn read_solution<R: BufRead>(reader: R) -> Result<SavedSolution> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(Error::invalid_input(1, "empty solution file")),
    };
    let length = header
        .trim_end()
        .strip_prefix(LENGTH_PREFIX)
        .and_then(|rest| rest.strip_suffix(LENGTH_SUFFIX))
        .and_then(|value| value.parse::<f64>().ok())
        .ok_or_else(|| Error::invalid_input(1, format!("unrecognized header '{}'", header)))?;

    let mut cities = Vec::new();
    for (i, line_result) in lines.enumerate() {
        let line = line_result?;
        let parts: Vec<&str> = line.trim_end().split(',').collect();
        if parts.len() != 3 {
            return Err(Error::invalid_input(
                i + 2,
                format!("expected 3 comma-separated fields, found {}", parts.len()),
            ));
        }
        cities.push(City::from_raw(parts[0], parts[1], parts[2])?);
    }

    Ok(SavedSolution { length, cities })
}

/// Load a best-tour file.
pub fn load_solution<P: AsRef<Path>>(path: P) -> Result<SavedSolution> {
    let file = File::open(path)?;
    read_solution(BufReader::new(file))
}

#[derive(Serialize)]
struct TraceExport<'a> {
    round: usize,
    best_length: f64,
    duration_secs: f64,
    trace: &'a SearchTrace,
}

/// Export the per-round traces as JSON for an external plotting tool.
pub fn write_traces_json<W: Write>(writer: W, run: &RunResult) -> Result<()> {
    let export: Vec<TraceExport<'_>> = run
        .rounds
        .iter()
        .map(|round| TraceExport {
            round: round.round,
            best_length: round.best_length(),
            duration_secs: round.duration.as_secs_f64(),
            trace: &round.trace,
        })
        .collect();
    serde_json::to_writer_pretty(writer, &export)?;
    Ok(())
}

/// Summary of a finished run.
pub struct SearchStatistics {
    pub algorithm: String,
    pub cities: usize,
    pub rounds: usize,
    pub iterations: usize,
    pub runtime: Duration,
    pub best_length: f64,
    pub output_path: Option<PathBuf>,
}

impl SearchStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        let output = self
            .output_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "Search Statistics:
- Algorithm: {}
- Cities: {}
- Rounds: {}
- Iterations per Round: {}
- Runtime: {}
- Shortest Path: {} km
- Output: {}",
            self.algorithm,
            self.cities,
            self.rounds,
            self.iterations,
            format_duration(self.runtime),
            self.best_length,
            output
        )
    }
}

/// Draw the running-best traces of every round as an ASCII chart, one symbol
/// per round. Iterations run left to right, shorter lengths sit lower.
pub fn render_convergence_plot(run: &RunResult, width: usize, height: usize) -> String {
    let round_symbols = ['*', '+', 'x', '#', '@', '&', '%', '=', '^', '$'];
    let width = width.max(2);
    let height = height.max(2);

    let points: Vec<_> = run.traces().flat_map(|t| t.points().iter()).collect();
    if points.is_empty() {
        return String::new();
    }

    let mut min_x = usize::MAX;
    let mut max_x = 0;
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;
    for p in &points {
        min_x = min_x.min(p.iteration);
        max_x = max_x.max(p.iteration);
        min_y = min_y.min(p.best_length);
        max_y = max_y.max(p.best_length);
    }
    let span_x = (max_x - min_x).max(1) as f64;
    let span_y = if max_y > min_y { max_y - min_y } else { 1.0 };

    let mut grid = vec![vec![' '; width]; height];
    for (r_idx, trace) in run.traces().enumerate() {
        let symbol = round_symbols[r_idx % round_symbols.len()];
        for p in trace.points() {
            let x = ((p.iteration - min_x) as f64 / span_x * (width - 1) as f64) as usize;
            let y = ((max_y - p.best_length) / span_y * (height - 1) as f64) as usize;
            grid[y][x] = symbol;
        }
    }

    let mut out = String::new();
    out.push_str(&format!("{:>12.1} km\n", max_y));
    for row in &grid {
        out.push('|');
        out.extend(row.iter());
        out.push('\n');
    }
    out.push_str(&format!("{:>12.1} km\n", min_y));
    out.push_str(&format!("iterations {}..={}\n", min_x, max_x));
    for r_idx in 0..run.rounds.len().min(round_symbols.len()) {
        out.push_str(&format!("{} - Round {}\n", round_symbols[r_idx], r_idx));
    }
    out
}

/// Print the convergence chart to the console.
pub fn print_convergence_plot(run: &RunResult) {
    println!("{}", render_convergence_plot(run, 80, 20));
}
