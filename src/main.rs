//! Command line runner for the TSP hill climbing search.

use clap::Parser;
use env_logger::Env;
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use tsp_hill_climbing::distance::Precision;
use tsp_hill_climbing::local_search::{PolicyKind, SearchPolicy, DEFAULT_SAMPLE_SIZE};
use tsp_hill_climbing::prompt::{GivenParameters, Prompt, RunParameters};
use tsp_hill_climbing::utils::{
    output_file_name, print_convergence_plot, save_solution, write_traces_json, SearchStatistics,
};
use tsp_hill_climbing::{Config, Problem, TspSearch};

/// Input files offered by the interactive prompt, looked up in the working directory.
const CANDIDATE_INPUTS: [&str; 2] = ["49_cities.txt", "cities_full.txt"];

#[derive(Debug, Parser)]
#[command(name = "tsp-hill-climbing", version, about)]
struct Args {
    /// City list: a header line, then `name,longitude,latitude` records
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Random restarts per round
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Number of rounds
    #[arg(short, long)]
    rounds: Option<usize>,

    /// Neighbor selection policy
    #[arg(short, long, value_enum)]
    policy: Option<PolicyKind>,

    /// Neighbors drawn per restart by the randomized-sample policy
    #[arg(long)]
    sample_size: Option<usize>,

    /// Distance precision
    #[arg(long, value_enum)]
    precision: Option<Precision>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Run restarts on all CPUs
    #[arg(long)]
    parallel: bool,

    /// JSON configuration file; command line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the best solution file
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write the per-round traces as JSON
    #[arg(long)]
    trace_json: Option<PathBuf>,

    /// Print an ASCII convergence chart
    #[arg(long)]
    plot: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .format_timestamp_millis()
        .init();

    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::new(),
    };
    apply_overrides(&mut config, &args);

    let Some(params) = run_parameters(&args, &config)? else {
        println!("Quitting.");
        return Ok(());
    };
    config = config
        .with_iterations(params.iterations)
        .with_rounds(params.rounds);

    let problem = Problem::from_file(&params.input, config.precision, config.parallel)?;
    log::info!(
        "Loaded {} cities from {}",
        problem.city_count(),
        params.input.display()
    );

    let algorithm = config.policy.kind().name();
    println!("\nStarting {} search", algorithm.replace('_', " "));
    let start_time = Instant::now();

    let mut search = TspSearch::new(problem, config)?;
    let run = search.run()?;

    println!(
        "Total run time: {:.3} sec",
        start_time.elapsed().as_secs_f64()
    );

    let output_path = args
        .output_dir
        .join(output_file_name(algorithm, &params.input));
    save_solution(&output_path, &run, &search.problem)?;
    log::info!("Saved best solution to {}", output_path.display());

    if let Some(path) = &args.trace_json {
        write_traces_json(io::BufWriter::new(File::create(path)?), &run)?;
        log::info!("Saved traces to {}", path.display());
    }

    if args.plot {
        print_convergence_plot(&run);
    }

    let stats = SearchStatistics {
        algorithm: algorithm.to_string(),
        cities: search.problem.city_count(),
        rounds: search.config.rounds,
        iterations: search.config.iterations,
        runtime: run.run_time,
        best_length: run.best_length(),
        output_path: Some(output_path),
    };
    println!("{}", stats.format());

    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(kind) = args.policy {
        let sample_size = match config.policy {
            SearchPolicy::RandomizedSample { sample_size } => sample_size,
            _ => DEFAULT_SAMPLE_SIZE,
        };
        config.policy = SearchPolicy::from_kind(kind, sample_size);
    }
    if let Some(size) = args.sample_size {
        if let SearchPolicy::RandomizedSample { sample_size } = &mut config.policy {
            *sample_size = size;
        } else {
            log::warn!("--sample-size only applies to the randomized-sample policy");
        }
    }
    if let Some(precision) = args.precision {
        config.precision = precision;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.parallel {
        config.parallel = true;
    }
}

/// Take the run parameters from the command line, prompting for whatever is
/// missing. `None` means the user quit.
fn run_parameters(args: &Args, config: &Config) -> Result<Option<RunParameters>, Box<dyn Error>> {
    let given = GivenParameters {
        input: args.input.clone(),
        iterations: args.iterations,
        rounds: args.rounds,
    };

    let files = if given.input.is_some() {
        Vec::new()
    } else {
        let cwd = std::env::current_dir()?;
        let files: Vec<PathBuf> = CANDIDATE_INPUTS
            .iter()
            .map(|name| cwd.join(name))
            .filter(|path| path.exists())
            .collect();
        if files.is_empty() {
            return Err(format!(
                "no input file given and none of {:?} found in {}",
                CANDIDATE_INPUTS,
                cwd.display()
            )
            .into());
        }
        files
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompt = Prompt::new(stdin.lock(), stdout.lock(), files);
    Ok(prompt.prompt_input(given, config)?)
}
