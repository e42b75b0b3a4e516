//! Generate, solve and benchmark mazes from the command line.
//!
//! Run: cargo run --bin mazer -- solve --difficulty medium --seed 7

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, debug};
use mazer_core::Grid;
use mazer_gen::{DEFAULT_EXTRA_OPEN_FRACTION, MazeConfig};
use mazer_paths::{SearchStatus, solve};

use mazer_demos::{Case, DemoError, Difficulty, Experiment, parse_size, run_experiment, verify_path};

/// Randomized maze generator and A* solver.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Cli {
    /// Enable debug messages
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a freshly generated maze
    Generate {
        #[command(flatten)]
        maze: MazeArgs,

        /// Print the grid as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Generate a maze and solve it with A*
    Solve {
        #[command(flatten)]
        maze: MazeArgs,

        /// Log every expanded cell
        #[arg(long, default_value_t = false)]
        trace: bool,

        /// Check the path length against a BFS distance
        #[arg(long, default_value_t = false)]
        verify: bool,
    },
    /// Time repeated solves over sizes and loop densities
    Bench {
        /// Comma-separated sizes, e.g. 10x10,20x20
        #[arg(long, value_delimiter = ',', value_parser = parse_size, default_value = "10x10,20x20,30x30")]
        sizes: Vec<(usize, usize)>,

        /// Comma-separated extra open fractions
        #[arg(long, value_delimiter = ',', default_value = "0.0,0.1,0.3")]
        densities: Vec<f64>,

        /// Solves per configuration
        #[arg(short, long, default_value_t = 10)]
        trials: usize,

        /// Layout to benchmark
        #[arg(value_enum, short, long, default_value_t = Case::Random)]
        case: Case,

        /// Base seed; trial i uses seed + i
        #[arg(short, long)]
        seed: Option<u64>,

        /// Append one line per trial to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
}

#[derive(Args)]
struct MazeArgs {
    /// Number of rows (rounded up to odd)
    #[arg(long, requires = "cols", conflicts_with = "difficulty")]
    rows: Option<usize>,

    /// Number of columns (rounded up to odd)
    #[arg(long, requires = "rows", conflicts_with = "difficulty")]
    cols: Option<usize>,

    /// Size preset
    #[arg(value_enum, short = 'f', long)]
    difficulty: Option<Difficulty>,

    /// Fraction of remaining walls to knock out after carving
    #[arg(short, long, default_value_t = DEFAULT_EXTRA_OPEN_FRACTION)]
    extra: f64,

    /// Seed for reproducible mazes
    #[arg(short, long)]
    seed: Option<u64>,
}

impl MazeArgs {
    fn config(&self) -> MazeConfig {
        let mut config = match (self.rows, self.cols, self.difficulty) {
            (Some(rows), Some(cols), _) => MazeConfig::with_size(rows, cols),
            (_, _, Some(d)) => {
                let (rows, cols) = d.size();
                MazeConfig::with_size(rows, cols)
            }
            _ => MazeConfig::default(),
        };
        config.extra_open_fraction = self.extra;
        config.seed = self.seed;
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbose = cli.debug || matches!(cli.command, Command::Solve { trace: true, .. });
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), DemoError> {
    match command {
        Command::Generate { maze, json } => {
            let grid = maze.config().generate()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!("{grid}");
            }
            Ok(())
        }
        Command::Solve {
            maze,
            trace,
            verify,
        } => {
            let mut grid = maze.config().generate()?;
            let status = solve_grid(&mut grid, trace)?;
            print!("{grid}");
            match status {
                SearchStatus::Found => println!(
                    "steps: {}, path length: {}",
                    grid.visited_count(),
                    grid.path().len()
                ),
                _ => println!("steps: {}, no path", grid.visited_count()),
            }
            if verify {
                verify_path(&grid)?;
                println!("verified against BFS");
            }
            Ok(())
        }
        Command::Bench {
            sizes,
            densities,
            trials,
            case,
            seed,
            log_file,
        } => {
            let mut file = match log_file {
                Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
                None => None,
            };
            let stdout = io::stdout();
            let mut out = stdout.lock();
            writeln!(
                out,
                "{:<10} {:>8} {:>7} {:>12} {:>12} {:>10} {:>10}",
                "size", "density", "trials", "mean time", "stdev", "steps", "path"
            )?;
            for &(rows, cols) in &sizes {
                for &density in &densities {
                    let exp = Experiment {
                        case,
                        rows,
                        cols,
                        density,
                        trials,
                        seed,
                    };
                    let log = file.as_mut().map(|f| f as &mut dyn Write);
                    let s = run_experiment(&exp, log)?;
                    writeln!(
                        out,
                        "{:<10} {:>8.2} {:>7} {:>11.6}s {:>11.6}s {:>10.1} {:>10.1}",
                        format!("{rows}x{cols}"),
                        density,
                        s.trials,
                        s.mean_time,
                        s.stdev_time,
                        s.mean_steps,
                        s.mean_path_len
                    )?;
                    if s.skipped > 0 {
                        writeln!(out, "  ({} unsolvable mazes skipped)", s.skipped)?;
                    }
                }
            }
            Ok(())
        }
    }
}

fn solve_grid(grid: &mut Grid, trace: bool) -> Result<SearchStatus, DemoError> {
    let mut search = solve(grid)?;
    if trace {
        for (i, p) in search.by_ref().enumerate() {
            debug!("step {}: expand {p}", i + 1);
        }
    }
    Ok(search.run())
}
