use aoc2023::io::read_hailstones_from_path;
use aoc2023::{solve_rock, test_area_crossings, Config};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "with_dhat")]
use dhat::{Dhat, DhatAlloc};

#[cfg(feature = "with_dhat")]
#[global_allocator]
static ALLOCATOR: DhatAlloc = DhatAlloc;

/// Finds the rock which hits every hailstone and prints the sum of its initial position.
#[derive(Parser, Debug)]
#[command(name = "day24")]
struct Cli {
    /// Hailstones, one `x, y, z @ vx, vy, vz` per line
    input: PathBuf,

    /// Number of hailstones from the start of the input used for the equations
    #[arg(long, default_value_t = 5, value_parser = parse_sample)]
    sample: usize,

    /// Also count future xy-plane crossings inside MIN..=MAX
    #[arg(
        long,
        num_args = 2,
        value_names = ["MIN", "MAX"],
        allow_negative_numbers = true,
        conflicts_with = "puzzle_area"
    )]
    test_area: Option<Vec<i64>>,

    /// Count crossings inside the test area of the actual puzzle
    #[arg(long)]
    puzzle_area: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let base = if self.puzzle_area {
            Config::puzzle()
        } else {
            Config::default()
        };

        Config {
            sample: self.sample,
            test_area: match self.test_area.as_deref() {
                Some(&[min, max]) => Some((min, max)),
                _ => base.test_area,
            },
        }
    }
}

fn parse_sample(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("at least one hailstone is needed".into()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn init_tracing() {
    // stdout carries the answer
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    #[cfg(feature = "with_dhat")]
    let _dhat = Dhat::start_heap_profiling();

    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error + 'static>> {
    let config = cli.config();
    tracing::debug!(?config, input = %cli.input.display(), "starting");

    let hailstones = read_hailstones_from_path(&cli.input)?;
    println!("Loaded {} hailstones", hailstones.len());

    if let Some(count) = test_area_crossings(&hailstones, &config) {
        println!("Crossings: {}", count);
    }

    let rock = solve_rock(&hailstones, &config)?;
    println!("Solution: {}", rock);
    println!("Result: {}", rock.position_sum());

    Ok(())
}
