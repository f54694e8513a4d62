// aoc2023 day 24 library code

pub mod config;
pub mod crossings;
pub mod equations;
pub mod error;
pub mod hailstone;
pub mod io;
pub mod linear;
pub mod quadric;
pub mod solver;

pub use config::Config;
pub use error::{HailstoneParsingError, ParsingError, SolveError};
pub use hailstone::Hailstone;
pub use solver::RockState;

/// Rock state from the first `config.sample` hailstones.
pub fn solve_rock(hailstones: &[Hailstone], config: &Config) -> Result<RockState, SolveError> {
    let equations = equations::build(hailstones, config.sample);
    solver::solve(&equations)
}

/// Future crossings inside the configured test area, `None` without one.
pub fn test_area_crossings(hailstones: &[Hailstone], config: &Config) -> Option<usize> {
    config
        .test_area
        .map(|(min, max)| crossings::count_future_crossings(hailstones, min, max))
}
