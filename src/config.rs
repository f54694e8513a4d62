/// Knobs for a single run; the default is what the puzzle needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How many hailstones, from the start of the input, feed the equations.
    pub sample: usize,
    /// Inclusive bounds of the xy-plane area where crossings are counted, if at all.
    pub test_area: Option<(i64, i64)>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sample: 5,
            test_area: None,
        }
    }
}

impl Config {
    /// The test area of the actual puzzle input.
    pub fn puzzle() -> Self {
        Config {
            test_area: Some((200_000_000_000_000, 400_000_000_000_000)),
            ..Default::default()
        }
    }
}
