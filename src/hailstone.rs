use crate::error::HailstoneParsingError;
use std::fmt;
use std::str::FromStr;

/// Initial position and constant velocity of a single hailstone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hailstone {
    pub px: i64,
    pub py: i64,
    pub pz: i64,
    pub vx: i64,
    pub vy: i64,
    pub vz: i64,
}

impl Hailstone {
    pub fn new(pos: [i64; 3], vel: [i64; 3]) -> Self {
        let [px, py, pz] = pos;
        let [vx, vy, vz] = vel;
        Hailstone {
            px,
            py,
            pz,
            vx,
            vy,
            vz,
        }
    }

    pub fn position(&self) -> [i64; 3] {
        [self.px, self.py, self.pz]
    }

    pub fn velocity(&self) -> [i64; 3] {
        [self.vx, self.vy, self.vz]
    }
}

impl From<&([i64; 3], [i64; 3])> for Hailstone {
    fn from((pos, vel): &([i64; 3], [i64; 3])) -> Self {
        Hailstone::new(*pos, *vel)
    }
}

impl fmt::Display for Hailstone {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "{}, {}, {} @ {}, {}, {}",
            self.px, self.py, self.pz, self.vx, self.vy, self.vz
        )
    }
}

/// Parses `px, py, pz @ vx, vy, vz`.
///
/// The parser is lenient about spacing: it splits on `@` and `,` and trims every token, so the
/// padded puzzle form `20, 19, 15 @  1, -5, -3` and the compact `1,2,3@4,5,6` both parse.
impl FromStr for Hailstone {
    type Err = HailstoneParsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pos, vel) = s.split_once('@').ok_or(HailstoneParsingError::MissingVelocity)?;

        Ok(Hailstone::new(triple(pos)?, triple(vel)?))
    }
}

fn triple(s: &str) -> Result<[i64; 3], HailstoneParsingError> {
    use HailstoneParsingError::*;

    let mut split = s.split(',').map(str::trim);

    let x = split.next().ok_or(MissingElements)?;
    let y = split.next().ok_or(MissingElements)?;
    let z = split.next().ok_or(MissingElements)?;

    if split.next().is_some() {
        return Err(ExtraElements);
    }

    Ok([x.parse()?, y.parse()?, z.parse()?])
}

#[test]
fn parse_hailstone() {
    let h = "19, 13, 30 @ -2, 1, -2".parse::<Hailstone>().unwrap();
    assert_eq!(h.position(), [19, 13, 30]);
    assert_eq!(h.velocity(), [-2, 1, -2]);
}

#[test]
fn parse_padded_velocity() {
    // the puzzle aligns columns with extra spaces
    let h = "20, 19, 15 @  1, -5, -3".parse::<Hailstone>().unwrap();
    assert_eq!(h, Hailstone::new([20, 19, 15], [1, -5, -3]));
}

#[test]
fn parse_without_spaces() {
    let h = "1,2,3@4,5,6".parse::<Hailstone>().unwrap();
    assert_eq!(h, Hailstone::new([1, 2, 3], [4, 5, 6]));

    let h = "\t-1 ,2,  3 @4 ,-5,6 ".parse::<Hailstone>().unwrap();
    assert_eq!(h, Hailstone::new([-1, 2, 3], [4, -5, 6]));
}

#[test]
fn parse_large_values() {
    let h = "262130794315133, 305267994111063, 163273807102793 @ 57, -252, 150"
        .parse::<Hailstone>()
        .unwrap();
    assert_eq!(h.px, 262_130_794_315_133);
    assert_eq!(h.vy, -252);
}

#[test]
fn display_reparses_to_same() {
    let samples = [
        ([0, 0, 0], [0, 0, 0]),
        ([-1, -2, -3], [-4, -5, -6]),
        ([i64::MAX, i64::MIN, 17], [1, -1, 0]),
        ([262130794315133, -305267994111063, 0], [57, -252, 150]),
    ];

    for h in samples.iter().map(Hailstone::from) {
        let s = h.to_string();
        assert_eq!(s.parse::<Hailstone>().unwrap(), h, "{}", s);
    }
}

#[test]
fn display_format() {
    let h = Hailstone::new([19, 13, 30], [-2, 1, -2]);
    assert_eq!(h.to_string(), "19, 13, 30 @ -2, 1, -2");
}

#[test]
fn parse_errors() {
    use HailstoneParsingError::*;

    assert_eq!("19, 13, 30".parse::<Hailstone>(), Err(MissingVelocity));
    assert_eq!("19, 13 @ -2, 1, -2".parse::<Hailstone>(), Err(MissingElements));
    assert_eq!("19, 13, 30, 1 @ -2, 1, -2".parse::<Hailstone>(), Err(ExtraElements));
    assert!(matches!(
        "19, 13, x @ -2, 1, -2".parse::<Hailstone>(),
        Err(InvalidNum(_))
    ));
    assert!(matches!(
        "19, 13, 30 @ -2, 1.5, -2".parse::<Hailstone>(),
        Err(InvalidNum(_))
    ));
}
