use crate::hailstone::Hailstone;
use itertools::Itertools;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

fn rational(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

/// Point where the xy-plane paths of `a` and `b` cross, if both get there after their start.
///
/// Parallel paths never cross, even when they overlap.
pub fn future_crossing_xy(a: &Hailstone, b: &Hailstone) -> Option<(BigRational, BigRational)> {
    let [apx, apy, _] = a.position().map(BigInt::from);
    let [avx, avy, _] = a.velocity().map(BigInt::from);
    let [bpx, bpy, _] = b.position().map(BigInt::from);
    let [bvx, bvy, _] = b.velocity().map(BigInt::from);

    let det = &avx * &bvy - &avy * &bvx;
    if det.is_zero() {
        return None;
    }

    let dx = bpx - &apx;
    let dy = bpy - &apy;

    // solves a.p + t * a.v = b.p + s * b.v
    let t = BigRational::new(&dx * &bvy - &dy * &bvx, det.clone());
    let s = BigRational::new(&dx * &avy - &dy * &avx, det);

    if !t.is_positive() || !s.is_positive() {
        return None;
    }

    let x = BigRational::from_integer(apx) + &t * BigRational::from_integer(avx);
    let y = BigRational::from_integer(apy) + &t * BigRational::from_integer(avy);

    Some((x, y))
}

/// Number of hailstone pairs whose future xy-plane paths cross inside `min..=max` on both axes.
pub fn count_future_crossings(hailstones: &[Hailstone], min: i64, max: i64) -> usize {
    let area = rational(min)..=rational(max);

    let count = hailstones
        .iter()
        .tuple_combinations()
        .filter_map(|(a, b)| future_crossing_xy(a, b))
        .filter(|(x, y)| area.contains(x) && area.contains(y))
        .count();

    tracing::debug!(min, max, count, "counted crossings");

    count
}
