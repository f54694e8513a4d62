//! Collinearity conditions between the rock and each hailstone, as polynomials in the six
//! unknowns of the rock state.
//!
//! With `d = p - r` and `w = vr - v` (hailstone minus rock position, rock minus hailstone
//! velocity) the two trajectories meet exactly when `d × w = 0`. Two components of the cross
//! product are used per hailstone: the xy-plane one (A) and the yz-plane one (B).

use crate::hailstone::Hailstone;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::ops::{Mul, Sub};

pub const UNKNOWNS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unknown {
    Rx,
    Ry,
    Rz,
    Vrx,
    Vry,
    Vrz,
}

impl Unknown {
    pub const ALL: [Unknown; UNKNOWNS] = [
        Unknown::Rx,
        Unknown::Ry,
        Unknown::Rz,
        Unknown::Vrx,
        Unknown::Vry,
        Unknown::Vrz,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// `constant + Σ linear[i] * unknown[i]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affine {
    constant: BigInt,
    linear: [BigInt; UNKNOWNS],
}

impl Affine {
    pub fn constant(c: i64) -> Self {
        Affine {
            constant: BigInt::from(c),
            ..Default::default()
        }
    }

    pub fn unknown(u: Unknown) -> Self {
        let mut a = Affine::default();
        a.linear[u.index()] = BigInt::one();
        a
    }
}

impl Sub for Affine {
    type Output = Affine;

    fn sub(self, other: Affine) -> Affine {
        Affine {
            constant: self.constant - other.constant,
            linear: std::array::from_fn(|i| &self.linear[i] - &other.linear[i]),
        }
    }
}

impl Mul for Affine {
    type Output = Polynomial;

    fn mul(self, other: Affine) -> Polynomial {
        let mut p = Polynomial {
            constant: &self.constant * &other.constant,
            linear: std::array::from_fn(|i| {
                &self.constant * &other.linear[i] + &other.constant * &self.linear[i]
            }),
            ..Default::default()
        };

        for (i, a) in self.linear.iter().enumerate().filter(|(_, a)| !a.is_zero()) {
            for (j, b) in other.linear.iter().enumerate().filter(|(_, b)| !b.is_zero()) {
                // rx * vry and vry * rx are the same monomial
                let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
                p.bilinear[lo][hi] += a * b;
            }
        }

        p
    }
}

/// A polynomial of degree at most two in the unknowns, understood as `polynomial = 0`.
///
/// Products of unknowns are kept in the upper triangle of `bilinear`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polynomial {
    constant: BigInt,
    linear: [BigInt; UNKNOWNS],
    bilinear: [[BigInt; UNKNOWNS]; UNKNOWNS],
}

impl Polynomial {
    pub fn constant(&self) -> &BigInt {
        &self.constant
    }

    pub fn coefficient(&self, u: Unknown) -> &BigInt {
        &self.linear[u.index()]
    }

    pub fn product_coefficient(&self, a: Unknown, b: Unknown) -> &BigInt {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        &self.bilinear[lo.index()][hi.index()]
    }

    pub fn is_linear(&self) -> bool {
        self.bilinear.iter().flatten().all(Zero::is_zero)
    }

    /// True when subtracting `other` cancels every product of unknowns.
    pub fn same_bilinear(&self, other: &Polynomial) -> bool {
        self.bilinear == other.bilinear
    }

    /// Coefficients and right-hand side of `Σ c[i] * unknown[i] = rhs`, or `None` while
    /// products of unknowns remain.
    pub fn linear_part(&self) -> Option<([BigInt; UNKNOWNS], BigInt)> {
        if !self.is_linear() {
            return None;
        }
        Some((self.linear.clone(), -&self.constant))
    }

    pub fn eval(&self, values: &[BigRational; UNKNOWNS]) -> BigRational {
        let mut acc = BigRational::from_integer(self.constant.clone());

        for (c, v) in self.linear.iter().zip(values.iter()) {
            if !c.is_zero() {
                acc += BigRational::from_integer(c.clone()) * v;
            }
        }

        for (i, row) in self.bilinear.iter().enumerate() {
            for (j, c) in row.iter().enumerate().skip(i) {
                if !c.is_zero() {
                    acc += BigRational::from_integer(c.clone()) * &values[i] * &values[j];
                }
            }
        }

        acc
    }
}

impl<'a> Sub<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn sub(self, other: &'a Polynomial) -> Polynomial {
        Polynomial {
            constant: &self.constant - &other.constant,
            linear: std::array::from_fn(|i| &self.linear[i] - &other.linear[i]),
            bilinear: std::array::from_fn(|i| {
                std::array::from_fn(|j| &self.bilinear[i][j] - &other.bilinear[i][j])
            }),
        }
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, other: Polynomial) -> Polynomial {
        &self - &other
    }
}

/// xy-plane condition: `(px - rx) * (vry - vy) - (vrx - vx) * (py - ry)`
pub fn xy_condition(h: &Hailstone) -> Polynomial {
    use Unknown::*;
    let (c, u) = (Affine::constant, Affine::unknown);

    (c(h.px) - u(Rx)) * (u(Vry) - c(h.vy)) - (u(Vrx) - c(h.vx)) * (c(h.py) - u(Ry))
}

/// yz-plane condition: `(py - ry) * (vrz - vz) - (vry - vy) * (pz - rz)`
pub fn yz_condition(h: &Hailstone) -> Polynomial {
    use Unknown::*;
    let (c, u) = (Affine::constant, Affine::unknown);

    (c(h.py) - u(Ry)) * (u(Vrz) - c(h.vz)) - (u(Vry) - c(h.vy)) * (c(h.pz) - u(Rz))
}

/// Two equations for each of the first `n` hailstones, xy-plane condition first.
pub fn build(hailstones: &[Hailstone], n: usize) -> Vec<Polynomial> {
    let equations = hailstones
        .iter()
        .take(n)
        .flat_map(|h| [xy_condition(h), yz_condition(h)])
        .collect::<Vec<_>>();

    tracing::debug!(
        hailstones = hailstones.len().min(n),
        equations = equations.len(),
        "built equations"
    );

    equations
}

#[cfg(test)]
mod tests {
    use super::*;
    use Unknown::*;

    fn state(values: [i64; UNKNOWNS]) -> [BigRational; UNKNOWNS] {
        values.map(|v| BigRational::from_integer(v.into()))
    }

    #[test]
    fn true_rock_zeroes_both_conditions() {
        // rock 24, 13, 10 @ -3, 1, 2 meets this one at t = 5
        let h = Hailstone::new([19, 13, 30], [-2, 1, -2]);
        let rock = state([24, 13, 10, -3, 1, 2]);

        assert!(xy_condition(&h).eval(&rock).is_zero());
        assert!(yz_condition(&h).eval(&rock).is_zero());
    }

    #[test]
    fn constructed_intersection() {
        let (pos, vel, t) = ([-7, 100, 3], [4, -9, 2], 11);
        let hv = [1, 0, -5];
        let hp = [0, 1, 2].map(|i| pos[i] + vel[i] * t - hv[i] * t);
        let h = Hailstone::new(hp, hv);
        let rock = state([pos[0], pos[1], pos[2], vel[0], vel[1], vel[2]]);

        for e in build(&[h], 5) {
            assert!(e.eval(&rock).is_zero(), "{:?}", e);
        }
    }

    #[test]
    fn missing_rock_leaves_residual() {
        let h = Hailstone::new([19, 13, 30], [-2, 1, -2]);
        let rock = state([25, 13, 10, -3, 1, 2]);

        assert!(!xy_condition(&h).eval(&rock).is_zero());
    }

    #[test]
    fn expanded_coefficients() {
        let h = Hailstone::new([19, 13, 30], [-2, 1, -2]);
        let a = xy_condition(&h);

        // (19 - rx)(vry - 1) - (vrx + 2)(13 - ry)
        assert_eq!(a.constant(), &BigInt::from(-19 - 26));
        assert_eq!(a.coefficient(Rx), &BigInt::from(1));
        assert_eq!(a.coefficient(Ry), &BigInt::from(2));
        assert_eq!(a.coefficient(Vrx), &BigInt::from(-13));
        assert_eq!(a.coefficient(Vry), &BigInt::from(19));
        assert_eq!(a.product_coefficient(Rx, Vry), &BigInt::from(-1));
        assert_eq!(a.product_coefficient(Vrx, Ry), &BigInt::from(1));
        assert_eq!(a.product_coefficient(Ry, Vrx), &BigInt::from(1));
        assert!(a.coefficient(Rz).is_zero());
    }

    #[test]
    fn products_cancel_between_hailstones() {
        let a = Hailstone::new([19, 13, 30], [-2, 1, -2]);
        let b = Hailstone::new([18, 19, 22], [-1, -1, -2]);

        let (xa, xb) = (xy_condition(&a), xy_condition(&b));
        assert!(!xa.is_linear());
        assert!(xa.same_bilinear(&xb));
        assert!(!xa.same_bilinear(&yz_condition(&b)));

        let diff = &xa - &xb;
        assert!(diff.is_linear());
        assert!(diff.linear_part().is_some());
        assert!(xa.linear_part().is_none());
    }

    #[test]
    fn build_takes_first_n() {
        let hs = [
            Hailstone::new([19, 13, 30], [-2, 1, -2]),
            Hailstone::new([18, 19, 22], [-1, -1, -2]),
            Hailstone::new([20, 25, 34], [-2, -2, -4]),
        ];

        assert_eq!(build(&hs, 2).len(), 4);
        assert_eq!(build(&hs, 5).len(), 6);
        assert_eq!(build(&hs, 2)[2], xy_condition(&hs[1]));
        assert_eq!(build(&hs, 2)[3], yz_condition(&hs[1]));
    }
}
