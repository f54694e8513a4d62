//! The equations restricted to a family of solutions of the linear rows.
//!
//! A polynomial of degree two in `n` variables is kept as the symmetric `(n + 1) × (n + 1)`
//! matrix `m` of its homogeneous form, so that with `x̂ = (1, x[0], .., x[n - 1])` the
//! polynomial is `x̂ᵀ m x̂`. Substituting an affine family `x = point + Σ s[j] * d[j]` is then a
//! change of basis, and the result is again of degree two, now in the parameters `s`.

use crate::equations::{Polynomial, Unknown, UNKNOWNS};
use crate::linear::{reduce, Elimination, Family, LinearSystem};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quadric {
    m: Vec<Vec<BigRational>>,
}

fn half(c: &BigInt) -> BigRational {
    BigRational::new(c.clone(), BigInt::from(2))
}

fn dot(a: &[BigRational], b: &[BigRational]) -> BigRational {
    a.iter()
        .zip(b)
        .filter(|(x, y)| !x.is_zero() && !y.is_zero())
        .fold(BigRational::zero(), |acc, (x, y)| acc + x * y)
}

impl From<&Polynomial> for Quadric {
    fn from(p: &Polynomial) -> Self {
        let mut m = vec![vec![BigRational::zero(); UNKNOWNS + 1]; UNKNOWNS + 1];
        m[0][0] = BigRational::from_integer(p.constant().clone());

        for a in Unknown::ALL {
            let i = a.index() + 1;
            m[0][i] = half(p.coefficient(a));
            m[i][0] = m[0][i].clone();

            for b in Unknown::ALL {
                let j = b.index() + 1;
                m[i][j] = if a == b {
                    BigRational::from_integer(p.product_coefficient(a, b).clone())
                } else {
                    half(p.product_coefficient(a, b))
                };
            }
        }

        Quadric { m }
    }
}

impl Quadric {
    fn variables(&self) -> usize {
        self.m.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.m.iter().flatten().all(Zero::is_zero)
    }

    /// The same equation in the parameters of `family`.
    pub fn substitute(&self, family: &Family) -> Quadric {
        assert_eq!(family.point().len(), self.variables(), "family width");

        // homogeneous columns of the substitution: (1, point), then (0, d) per direction
        let columns = std::iter::once((BigRational::one(), family.point()))
            .chain(
                family
                    .directions()
                    .iter()
                    .map(|d| (BigRational::zero(), d.as_slice())),
            )
            .map(|(head, rest)| {
                std::iter::once(head)
                    .chain(rest.iter().cloned())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let mapped = columns
            .iter()
            .map(|c| self.m.iter().map(|row| dot(row, c)).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let m = columns
            .iter()
            .map(|a| mapped.iter().map(|mb| dot(a, mb)).collect())
            .collect();

        Quadric { m }
    }

    /// Writes the polynomial as `c * l²` for an affine `l`, returning `l = 0` as coefficients and
    /// right-hand side.
    pub fn square_root(&self) -> Option<(Vec<BigRational>, BigRational)> {
        let n = self.m.len();
        let p = (0..n).find(|&p| !self.m[p][p].is_zero())?;
        let pivot = &self.m[p][p];

        // rank one: every entry factors through row p
        let rank_one = (0..n).all(|i| {
            (0..n).all(|j| &self.m[i][j] * pivot == &self.m[p][i] * &self.m[p][j])
        });

        if !rank_one {
            return None;
        }

        let row = &self.m[p];
        Some((row[1..].to_vec(), -&row[0]))
    }

    /// Coefficients of every monomial: products `s[i] * s[j]` with `i <= j`, then `s[i]`, then
    /// the constant.
    fn monomials(&self) -> Vec<BigRational> {
        let n = self.variables();
        let two = &BigRational::from_integer(BigInt::from(2));

        let products = (1..=n).flat_map(|i| {
            (i..=n).map(move |j| {
                if i == j {
                    self.m[i][i].clone()
                } else {
                    &self.m[i][j] * two
                }
            })
        });
        let linear = (1..=n).map(|i| &self.m[0][i] * two);

        products
            .chain(linear)
            .chain(std::iter::once(self.m[0][0].clone()))
            .collect()
    }
}

/// Linear rows implied by combinations of the quadrics in which every product cancels.
pub fn linear_consequences(quadrics: &[Quadric]) -> Vec<(Vec<BigRational>, BigRational)> {
    let n = match quadrics.first() {
        Some(q) => q.variables(),
        None => return Vec::new(),
    };
    let products = n * (n + 1) / 2;

    let mut rows = quadrics.iter().map(Quadric::monomials).collect::<Vec<_>>();
    let width = products + n + 1;
    reduce(&mut rows, width);

    rows.into_iter()
        .filter(|row| row[..products].iter().all(Zero::is_zero))
        .filter(|row| row[products..].iter().any(|x| !x.is_zero()))
        .map(|row| (row[products..products + n].to_vec(), -&row[products + n]))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narrowed {
    Point(Vec<BigRational>),
    Empty,
    Many { rank: usize },
}

/// Narrows a family of solutions of the linear rows down with the full `equations`.
///
/// Each round substitutes the family into the equations and collects the linear rows that
/// follow: combinations where the products cancel, and equations which are a multiple of a
/// square. A single remaining point still needs checking against the equations. When no round
/// makes progress the family, or a curve inside it, is left: more than one solution.
pub fn narrow(mut family: Family, equations: &[Polynomial]) -> Narrowed {
    let quadrics = equations.iter().map(Quadric::from).collect::<Vec<_>>();

    loop {
        let free = family.free();

        let restricted = quadrics
            .iter()
            .map(|q| q.substitute(&family))
            .filter(|q| !q.is_zero())
            .collect::<Vec<_>>();

        if restricted.is_empty() {
            tracing::debug!(free, "every member solves the equations");
            return Narrowed::Many {
                rank: family.rank(),
            };
        }

        let mut system = LinearSystem::new(free);
        for (coefficients, rhs) in linear_consequences(&restricted)
            .into_iter()
            .chain(restricted.iter().filter_map(Quadric::square_root))
        {
            system.push_row(coefficients, rhs);
        }

        tracing::debug!(
            free,
            quadrics = restricted.len(),
            rows = system.len(),
            "narrowing"
        );

        if system.is_empty() {
            return Narrowed::Many {
                rank: family.rank(),
            };
        }

        match system.solve() {
            Elimination::Unique(params) => return Narrowed::Point(family.at(&params)),
            Elimination::Inconsistent => return Narrowed::Empty,
            Elimination::Underdetermined(inner) if inner.free() == free => {
                return Narrowed::Many {
                    rank: family.rank(),
                }
            }
            Elimination::Underdetermined(inner) => family = family.restrict(&inner),
        }
    }
}
