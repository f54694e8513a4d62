use crate::equations::{Polynomial, Unknown, UNKNOWNS};
use crate::error::SolveError;
use crate::linear::{Elimination, LinearSystem};
use crate::quadric::{self, Narrowed};
use itertools::Itertools;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use std::fmt;

/// Initial position and velocity of the rock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RockState {
    pub rx: BigRational,
    pub ry: BigRational,
    pub rz: BigRational,
    pub vrx: BigRational,
    pub vry: BigRational,
    pub vrz: BigRational,
}

impl RockState {
    pub fn from_values(values: [BigRational; UNKNOWNS]) -> Self {
        let [rx, ry, rz, vrx, vry, vrz] = values;
        RockState {
            rx,
            ry,
            rz,
            vrx,
            vry,
            vrz,
        }
    }

    pub fn from_integers(pos: [i64; 3], vel: [i64; 3]) -> Self {
        let [rx, ry, rz] = pos;
        let [vrx, vry, vrz] = vel;
        Self::from_values([rx, ry, rz, vrx, vry, vrz].map(|v| BigRational::from_integer(v.into())))
    }

    pub fn get(&self, u: Unknown) -> &BigRational {
        match u {
            Unknown::Rx => &self.rx,
            Unknown::Ry => &self.ry,
            Unknown::Rz => &self.rz,
            Unknown::Vrx => &self.vrx,
            Unknown::Vry => &self.vry,
            Unknown::Vrz => &self.vrz,
        }
    }

    pub fn values(&self) -> [BigRational; UNKNOWNS] {
        Unknown::ALL.map(|u| self.get(u).clone())
    }

    /// `rx + ry + rz`; integrality is not checked.
    pub fn position_sum(&self) -> BigRational {
        &self.rx + &self.ry + &self.rz
    }
}

impl fmt::Display for RockState {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "[{}]", Unknown::ALL.iter().map(|&u| self.get(u)).format(", "))
    }
}

/// Linear rows implied by the equations: the already linear ones, and the difference of every
/// pair whose products of unknowns cancel.
pub fn linearize(equations: &[Polynomial]) -> Vec<([BigInt; UNKNOWNS], BigInt)> {
    let direct = equations.iter().filter_map(Polynomial::linear_part);

    let differences = equations
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| !a.is_linear() && a.same_bilinear(b))
        .filter_map(|(a, b)| (a - b).linear_part());

    direct.chain(differences).collect()
}

/// Finds the single rock state satisfying every equation.
///
/// The linear rows from [`linearize`] usually pin the rock down on their own. When they leave
/// free parameters, the equations are narrowed over that family before giving up.
pub fn solve(equations: &[Polynomial]) -> Result<RockState, SolveError> {
    if equations.is_empty() {
        return Err(SolveError::NoSolution);
    }

    let rows = linearize(equations);

    let mut system = LinearSystem::new(UNKNOWNS);
    for (coefficients, rhs) in rows {
        system.push_row(
            coefficients.into_iter().map(BigRational::from_integer),
            BigRational::from_integer(rhs),
        );
    }

    tracing::debug!(
        equations = equations.len(),
        rows = system.len(),
        "linearized"
    );

    let values = match system.solve() {
        Elimination::Unique(values) => values,
        Elimination::Inconsistent => return Err(SolveError::NoSolution),
        Elimination::Underdetermined(family) => {
            tracing::debug!(rank = family.rank(), "linear rows leave a family");
            match quadric::narrow(family, equations) {
                Narrowed::Point(values) => values,
                Narrowed::Empty => return Err(SolveError::NoSolution),
                Narrowed::Many { rank } => return Err(SolveError::Ambiguous { rank }),
            }
        }
    };

    let values: [BigRational; UNKNOWNS] = match values.try_into() {
        Ok(values) => values,
        Err(_) => unreachable!("elimination yields one value per unknown"),
    };

    // the linear rows lose information, so check the bilinear equations too
    if let Some((i, residual)) = equations
        .iter()
        .map(|e| e.eval(&values))
        .enumerate()
        .find(|(_, residual)| !residual.is_zero())
    {
        tracing::warn!(equation = i, %residual, "linear solution does not satisfy equation");
        return Err(SolveError::NoSolution);
    }

    let rock = RockState::from_values(values);
    tracing::info!(%rock, "found rock");

    Ok(rock)
}
