use num_rational::BigRational;
use num_traits::{One, Zero};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Elimination {
    Unique(Vec<BigRational>),
    Inconsistent,
    Underdetermined(Family),
}

/// Solutions of a consistent system: `point + Σ s[j] * directions[j]` for any parameters `s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    point: Vec<BigRational>,
    directions: Vec<Vec<BigRational>>,
}

impl Family {
    pub fn point(&self) -> &[BigRational] {
        &self.point
    }

    pub fn directions(&self) -> &[Vec<BigRational>] {
        &self.directions
    }

    /// Number of free parameters.
    pub fn free(&self) -> usize {
        self.directions.len()
    }

    /// Number of independent rows which pinned down the family.
    pub fn rank(&self) -> usize {
        self.point.len() - self.directions.len()
    }

    /// The member at `params`.
    pub fn at(&self, params: &[BigRational]) -> Vec<BigRational> {
        assert_eq!(params.len(), self.free(), "parameter count");

        let mut x = self.point.clone();
        for (s, d) in params.iter().zip(&self.directions) {
            for (x, d) in x.iter_mut().zip(d) {
                *x += s * d;
            }
        }
        x
    }

    /// Narrows this family down to the members whose parameters belong to `inner`.
    pub fn restrict(&self, inner: &Family) -> Family {
        Family {
            point: self.at(&inner.point),
            directions: inner
                .directions
                .iter()
                .map(|d| {
                    // directions map without the point
                    let mut x = self.at(d);
                    for (x, p) in x.iter_mut().zip(&self.point) {
                        *x -= p;
                    }
                    x
                })
                .collect(),
        }
    }
}

/// Rows of `Σ a[i] * x[i] = b`, solved exactly by Gauss-Jordan elimination.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    columns: usize,
    // each row holds the coefficients followed by the right-hand side
    rows: Vec<Vec<BigRational>>,
}

impl LinearSystem {
    pub fn new(columns: usize) -> Self {
        LinearSystem {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row<I>(&mut self, coefficients: I, rhs: BigRational)
    where
        I: IntoIterator<Item = BigRational>,
    {
        let mut row = coefficients.into_iter().collect::<Vec<_>>();
        assert_eq!(row.len(), self.columns, "row width");
        row.push(rhs);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn solve(mut self) -> Elimination {
        let columns = self.columns;
        let rows = &mut self.rows;
        let pivots = reduce(rows, columns);
        let rank = pivots.len();

        tracing::trace!(rows = rows.len(), rank, "eliminated");

        // below the pivots only `0 = b` rows remain
        if rows[rank..].iter().any(|row| !row[columns].is_zero()) {
            return Elimination::Inconsistent;
        }

        let mut point = vec![BigRational::zero(); columns];
        for (row, &col) in rows.iter().zip(&pivots) {
            point[col] = row[columns].clone();
        }

        if rank == columns {
            return Elimination::Unique(point);
        }

        // one direction per free column: the free unknown moves by one, the pivots follow
        let directions = (0..columns)
            .filter(|col| !pivots.contains(col))
            .map(|free| {
                let mut d = vec![BigRational::zero(); columns];
                d[free] = BigRational::one();
                for (row, &col) in rows.iter().zip(&pivots) {
                    d[col] = -&row[free];
                }
                d
            })
            .collect();

        Elimination::Underdetermined(Family { point, directions })
    }
}

/// Brings `rows` into reduced row echelon form over their first `columns` entries, returning the
/// pivot column of each leading row in order.
pub fn reduce(rows: &mut [Vec<BigRational>], columns: usize) -> Vec<usize> {
    let mut pivots = Vec::new();

    for col in 0..columns {
        let rank = pivots.len();
        let pivot = match (rank..rows.len()).find(|&r| !rows[r][col].is_zero()) {
            Some(p) => p,
            None => continue,
        };

        rows.swap(rank, pivot);

        let p = rows[rank][col].clone();
        for x in rows[rank].iter_mut() {
            *x = &*x / &p;
        }

        let pivot_row = rows[rank].clone();

        for (i, row) in rows.iter_mut().enumerate() {
            if i == rank || row[col].is_zero() {
                continue;
            }
            let factor = row[col].clone();
            for (x, p) in row.iter_mut().zip(pivot_row.iter()) {
                *x -= &factor * p;
            }
        }

        pivots.push(col);
    }

    pivots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64) -> BigRational {
        BigRational::from_integer(n.into())
    }

    fn system(columns: usize, rows: &[&[i64]]) -> LinearSystem {
        let mut s = LinearSystem::new(columns);
        for row in rows {
            let (rhs, coeff) = row.split_last().unwrap();
            s.push_row(coeff.iter().copied().map(r), r(*rhs));
        }
        s
    }

    fn family(s: LinearSystem) -> Family {
        match s.solve() {
            Elimination::Underdetermined(f) => f,
            other => panic!("expected a family: {:?}", other),
        }
    }

    #[test]
    fn unique_two_by_two() {
        // x + y = 3, x - y = 1
        let s = system(2, &[&[1, 1, 3], &[1, -1, 1]]);
        assert_eq!(s.solve(), Elimination::Unique(vec![r(2), r(1)]));
    }

    #[test]
    fn fractional_solution() {
        // 2x = 1
        let s = system(1, &[&[2, 1]]);
        assert_eq!(
            s.solve(),
            Elimination::Unique(vec![BigRational::new(1.into(), 2.into())])
        );
    }

    #[test]
    fn needs_row_swap() {
        let s = system(3, &[&[0, 0, 1, 3], &[0, 2, 0, 4], &[5, 0, 0, 5]]);
        assert_eq!(s.solve(), Elimination::Unique(vec![r(1), r(2), r(3)]));
    }

    #[test]
    fn redundant_rows_are_fine() {
        let s = system(2, &[&[1, 1, 3], &[2, 2, 6], &[1, -1, 1], &[3, 1, 7]]);
        assert_eq!(s.solve(), Elimination::Unique(vec![r(2), r(1)]));
    }

    #[test]
    fn inconsistent() {
        let s = system(2, &[&[1, 1, 3], &[2, 2, 7]]);
        assert_eq!(s.solve(), Elimination::Inconsistent);
    }

    #[test]
    fn underdetermined() {
        // x + y = 3, z = 1
        let f = family(system(3, &[&[1, 1, 0, 3], &[0, 0, 1, 1]]));

        assert_eq!(f.rank(), 2);
        assert_eq!(f.free(), 1);
        assert_eq!(f.point(), &[r(3), r(0), r(1)][..]);
        assert_eq!(f.directions(), &[vec![r(-1), r(1), r(0)]][..]);
        assert_eq!(f.at(&[r(5)]), vec![r(-2), r(5), r(1)]);
    }

    #[test]
    fn family_members_solve_every_row() {
        let rows: &[&[i64]] = &[&[1, 2, -1, 0, 4], &[2, 4, 0, 1, 9]];
        let f = family(system(4, rows));
        assert_eq!(f.free(), 2);

        for params in [[0, 0], [1, 0], [0, 1], [-3, 7]] {
            let x = f.at(&params.map(r));
            for row in rows {
                let (rhs, coeff) = row.split_last().unwrap();
                let lhs = coeff
                    .iter()
                    .zip(&x)
                    .fold(r(0), |acc, (&c, x)| acc + r(c) * x);
                assert_eq!(lhs, r(*rhs), "{:?}", params);
            }
        }
    }

    #[test]
    fn restrict_composes_parameters() {
        // x + y + z = 6 leaves two parameters; fixing y = 2 inside them leaves one
        let outer = family(system(3, &[&[1, 1, 1, 6]]));
        assert_eq!(outer.directions().len(), 2);

        // outer parameters are (y, z), the inner family pins the first to 2
        let inner = family(system(2, &[&[1, 0, 2]]));
        let f = outer.restrict(&inner);

        assert_eq!(f.free(), 1);
        assert_eq!(f.rank(), 2);
        for z in [-1, 0, 4] {
            let x = f.at(&[r(z)]);
            assert_eq!(x[1], r(2));
            assert_eq!(&x[0] + &x[1] + &x[2], r(6));
        }
    }

    #[test]
    fn no_rows() {
        let s = LinearSystem::new(6);
        assert!(s.is_empty());
        let f = family(s);
        assert_eq!(f.rank(), 0);
        assert_eq!(f.free(), 6);
    }

    #[test]
    fn reduce_reports_pivots() {
        let mut rows = vec![
            vec![r(0), r(2), r(4)],
            vec![r(0), r(1), r(3)],
            vec![r(0), r(0), r(0)],
        ];
        let pivots = reduce(&mut rows, 3);

        assert_eq!(pivots, vec![1, 2]);
        assert_eq!(rows[0], vec![r(0), r(1), r(0)]);
        assert_eq!(rows[1], vec![r(0), r(0), r(1)]);
        assert_eq!(rows[2], vec![r(0), r(0), r(0)]);
    }
}
