//! Pairwise Matrices
//!
//! Dense N×N storage for the memory ledger and the rest-distance table.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Dense row-major N×N matrix indexed by agent pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairMatrix {
    n: usize,
    data: Vec<f64>,
}

impl PairMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let n = rows.len();
        let mut m = Self::zeros(n);
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().take(n).enumerate() {
                m.set(i, j, v);
            }
        }
        m
    }

    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.n + j] = value;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    pub fn max_value(&self) -> f64 {
        self.values().fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.values().sum()
    }

    /// First `(i, j)` holding a non-finite value.
    pub fn find_non_finite(&self) -> Option<(usize, usize)> {
        self.data
            .iter()
            .position(|v| !v.is_finite())
            .map(|idx| (idx / self.n, idx % self.n))
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }
}

/// Symmetric rest separations, fixed from the initial layout.
///
/// Read-only once built: the elastic zero-point never moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestDistances(PairMatrix);

impl RestDistances {
    pub fn from_positions(positions: &[DVec3]) -> Self {
        let n = positions.len();
        let mut m = PairMatrix::zeros(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = positions[i].distance(positions[j]);
                m.set(i, j, d);
                m.set(j, i, d);
            }
        }
        Self(m)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.0.get(i, j)
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_matrix_indexing() {
        let mut m = PairMatrix::zeros(3);
        m.set(0, 2, 1.5);
        m.set(2, 0, 0.5);

        assert_eq!(m.get(0, 2), 1.5);
        assert_eq!(m.get(2, 0), 0.5);
        assert_eq!(m.row(0), &[0.0, 0.0, 1.5]);
        assert_eq!(m.max_value(), 1.5);
        assert_eq!(m.total(), 2.0);
        assert_eq!(PairMatrix::from_rows(&m.to_rows()), m);
    }

    #[test]
    fn test_find_non_finite() {
        let mut m = PairMatrix::zeros(3);
        assert_eq!(m.find_non_finite(), None);
        m.set(1, 2, f64::NAN);
        assert_eq!(m.find_non_finite(), Some((1, 2)));
    }

    #[test]
    fn test_rest_distances_symmetric() {
        let positions = [
            DVec3::ZERO,
            DVec3::new(3.0, 4.0, 0.0),
            DVec3::new(0.0, 0.0, 2.0),
        ];
        let rest = RestDistances::from_positions(&positions);

        assert_eq!(rest.size(), 3);
        assert_eq!(rest.get(0, 1), 5.0);
        assert_eq!(rest.get(1, 0), 5.0);
        assert_eq!(rest.get(0, 2), 2.0);
        assert_eq!(rest.get(2, 2), 0.0);
    }
}
