//! Validated mutual-information matrix.
//!
//! `MiMatrix` is the single entry point for matrix data: every consumer in
//! the crate takes `&MiMatrix`, so a matrix that is empty, ragged, or carries
//! NaN/negative entries cannot travel past `from_rows`. The diagonal holds
//! each variable's self-information (entropy); off-diagonal entries hold the
//! mutual information between the row and column variables.

use serde::Serialize;

use crate::{Error, Result};

/// N×N mutual-information matrix, immutable once constructed.
///
/// Symmetry is assumed from the producing side and not enforced; all reads
/// that care about pairs go through the upper triangle. Serialize-only:
/// deserialization would sidestep `from_rows` validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiMatrix {
    rows: Vec<Vec<f64>>,
}

impl MiMatrix {
    /// Validate and wrap raw matrix rows.
    ///
    /// Fails if the matrix is empty, not square, or contains non-finite or
    /// negative values. This is the shared validation for the tree builder
    /// and the threshold engine.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::EmptyMatrix);
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(Error::NotSquare { rows: n, row: i, cols: row.len() });
            }
            for (j, &v) in row.iter().enumerate() {
                if !v.is_finite() {
                    return Err(Error::NonFinite { row: i, col: j });
                }
                if v < 0.0 {
                    return Err(Error::Negative { row: i, col: j, value: v });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Number of variables (matrix side length).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mutual information between variables `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    /// Self-information (entropy) of variable `i`, the diagonal entry.
    pub fn self_information(&self, i: usize) -> f64 {
        self.rows[i][i]
    }

    /// Iterate the strict upper triangle as `(i, j, value)` with `i < j`.
    ///
    /// Row-major order, so the sequence is deterministic for a fixed matrix.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.len();
        (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j, self.rows[i][j])))
    }

    /// Number of distinct variable pairs: N(N−1)/2.
    pub fn pair_count(&self) -> usize {
        let n = self.len();
        n * (n - 1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_3x3() -> Vec<Vec<f64>> {
        vec![
            vec![2.0, 0.5, 0.1],
            vec![0.5, 3.0, 0.7],
            vec![0.1, 0.7, 1.0],
        ]
    }

    #[test]
    fn test_valid_matrix() {
        let m = MiMatrix::from_rows(rows_3x3()).unwrap();
        assert_eq!(m.len(), 3);
        assert_eq!(m.get(0, 1), 0.5);
        assert_eq!(m.self_information(1), 3.0);
        assert_eq!(m.pair_count(), 3);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(MiMatrix::from_rows(vec![]), Err(Error::EmptyMatrix)));
    }

    #[test]
    fn test_ragged_rejected() {
        let rows = vec![vec![1.0, 0.2], vec![0.2]];
        assert!(matches!(
            MiMatrix::from_rows(rows),
            Err(Error::NotSquare { rows: 2, row: 1, cols: 1 })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let rows = vec![vec![1.0, f64::NAN], vec![f64::NAN, 1.0]];
        assert!(matches!(
            MiMatrix::from_rows(rows),
            Err(Error::NonFinite { row: 0, col: 1 })
        ));
    }

    #[test]
    fn test_negative_rejected() {
        let rows = vec![vec![1.0, -0.5], vec![-0.5, 1.0]];
        assert!(matches!(
            MiMatrix::from_rows(rows),
            Err(Error::Negative { row: 0, col: 1, .. })
        ));
    }

    #[test]
    fn test_pairs_upper_triangle() {
        let m = MiMatrix::from_rows(rows_3x3()).unwrap();
        let pairs: Vec<_> = m.pairs().collect();
        assert_eq!(pairs, vec![(0, 1, 0.5), (0, 2, 0.1), (1, 2, 0.7)]);
    }

    #[test]
    fn test_single_variable() {
        let m = MiMatrix::from_rows(vec![vec![4.2]]).unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m.pair_count(), 0);
        assert_eq!(m.pairs().count(), 0);
    }
}
