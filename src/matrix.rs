//! Dense 2-D matrix used for activation rows and synapse weights.
//!
//! Activation layers are 1×N matrices, synapse weights are M×N matrices.
//! All operations that can fail on shape do so explicitly instead of
//! panicking, so topology bugs surface at the call site.

use ndarray::Array2;
use rand::Rng;

/// Dense matrix of `f32` values backed by an `ndarray` array.
///
/// Row count and column count are always at least 1. Cloning produces a
/// fully independent copy; no storage is ever shared between matrices.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Array2<f32>,
}

impl Matrix {
    /// Create a matrix with every value set to 1.0 (activation rows).
    pub fn ones(rows: usize, cols: usize) -> Self {
        debug_assert!(rows >= 1 && cols >= 1);
        Self {
            data: Array2::ones((rows, cols)),
        }
    }

    /// Create a matrix with every value set to 0.0.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        debug_assert!(rows >= 1 && cols >= 1);
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Create a synapse matrix with weights drawn uniformly from
    /// `[-r, r]` where `r = standard_synapse_range(cols)`.
    pub fn random_synapse<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        debug_assert!(rows >= 1 && cols >= 1);
        let range = Self::standard_synapse_range(cols);
        Self {
            data: Array2::from_shape_fn((rows, cols), |_| rng.gen_range(-range..range)),
        }
    }

    /// Weight initialization bound for a layer with the given fan-out.
    ///
    /// Scales inversely with the number of downstream connections so the
    /// variance of weighted sums stays roughly layer-size-independent
    /// (Xavier-style heuristic).
    pub fn standard_synapse_range(fan_out: usize) -> f32 {
        debug_assert!(fan_out >= 1);
        1.0 / (fan_out as f32).sqrt()
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Bounds-checked element read.
    pub fn get(&self, row: usize, col: usize) -> Result<f32, MatrixError> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(MatrixError::IndexOutOfRange {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Bounds-checked element write.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), MatrixError> {
        let rows = self.rows();
        let cols = self.cols();
        match self.data.get_mut((row, col)) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(MatrixError::IndexOutOfRange {
                row,
                col,
                rows,
                cols,
            }),
        }
    }

    /// Replace one row with the given values.
    ///
    /// With `allow_size_mismatch` set, only the overlapping prefix is
    /// copied; otherwise a length that differs from the column count is a
    /// `DimensionMismatch`.
    pub fn set_row(
        &mut self,
        row: usize,
        values: &[f32],
        allow_size_mismatch: bool,
    ) -> Result<(), MatrixError> {
        if row >= self.rows() {
            return Err(MatrixError::IndexOutOfRange {
                row,
                col: 0,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        if !allow_size_mismatch && values.len() != self.cols() {
            return Err(MatrixError::DimensionMismatch {
                expected: (1, self.cols()),
                found: (1, values.len()),
            });
        }

        let count = values.len().min(self.cols());
        for (col, &value) in values.iter().take(count).enumerate() {
            self.data[[row, col]] = value;
        }
        Ok(())
    }

    /// Copy of one row as a flat vector.
    pub fn row_values(&self, row: usize) -> Vec<f32> {
        self.data.row(row).to_vec()
    }

    /// Copy every value from a same-shaped matrix.
    pub fn set_all(&mut self, other: &Matrix) -> Result<(), MatrixError> {
        if self.rows() != other.rows() || self.cols() != other.cols() {
            return Err(MatrixError::DimensionMismatch {
                expected: (self.rows(), self.cols()),
                found: (other.rows(), other.cols()),
            });
        }
        self.data.assign(&other.data);
        Ok(())
    }

    /// Standard matrix product `self · other`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols() != other.rows() {
            return Err(MatrixError::DimensionMismatch {
                expected: (self.cols(), other.cols()),
                found: (other.rows(), other.cols()),
            });
        }
        Ok(Matrix {
            data: self.data.dot(&other.data),
        })
    }

    /// New matrix of the target shape with the overlapping top-left region
    /// copied from `self` and every other cell zero.
    ///
    /// This is what lets topology mutations resize a layer without
    /// discarding already-learned weights.
    pub fn redimension(&self, rows: usize, cols: usize) -> Matrix {
        debug_assert!(rows >= 1 && cols >= 1);
        let mut data = Array2::zeros((rows, cols));
        let copy_rows = rows.min(self.rows());
        let copy_cols = cols.min(self.cols());
        for row in 0..copy_rows {
            for col in 0..copy_cols {
                data[[row, col]] = self.data[[row, col]];
            }
        }
        Matrix { data }
    }

    /// Apply a function to every element in place.
    pub fn map_inplace<F: FnMut(f32) -> f32>(&mut self, f: F) {
        self.data.mapv_inplace(f);
    }

    /// Iterate over all values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }
}

/// Errors from matrix operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "Dimension mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            Self::IndexOutOfRange {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "Index ({}, {}) out of range for {}x{} matrix",
                row, col, rows, cols
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ones_and_zeros() {
        let ones = Matrix::ones(1, 4);
        assert_eq!(ones.rows(), 1);
        assert_eq!(ones.cols(), 4);
        assert!(ones.values().all(|v| v == 1.0));

        let zeros = Matrix::zeros(3, 2);
        assert!(zeros.values().all(|v| v == 0.0));
    }

    #[test]
    fn test_random_synapse_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mat = Matrix::random_synapse(10, 16, &mut rng);
        let range = Matrix::standard_synapse_range(16);

        assert!(mat.values().all(|v| v >= -range && v <= range));
    }

    #[test]
    fn test_standard_synapse_range_scales_with_fan_out() {
        assert_eq!(Matrix::standard_synapse_range(1), 1.0);
        assert_eq!(Matrix::standard_synapse_range(4), 0.5);
        assert!(Matrix::standard_synapse_range(100) < Matrix::standard_synapse_range(10));
    }

    #[test]
    fn test_get_set_bounds_checked() {
        let mut mat = Matrix::zeros(2, 3);
        mat.set(1, 2, 0.5).unwrap();
        assert_eq!(mat.get(1, 2).unwrap(), 0.5);

        assert!(matches!(
            mat.get(2, 0),
            Err(MatrixError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            mat.set(0, 3, 1.0),
            Err(MatrixError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_set_row_strict_and_permissive() {
        let mut mat = Matrix::zeros(1, 3);

        assert!(matches!(
            mat.set_row(0, &[1.0, 2.0], false),
            Err(MatrixError::DimensionMismatch { .. })
        ));

        // Permissive mode copies the overlapping prefix only.
        mat.set_row(0, &[1.0, 2.0], true).unwrap();
        assert_eq!(mat.row_values(0), vec![1.0, 2.0, 0.0]);

        mat.set_row(0, &[4.0, 5.0, 6.0, 7.0], true).unwrap();
        assert_eq!(mat.row_values(0), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_multiply() {
        let mut a = Matrix::zeros(1, 2);
        a.set_row(0, &[1.0, 1.0], false).unwrap();
        let b = Matrix::ones(2, 3);

        let c = a.multiply(&b).unwrap();
        assert_eq!(c.rows(), 1);
        assert_eq!(c.cols(), 3);
        assert_eq!(c.row_values(0), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = Matrix::ones(1, 2);
        let b = Matrix::ones(3, 1);
        assert!(matches!(
            a.multiply(&b),
            Err(MatrixError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_set_all() {
        let src = Matrix::ones(2, 2);
        let mut dst = Matrix::zeros(2, 2);
        dst.set_all(&src).unwrap();
        assert!(dst.values().all(|v| v == 1.0));

        let mut wrong = Matrix::zeros(2, 3);
        assert!(matches!(
            wrong.set_all(&src),
            Err(MatrixError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_clone_independence() {
        let mut original = Matrix::ones(2, 2);
        let mut copy = original.clone();
        copy.set(0, 0, -1.0).unwrap();

        assert_eq!(original.get(0, 0).unwrap(), 1.0);

        original.set(1, 1, 3.0).unwrap();
        assert_eq!(copy.get(1, 1).unwrap(), 1.0);
    }

    #[test]
    fn test_redimension_overlap_law() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mat = Matrix::random_synapse(4, 5, &mut rng);

        for &(rows, cols) in &[(2, 3), (6, 7), (4, 5), (1, 9), (9, 1)] {
            let resized = mat.redimension(rows, cols);
            assert_eq!(resized.rows(), rows);
            assert_eq!(resized.cols(), cols);

            for row in 0..rows {
                for col in 0..cols {
                    let expected = if row < mat.rows() && col < mat.cols() {
                        mat.get(row, col).unwrap()
                    } else {
                        0.0
                    };
                    assert_eq!(resized.get(row, col).unwrap(), expected);
                }
            }
        }
    }

    #[test]
    fn test_map_inplace() {
        let mut mat = Matrix::ones(1, 3);
        mat.map_inplace(|v| v * 2.0);
        assert!(mat.values().all(|v| v == 2.0));
    }
}
