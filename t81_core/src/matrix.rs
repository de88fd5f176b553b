//! The matrix layer: row-major matrices of [`BigInt`] with elementwise
//! addition and a multiply that routes every inner product through the
//! kernel's cached multiplier.

use crate::add::add as signed_add;
use crate::bigint::BigInt;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::Kernel;

/// A dense, row-major matrix of arbitrary-precision integers.
#[derive(Clone, Debug)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<BigInt>,
}

impl Matrix {
    /// Builds a matrix from row-major data. Errors if `data.len() != rows *
    /// cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<BigInt>) -> Result<Matrix> {
        if data.len() != rows * cols {
            return Err(Error::shape_mismatch(
                "matrix::new",
                format!("expected {} elements for a {rows}x{cols} matrix, got {}", rows * cols, data.len()),
            ));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// A `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: (0..rows * cols).map(|_| BigInt::zero()).collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> &BigInt {
        &self.data[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, value: BigInt) {
        self.data[row * self.cols + col] = value;
    }

    /// Elementwise addition; requires matching shapes.
    pub fn add(&self, other: &Matrix, cfg: &Config) -> Result<Matrix> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(Error::shape_mismatch(
                "matrix::add",
                format!(
                    "{}x{} + {}x{}",
                    self.rows, self.cols, other.rows, other.cols
                ),
            ));
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| signed_add(a, b, cfg))
            .collect::<Result<Vec<_>>>()?;
        Matrix::new(self.rows, self.cols, data)
    }

    /// Matrix multiplication: `self` is `m x n`, `other` is `n x p`, result
    /// is `m x p`. Every dot product runs through `kernel`'s cached
    /// multiplier.
    pub fn mul(&self, other: &Matrix, kernel: &Kernel) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::shape_mismatch(
                "matrix::mul",
                format!(
                    "{}x{} * {}x{}: inner dimensions disagree",
                    self.rows, self.cols, other.rows, other.cols
                ),
            ));
        }
        let mut result = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut acc = BigInt::zero();
                for k in 0..self.cols {
                    let product = kernel.mul(self.get(i, k), other.get(k, j))?;
                    acc = signed_add(&acc, &product, &kernel.config)?;
                }
                result.set(i, j, acc);
            }
        }
        Ok(result)
    }

    /// Transpose: a `cols x rows` matrix with `(i, j) -> (j, i)`.
    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.set(j, i, self.get(i, j).clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn m(rows: usize, cols: usize, values: &[i64]) -> Matrix {
        Matrix::new(rows, cols, values.iter().map(|&v| BigInt::from_i64(v)).collect()).unwrap()
    }

    #[test]
    fn add_matches_elementwise_reference() {
        let cfg = Config::default();
        let a = m(2, 2, &[1, 2, 3, 4]);
        let b = m(2, 2, &[10, 20, 30, 40]);
        let sum = a.add(&b, &cfg).unwrap();
        assert_eq!(sum.get(0, 0).to_i64().unwrap(), 11);
        assert_eq!(sum.get(1, 1).to_i64().unwrap(), 44);
    }

    #[test]
    fn add_rejects_shape_mismatch() {
        let cfg = Config::default();
        let a = m(2, 2, &[1, 2, 3, 4]);
        let b = m(2, 3, &[0; 6]);
        assert!(a.add(&b, &cfg).is_err());
    }

    #[test]
    fn mul_matches_known_product() {
        let kernel = Kernel::new(Config::default());
        // [[1, 2], [3, 4]] * [[5, 6], [7, 8]] = [[19, 22], [43, 50]]
        let a = m(2, 2, &[1, 2, 3, 4]);
        let b = m(2, 2, &[5, 6, 7, 8]);
        let product = a.mul(&b, &kernel).unwrap();
        assert_eq!(product.get(0, 0).to_i64().unwrap(), 19);
        assert_eq!(product.get(0, 1).to_i64().unwrap(), 22);
        assert_eq!(product.get(1, 0).to_i64().unwrap(), 43);
        assert_eq!(product.get(1, 1).to_i64().unwrap(), 50);
    }

    #[test]
    fn mul_rejects_inner_dimension_mismatch() {
        let kernel = Kernel::new(Config::default());
        let a = m(2, 3, &[0; 6]);
        let b = m(2, 2, &[0; 4]);
        assert!(a.mul(&b, &kernel).is_err());
    }

    #[test]
    fn transpose_swaps_dimensions_and_entries() {
        let a = m(2, 3, &[1, 2, 3, 4, 5, 6]);
        let t = a.transpose();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.get(2, 1).to_i64().unwrap(), 6);
        assert_eq!(t.get(0, 1).to_i64().unwrap(), 4);
    }
}
