use rand::Rng;

use crate::error::{ensure_len, NnError, Result};

/// Row-major dense matrix. Row `i` holds the incoming weights of neuron `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Samples every entry from U[0, 1) using the caller's generator.
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>();
            }
        }

        res
    }

    /// Builds a matrix from nested rows. Every row must have the same length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map_or(0, |row| row.len());
        for row in &data {
            ensure_len("Matrix::from_data row", cols, row.len())?;
        }

        Ok(Matrix {
            rows: data.len(),
            cols,
            data
        })
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    /// Matrix-vector product `self · v`.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>> {
        ensure_len("Matrix::mul_vec", self.cols, v.len())?;

        Ok(self.data.iter()
            .map(|row| row.iter().zip(v).map(|(w, x)| w * x).sum())
            .collect())
    }

    /// Outer product `a ⊗ b`, shape (a.len() × b.len()).
    pub fn outer(a: &[f64], b: &[f64]) -> Matrix {
        Matrix {
            rows: a.len(),
            cols: b.len(),
            data: a.iter()
                .map(|&ai| b.iter().map(|&bj| ai * bj).collect())
                .collect()
        }
    }

    /// In-place `self -= scale * other`.
    pub fn sub_scaled(&mut self, other: &Matrix, scale: f64) -> Result<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(NnError::shape(
                "Matrix::sub_scaled",
                self.rows * self.cols,
                other.rows * other.cols,
            ));
        }

        for (row, other_row) in self.data.iter_mut().zip(&other.data) {
            for (x, o) in row.iter_mut().zip(other_row) {
                *x -= scale * o;
            }
        }

        Ok(())
    }
}

/// Element-wise (Hadamard) product of two equal-length vectors.
pub fn hadamard(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    ensure_len("hadamard", a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}
