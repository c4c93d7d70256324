//! Readers for the on-disk array formats the datasets ship in.

mod mat;
mod npz;

pub use mat::load_mat_array;
pub use npz::NpzReader;

use ndarray::{Array1, Array2, ShapeBuilder};

use crate::{DataErr, Result};

/// A dense numeric array read from disk, widened to `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawArray {
    shape: Vec<usize>,
    data: Vec<f64>,
    column_major: bool,
}

impl RawArray {
    pub fn new(shape: Vec<usize>, data: Vec<f64>, column_major: bool) -> Self {
        Self {
            shape,
            data,
            column_major,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Interprets the array as a `samples x features` matrix.
    ///
    /// # Returns
    /// An error if the array isn't two dimensional.
    pub fn into_features(self, what: &'static str) -> Result<Array2<f64>> {
        let &[rows, cols] = self.shape.as_slice() else {
            return Err(DataErr::BadShape {
                what,
                shape: self.shape,
            });
        };

        let shape = (rows, cols).set_f(self.column_major);
        Array2::from_shape_vec(shape, self.data).map_err(|_| DataErr::BadShape {
            what,
            shape: self.shape,
        })
    }

    /// Interprets the array as a label vector. Accepts 1D arrays as well as row
    /// and column vectors.
    ///
    /// # Returns
    /// An error if the array isn't a vector or if a label isn't an integer.
    pub fn into_labels(self, what: &'static str) -> Result<Array1<i64>> {
        let is_vector = match self.shape.as_slice() {
            [_] => true,
            [rows, cols] => *rows == 1 || *cols == 1,
            _ => false,
        };
        if !is_vector || self.shape.iter().product::<usize>() != self.data.len() {
            return Err(DataErr::BadShape {
                what,
                shape: self.shape,
            });
        }

        self.data
            .into_iter()
            .map(|value| {
                if value.is_finite() && value.fract() == 0. {
                    Ok(value as i64)
                } else {
                    Err(DataErr::NonIntegralLabel { value })
                }
            })
            .collect()
    }
}
