use ndarray::{Array1, Array2, ArrayView2, Axis, Zip};

use crate::{DataErr, Result};

/// Per-feature standardization: `(x - mean) / scale`.
///
/// Fit once on the training features and applied unchanged to every other matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Fits the scaler to the columns of `x`.
    ///
    /// Uses the population standard deviation. Constant columns, including those
    /// that only vary by rounding noise, get a scale of 1 so they are only centered.
    ///
    /// # Returns
    /// An error if `x` has no rows.
    pub fn fit(x: ArrayView2<f64>) -> Result<Self> {
        let mean = x.mean_axis(Axis(0)).ok_or(DataErr::EmptyTrainingSet)?;
        let n = x.nrows() as f64;

        let mut scale = x.std_axis(Axis(0), 0.);
        Zip::from(&mut scale).and(&mean).for_each(|s, &m| {
            if is_constant(*s, m, n) {
                *s = 1.;
            }
        });

        Ok(Self { mean, scale })
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn scale(&self) -> &Array1<f64> {
        &self.scale
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Standardizes `x` in place.
    ///
    /// # Returns
    /// An error if `x` doesn't have as many columns as the fitted data.
    pub fn transform_inplace(&self, x: &mut Array2<f64>) -> Result<()> {
        if x.ncols() != self.n_features() {
            return Err(DataErr::SizeMismatch {
                a: "features",
                b: "scaler",
                got: x.ncols(),
                expected: self.n_features(),
            });
        }

        *x -= &self.mean;
        *x /= &self.scale;
        Ok(())
    }

    /// Returns a standardized copy of `x`.
    pub fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        let mut out = x.to_owned();
        self.transform_inplace(&mut out)?;
        Ok(out)
    }
}

/// Whether a column's variance is within the rounding error of computing it over
/// `n` samples with the given mean.
fn is_constant(std: f64, mean: f64, n: f64) -> bool {
    let var = std * std;
    let bound = n * f64::EPSILON * var + (n * mean * f64::EPSILON).powi(2);
    var <= bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const EPS: f64 = 1e-9;

    #[test]
    fn zero_mean_unit_variance() {
        let x = array![[1., 10., 3.], [2., 20., 3.], [3., 60., 3.], [6., 30., 3.]];
        let scaler = StandardScaler::fit(x.view()).unwrap();
        let z = scaler.transform(x.view()).unwrap();

        let mean = z.mean_axis(Axis(0)).unwrap();
        let var = z.var_axis(Axis(0), 0.);

        for j in 0..2 {
            assert!(mean[j].abs() < EPS, "mean[{j}] = {}", mean[j]);
            assert!((var[j] - 1.).abs() < EPS, "var[{j}] = {}", var[j]);
        }

        // constant column
        assert!(z.column(2).iter().all(|&v| v == 0.));
        assert_eq!(scaler.scale()[2], 1.);
    }

    #[test]
    fn applies_train_parameters() {
        let train = array![[0., 0.], [2., 4.]];
        let scaler = StandardScaler::fit(train.view()).unwrap();
        assert_eq!(scaler.mean(), &array![1., 2.]);
        assert_eq!(scaler.scale(), &array![1., 2.]);

        let test = array![[3., 2.], [1., 6.]];
        let z = scaler.transform(test.view()).unwrap();
        assert_eq!(z, array![[2., 0.], [0., 2.]]);
    }

    #[test]
    fn rounding_noise_is_constant() {
        let big = 1e8;
        let x = array![
            [big, 1e-10],
            [big + 3e-8, 2e-10],
            [big, 1e-10],
            [big + 3e-8, 2e-10]
        ];
        let scaler = StandardScaler::fit(x.view()).unwrap();

        assert_eq!(scaler.scale()[0], 1.);
        let z = scaler.transform(x.view()).unwrap();
        assert!(z.column(0).iter().all(|v| v.abs() < 1e-6));

        // small but real spread is still scaled
        assert!((scaler.scale()[1] - 5e-11).abs() < 1e-15);
        assert!(z.column(1).iter().all(|v| (v.abs() - 1.).abs() < 1e-6));
    }

    #[test]
    fn width_mismatch() {
        let scaler = StandardScaler::fit(array![[1., 2.], [3., 4.]].view()).unwrap();
        let mut x = array![[1., 2., 3.]];
        let err = scaler.transform_inplace(&mut x).unwrap_err();
        assert!(matches!(
            err,
            DataErr::SizeMismatch {
                got: 3,
                expected: 2,
                ..
            }
        ));
    }

    #[test]
    fn empty() {
        let x = Array2::<f64>::zeros((0, 3));
        assert!(matches!(
            StandardScaler::fit(x.view()),
            Err(DataErr::EmptyTrainingSet)
        ));
    }
}
