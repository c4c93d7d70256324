use log::debug;
use ndarray::{Array1, Array2, s};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::{StandardNormal, StandardUniform};

use crate::{
    DataErr, Result,
    dataset::Split,
    partition::{NEGATIVE, POSITIVE},
};

/// How many more test samples than train samples each cloud gets.
pub const TEST_FACTOR: usize = 10;

/// Number of rows generated for each cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudSizes {
    pub train1: usize,
    pub train2: usize,
    pub test1: usize,
    pub test2: usize,
}

impl CloudSizes {
    /// Splits `size_train` rows between the two clouds, giving `cl1_prop` of them
    /// (rounded down) to the first one. The test set is `TEST_FACTOR` times bigger.
    pub fn split(size_train: usize, cl1_prop: f64) -> Self {
        let train1 = ((size_train as f64 * cl1_prop) as usize).min(size_train);
        let train2 = size_train - train1;

        Self {
            train1,
            train2,
            test1: train1 * TEST_FACTOR,
            test2: train2 * TEST_FACTOR,
        }
    }
}

/// A multivariate normal distribution with covariance `factor * factor^T`.
#[derive(Debug, Clone)]
pub struct GaussianCloud {
    mean: Array1<f64>,
    factor: Array2<f64>,
}

impl GaussianCloud {
    pub fn new(mean: Array1<f64>, factor: Array2<f64>) -> Result<Self> {
        let d = mean.len();
        if factor.dim() != (d, d) {
            return Err(DataErr::BadShape {
                what: "covariance factor",
                shape: factor.shape().to_vec(),
            });
        }

        Ok(Self { mean, factor })
    }

    /// Draws a cloud with its mean in the unit hypercube and a random positive
    /// semi-definite covariance.
    pub fn random<R: Rng + ?Sized>(n_dim: usize, rng: &mut R) -> Self {
        let mean = Array1::random_using(n_dim, StandardUniform, rng);
        let factor = Array2::<f64>::random_using((n_dim, n_dim), StandardUniform, rng) - 0.5;

        Self { mean, factor }
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn covariance(&self) -> Array2<f64> {
        self.factor.dot(&self.factor.t())
    }

    /// Samples `n` rows. Each row is `mean + factor * z` with `z ~ N(0, I)`.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array2<f64> {
        let z: Array2<f64> = Array2::random_using((n, self.mean.len()), StandardNormal, rng);
        z.dot(&self.factor.t()) + &self.mean
    }
}

/// Generates two Gaussian clouds with a class balance drawn uniformly from
/// `[0.1, 0.9)`. Cloud 1 is labelled 1 and cloud 2 is labelled 0, and both
/// come in that order in train and test.
///
/// # Arguments
/// * `size_train` - Total number of training rows.
/// * `n_dim` - Number of features.
/// * `rng` - A random number generator.
///
/// # Returns
/// The unscaled split and the per-cloud sizes, or an error if `n_dim` is zero.
pub fn unbalanced_clouds<R: Rng + ?Sized>(
    size_train: usize,
    n_dim: usize,
    rng: &mut R,
) -> Result<(Split, CloudSizes)> {
    if n_dim == 0 {
        return Err(DataErr::InvalidConfig("n_dim must be positive".into()));
    }

    let cl1_prop = (rng.random::<f64>() - 0.5) * 0.8 + 0.5;
    let sizes = CloudSizes::split(size_train, cl1_prop);
    debug!(
        cl1_prop = cl1_prop, train1 = sizes.train1, train2 = sizes.train2;
        "generating gaussian clouds"
    );

    let cloud1 = GaussianCloud::random(n_dim, rng);
    let cloud2 = GaussianCloud::random(n_dim, rng);

    let train_x = stack_rows(
        &cloud1.sample(sizes.train1, rng),
        &cloud2.sample(sizes.train2, rng),
    );
    let test_x = stack_rows(
        &cloud1.sample(sizes.test1, rng),
        &cloud2.sample(sizes.test2, rng),
    );

    let split = Split {
        train_x,
        train_y: labels(sizes.train1, sizes.train2),
        test_x,
        test_y: labels(sizes.test1, sizes.test2),
    };

    Ok((split, sizes))
}

fn stack_rows(top: &Array2<f64>, bottom: &Array2<f64>) -> Array2<f64> {
    let n = top.nrows();
    let mut out = Array2::zeros((n + bottom.nrows(), top.ncols()));
    out.slice_mut(s![..n, ..]).assign(top);
    out.slice_mut(s![n.., ..]).assign(bottom);
    out
}

fn labels(n_pos: usize, n_neg: usize) -> Array1<i64> {
    let mut y = Array1::from_elem(n_pos + n_neg, NEGATIVE);
    y.slice_mut(s![..n_pos]).fill(POSITIVE);
    y
}
