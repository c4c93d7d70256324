use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::Rng;

use crate::{
    DataErr, Result,
    partition::{NEGATIVE, POSITIVE, Partition},
    scaling::StandardScaler,
};

/// Raw, unscaled train/test arrays as they come out of a loader or generator.
#[derive(Debug, Clone)]
pub struct Split {
    pub train_x: Array2<f64>,
    pub train_y: Array1<i64>,
    pub test_x: Array2<f64>,
    pub test_y: Array1<i64>,
}

impl Split {
    fn validate(&self) -> Result<()> {
        check_len("train features", "train labels", self.train_x.nrows(), self.train_y.len())?;
        check_len("test features", "test labels", self.test_x.nrows(), self.test_y.len())?;
        check_len("test features", "train features", self.test_x.ncols(), self.train_x.ncols())?;

        let invalid = self
            .train_y
            .iter()
            .chain(&self.test_y)
            .find(|&&y| y != POSITIVE && y != NEGATIVE);

        match invalid {
            Some(&value) => Err(DataErr::InvalidLabel { value }),
            None => Ok(()),
        }
    }
}

fn check_len(a: &'static str, b: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(DataErr::SizeMismatch {
            a,
            b,
            got,
            expected,
        });
    }

    Ok(())
}

/// Replaces every `-1` label with `0`. Other values are left untouched.
pub fn normalize_labels(labels: &mut Array1<i64>) {
    labels.mapv_inplace(|y| if y == -1 { NEGATIVE } else { y });
}

/// A labelled binary classification dataset ready for an active learning loop.
///
/// Features are standardized with a scaler fit on the training rows only. The
/// labelled/unlabelled split of the training rows doesn't exist until
/// [`Dataset::set_start_state`] succeeds.
#[derive(Debug, Clone)]
pub struct Dataset {
    train_x: Array2<f64>,
    train_y: Array1<i64>,
    test_x: Array2<f64>,
    test_y: Array1<i64>,
    scaler: StandardScaler,

    n_start: Option<usize>,
    partition: Option<Partition>,
}

impl Dataset {
    /// Creates a new `Dataset`, standardizing both train and test features with
    /// the statistics of the train features.
    ///
    /// # Arguments
    /// * `split` - The unscaled arrays.
    ///
    /// # Returns
    /// An error if the arrays don't line up, if a label isn't 0 or 1, or if there
    /// are no training rows.
    pub fn new(split: Split) -> Result<Self> {
        split.validate()?;

        let Split {
            mut train_x,
            train_y,
            mut test_x,
            test_y,
        } = split;

        let scaler = StandardScaler::fit(train_x.view())?;
        scaler.transform_inplace(&mut train_x)?;
        scaler.transform_inplace(&mut test_x)?;

        info!(
            n_train = train_x.nrows(), n_test = test_x.nrows(), n_features = train_x.ncols();
            "dataset ready"
        );
        debug!("scaler mean={} scale={}", scaler.mean(), scaler.scale());

        Ok(Self {
            train_x,
            train_y,
            test_x,
            test_y,
            scaler,
            n_start: None,
            partition: None,
        })
    }

    /// Selects the initial labelled set, see [`Partition::start`].
    ///
    /// # Arguments
    /// * `n_start` - The number of labelled rows, in `[2, n_train]`.
    /// * `rng` - A random number generator.
    ///
    /// # Returns
    /// The new partition, or an error if the start state was already set, if
    /// `n_start` is out of range, or if the training labels lack one of the classes.
    pub fn set_start_state<R: Rng + ?Sized>(
        &mut self,
        n_start: usize,
        rng: &mut R,
    ) -> Result<&Partition> {
        if self.partition.is_some() {
            return Err(DataErr::AlreadyPartitioned);
        }

        let partition = Partition::start(self.train_y.view(), n_start, rng)?;
        debug!(
            known = partition.known().len(), unknown = partition.unknown().len();
            "start state set"
        );

        self.n_start = Some(n_start);
        Ok(&*self.partition.insert(partition))
    }

    pub fn train_x(&self) -> ArrayView2<'_, f64> {
        self.train_x.view()
    }

    pub fn train_y(&self) -> ArrayView1<'_, i64> {
        self.train_y.view()
    }

    pub fn test_x(&self) -> ArrayView2<'_, f64> {
        self.test_x.view()
    }

    pub fn test_y(&self) -> ArrayView1<'_, i64> {
        self.test_y.view()
    }

    /// The scaler fit on the training features.
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    #[inline]
    pub fn n_train(&self) -> usize {
        self.train_x.nrows()
    }

    #[inline]
    pub fn n_test(&self) -> usize {
        self.test_x.nrows()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.train_x.ncols()
    }

    /// The `n_start` the start state was set with, if it was.
    pub fn n_start(&self) -> Option<usize> {
        self.n_start
    }

    pub fn partition(&self) -> Option<&Partition> {
        self.partition.as_ref()
    }

    pub fn partition_mut(&mut self) -> Option<&mut Partition> {
        self.partition.as_mut()
    }

    /// Labelled training rows, empty before the start state is set.
    pub fn indices_known(&self) -> &[usize] {
        self.partition.as_ref().map(Partition::known).unwrap_or_default()
    }

    /// Unlabelled training rows, empty before the start state is set.
    pub fn indices_unknown(&self) -> &[usize] {
        self.partition.as_ref().map(Partition::unknown).unwrap_or_default()
    }

    /// Number of training rows per class, as `(negatives, positives)`.
    pub fn class_counts(&self) -> (usize, usize) {
        let positives = self.train_y.iter().filter(|&&y| y == POSITIVE).count();
        (self.n_train() - positives, positives)
    }
}
