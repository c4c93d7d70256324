use std::path::Path;

use log::info;
use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    dataset::{Dataset, Split, normalize_labels},
    io::{NpzReader, load_mat_array},
    synthetic,
};

/// Where `DatasetSource::load` looks for the data files unless told otherwise.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// The datasets this crate knows how to prepare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSource {
    /// XOR-like 2x2 checkerboard.
    Checkerboard2x2,
    /// 4x4 checkerboard.
    Checkerboard4x4,
    /// 2x2 checkerboard rotated by 45 degrees.
    RotatedCheckerboard2x2,
    /// Mini version of the CVLab Striatum EM segmentation features.
    StriatumMini,
    /// Two generated Gaussian clouds with a random class balance.
    SimulatedUnbalanced { size_train: usize, n_dim: usize },
}

impl DatasetSource {
    /// Loads or generates the dataset.
    ///
    /// # Arguments
    /// * `data_dir` - The directory holding the data files.
    /// * `rng` - A random number generator, only used by generated datasets.
    pub fn load<R: Rng + ?Sized>(self, data_dir: &Path, rng: &mut R) -> Result<Dataset> {
        info!("preparing {self:?}");

        match self {
            Self::Checkerboard2x2 => checkerboard_2x2(data_dir),
            Self::Checkerboard4x4 => checkerboard_4x4(data_dir),
            Self::RotatedCheckerboard2x2 => rotated_checkerboard_2x2(data_dir),
            Self::StriatumMini => striatum_mini(data_dir),
            Self::SimulatedUnbalanced { size_train, n_dim } => {
                simulated_unbalanced(size_train, n_dim, rng)
            }
        }
    }
}

pub fn checkerboard_2x2(data_dir: &Path) -> Result<Dataset> {
    npz_dataset(data_dir, "checkerboard2x2")
}

pub fn checkerboard_4x4(data_dir: &Path) -> Result<Dataset> {
    npz_dataset(data_dir, "checkerboard4x4")
}

pub fn rotated_checkerboard_2x2(data_dir: &Path) -> Result<Dataset> {
    npz_dataset(data_dir, "rotated_checkerboard2x2")
}

/// Loads the Striatum mini dataset, where negatives are labelled `-1`.
pub fn striatum_mini(data_dir: &Path) -> Result<Dataset> {
    let (train_x, train_y) = mat_pair(data_dir, "train")?;
    let (test_x, test_y) = mat_pair(data_dir, "test")?;

    Dataset::new(Split {
        train_x,
        train_y,
        test_x,
        test_y,
    })
}

/// Generates two Gaussian clouds, see [`synthetic::unbalanced_clouds`].
///
/// The clouds are standardized like every loaded dataset, so the drawn means and
/// covariances describe the data before scaling, not the returned features. Use
/// [`synthetic::unbalanced_clouds`] directly for the raw samples.
pub fn simulated_unbalanced<R: Rng + ?Sized>(
    size_train: usize,
    n_dim: usize,
    rng: &mut R,
) -> Result<Dataset> {
    let (split, _) = synthetic::unbalanced_clouds(size_train, n_dim, rng)?;
    Dataset::new(split)
}

/// Reads `{stem}_train.npz` and `{stem}_test.npz`, each holding `x` and `y`.
fn npz_dataset(data_dir: &Path, stem: &str) -> Result<Dataset> {
    let (train_x, train_y) = npz_pair(&data_dir.join(format!("{stem}_train.npz")))?;
    let (test_x, test_y) = npz_pair(&data_dir.join(format!("{stem}_test.npz")))?;

    Dataset::new(Split {
        train_x,
        train_y,
        test_x,
        test_y,
    })
}

fn npz_pair(path: &Path) -> Result<(Array2<f64>, Array1<i64>)> {
    let mut npz = NpzReader::open(path)?;
    let x = npz.array("x")?.into_features("x")?;
    let mut y = npz.array("y")?.into_labels("y")?;
    normalize_labels(&mut y);

    Ok((x, y))
}

fn mat_pair(data_dir: &Path, part: &str) -> Result<(Array2<f64>, Array1<i64>)> {
    let features = data_dir.join(format!("striatum_{part}_features_mini.mat"));
    let labels = data_dir.join(format!("striatum_{part}_labels_mini.mat"));

    let x = load_mat_array(features, "features")?.into_features("features")?;
    let mut y = load_mat_array(labels, "labels")?.into_labels("labels")?;
    normalize_labels(&mut y);

    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataErr;
    use ndarray::Axis;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn source_names() {
        let parse = |s: &str| serde_json::from_str::<DatasetSource>(s).unwrap();

        assert_eq!(parse(r#""checkerboard2x2""#), DatasetSource::Checkerboard2x2);
        assert_eq!(parse(r#""checkerboard4x4""#), DatasetSource::Checkerboard4x4);
        assert_eq!(
            parse(r#""rotated_checkerboard2x2""#),
            DatasetSource::RotatedCheckerboard2x2
        );
        assert_eq!(parse(r#""striatum_mini""#), DatasetSource::StriatumMini);
        assert_eq!(
            parse(r#"{"simulated_unbalanced": {"size_train": 50, "n_dim": 2}}"#),
            DatasetSource::SimulatedUnbalanced {
                size_train: 50,
                n_dim: 2
            }
        );
    }

    #[test]
    fn missing_files() {
        let dir = Path::new("./definitely/not/here");
        let mut rng = StdRng::seed_from_u64(42);

        for source in [
            DatasetSource::Checkerboard2x2,
            DatasetSource::Checkerboard4x4,
            DatasetSource::RotatedCheckerboard2x2,
            DatasetSource::StriatumMini,
        ] {
            let err = source.load(dir, &mut rng).unwrap_err();
            assert!(matches!(err, DataErr::Io { .. }), "{source:?}: {err}");
        }
    }

    #[test]
    fn simulated() {
        let mut rng = StdRng::seed_from_u64(42);
        let dataset = DatasetSource::SimulatedUnbalanced {
            size_train: 120,
            n_dim: 5,
        }
        .load(Path::new(DEFAULT_DATA_DIR), &mut rng)
        .unwrap();

        assert_eq!(dataset.n_train(), 120);
        assert_eq!(dataset.n_test(), 1200);
        assert_eq!(dataset.n_features(), 5);

        let (negatives, positives) = dataset.class_counts();
        assert!(negatives > 0 && positives > 0);

        let mean = dataset.train_x().mean_axis(Axis(0)).unwrap();
        let var = dataset.train_x().var_axis(Axis(0), 0.);
        assert!(mean.iter().all(|m| m.abs() < 1e-9));
        assert!(var.iter().all(|v| (v - 1.).abs() < 1e-9));
    }
}
