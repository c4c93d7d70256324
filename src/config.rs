use std::path::{Path, PathBuf};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    DataErr, Result,
    dataset::Dataset,
    source::{DEFAULT_DATA_DIR, DatasetSource},
};

/// Everything needed to prepare one dataset for an experiment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    pub source: DatasetSource,
    #[serde(default = "default_n_start")]
    pub n_start: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_n_start() -> usize {
    2
}

impl PrepareConfig {
    /// Reads and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DataErr::io(path, e))?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the bounds that don't depend on the data itself.
    pub fn validate(&self) -> Result<()> {
        if self.n_start < 2 {
            return Err(DataErr::InvalidConfig(format!(
                "n_start must be at least 2, got {}",
                self.n_start
            )));
        }

        if let DatasetSource::SimulatedUnbalanced { size_train, n_dim } = self.source {
            if n_dim == 0 {
                return Err(DataErr::InvalidConfig("n_dim must be positive".into()));
            }
            if size_train < self.n_start {
                return Err(DataErr::InvalidConfig(format!(
                    "size_train ({size_train}) is smaller than n_start ({})",
                    self.n_start
                )));
            }
        }

        Ok(())
    }

    /// A seeded generator if the config has a seed, OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Loads the dataset and sets its start state with a single generator.
    pub fn prepare(&self) -> Result<Dataset> {
        let mut rng = self.rng();
        let mut dataset = self.source.load(&self.data_dir, &mut rng)?;
        dataset.set_start_state(self.n_start, &mut rng)?;
        Ok(dataset)
    }
}
