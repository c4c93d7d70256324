//! Dataset preparation for active learning experiments.
//!
//! Each dataset is loaded (or generated), standardized with statistics from its
//! training rows, and then split into a small labelled seed set and the
//! unlabelled rest with [`Dataset::set_start_state`].

pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod partition;
pub mod scaling;
pub mod source;
pub mod synthetic;

pub use config::PrepareConfig;
pub use dataset::{Dataset, Split};
pub use error::{DataErr, Result};
pub use partition::Partition;
pub use scaling::StandardScaler;
pub use source::DatasetSource;
