use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, DataErr>;

/// Every failure that can happen while loading, scaling or partitioning a dataset.
#[derive(Debug)]
pub enum DataErr {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    MissingArray {
        path: PathBuf,
        key: &'static str,
    },
    UnsupportedDtype {
        path: PathBuf,
        key: &'static str,
        dtype: String,
    },
    Mat {
        path: PathBuf,
        msg: String,
    },
    BadShape {
        what: &'static str,
        shape: Vec<usize>,
    },
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    NonIntegralLabel {
        value: f64,
    },
    InvalidLabel {
        value: i64,
    },
    EmptyTrainingSet,
    StartSizeOutOfRange {
        n_start: usize,
        max: usize,
    },
    MissingClass {
        label: i64,
    },
    AlreadyPartitioned,
    InvalidConfig(String),
    Json(serde_json::Error),
}

impl DataErr {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for DataErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::MissingArray { path, key } => {
                write!(f, "array '{key}' not found in {}", path.display())
            }
            Self::UnsupportedDtype { path, key, dtype } => write!(
                f,
                "array '{key}' in {} has unsupported element type {dtype}",
                path.display()
            ),
            Self::Mat { path, msg } => {
                write!(f, "malformed mat file {}: {msg}", path.display())
            }
            Self::BadShape { what, shape } => write!(f, "{what} has unexpected shape {shape:?}"),
            Self::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            Self::NonIntegralLabel { value } => write!(f, "label {value} is not an integer"),
            Self::InvalidLabel { value } => {
                write!(f, "label {value} is not a binary class (expected -1, 0 or 1)")
            }
            Self::EmptyTrainingSet => write!(f, "the training set has no rows"),
            Self::StartSizeOutOfRange { n_start, max } => write!(
                f,
                "n_start must be in [2, {max}], got {n_start}"
            ),
            Self::MissingClass { label } => write!(
                f,
                "the training labels contain no example of class {label}"
            ),
            Self::AlreadyPartitioned => write!(f, "the start state has already been set"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Json(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

impl Error for DataErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DataErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Boundary conversion for binaries.
impl From<DataErr> for io::Error {
    fn from(value: DataErr) -> Self {
        match value {
            DataErr::Io { source, .. } => source,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
