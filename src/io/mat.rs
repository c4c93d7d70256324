use std::{fs::File, io::BufReader, path::Path};

use log::debug;
use matfile::{MatFile, NumericData};

use super::RawArray;
use crate::{DataErr, Result};

/// Reads the real part of the variable `key` from a MATLAB v5 `.mat` file.
///
/// Every numeric class is widened to `f64`, logical arrays included since they are
/// stored as `uint8`. MATLAB stores arrays column-major, which the returned
/// `RawArray` records.
pub fn load_mat_array(path: impl AsRef<Path>, key: &'static str) -> Result<RawArray> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DataErr::io(path, e))?;
    let mat = MatFile::parse(BufReader::new(file)).map_err(|e| DataErr::Mat {
        path: path.to_path_buf(),
        msg: format!("{e:?}"),
    })?;

    let array = mat.find_by_name(key).ok_or_else(|| DataErr::MissingArray {
        path: path.to_path_buf(),
        key,
    })?;
    let shape = array.size().to_vec();
    debug!("{}: '{key}' {shape:?}", path.display());

    let data = match array.data() {
        NumericData::Double { real, .. } => real.clone(),
        NumericData::Single { real, .. } => widen(real, f64::from),
        NumericData::Int8 { real, .. } => widen(real, f64::from),
        NumericData::UInt8 { real, .. } => widen(real, f64::from),
        NumericData::Int16 { real, .. } => widen(real, f64::from),
        NumericData::UInt16 { real, .. } => widen(real, f64::from),
        NumericData::Int32 { real, .. } => widen(real, f64::from),
        NumericData::UInt32 { real, .. } => widen(real, f64::from),
        NumericData::Int64 { real, .. } => widen(real, |v| v as f64),
        NumericData::UInt64 { real, .. } => widen(real, |v| v as f64),
    };

    Ok(RawArray::new(shape, data, true))
}

fn widen<T: Copy>(values: &[T], f: impl Fn(T) -> f64) -> Vec<f64> {
    values.iter().copied().map(f).collect()
}
