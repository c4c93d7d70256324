use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use log::debug;
use npyz::{DType, NpyFile, Order, TypeChar, npz::NpzArchive};

use super::RawArray;
use crate::{DataErr, Result};

/// Reads named arrays out of a NumPy `.npz` archive.
pub struct NpzReader {
    path: PathBuf,
    archive: NpzArchive<BufReader<File>>,
}

impl NpzReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let archive = NpzArchive::open(&path).map_err(|e| DataErr::io(&path, e))?;
        Ok(Self { path, archive })
    }

    /// Reads the array stored under `key`, converting any numeric element type to `f64`.
    pub fn array(&mut self, key: &'static str) -> Result<RawArray> {
        let npy = self
            .archive
            .by_name(key)
            .map_err(|e| DataErr::io(&self.path, e))?
            .ok_or_else(|| DataErr::MissingArray {
                path: self.path.clone(),
                key,
            })?;

        let shape: Vec<usize> = npy.shape().iter().map(|&d| d as usize).collect();
        let column_major = npy.order() == Order::Fortran;
        let dtype = npy.dtype();
        debug!("{}: '{key}' {} {shape:?}", self.path.display(), dtype.descr());

        let data = match read_f64(npy, &dtype) {
            Some(data) => data.map_err(|e| DataErr::io(&self.path, e))?,
            None => {
                return Err(DataErr::UnsupportedDtype {
                    path: self.path.clone(),
                    key,
                    dtype: dtype.descr(),
                });
            }
        };

        Ok(RawArray::new(shape, data, column_major))
    }
}

fn widen<T, R, F>(npy: NpyFile<R>, f: F) -> io::Result<Vec<f64>>
where
    T: npyz::Deserialize,
    R: io::Read,
    F: Fn(T) -> f64,
{
    Ok(npy.into_vec::<T>()?.into_iter().map(f).collect())
}

/// Returns `None` if the element type can't be represented as `f64`.
fn read_f64<R: io::Read>(npy: NpyFile<R>, dtype: &DType) -> Option<io::Result<Vec<f64>>> {
    let DType::Plain(ty) = dtype else {
        return None;
    };

    let data = match (ty.type_char(), ty.size_field()) {
        (TypeChar::Float, 8) => npy.into_vec::<f64>(),
        (TypeChar::Float, 4) => widen(npy, |v: f32| f64::from(v)),
        (TypeChar::Int, 8) => widen(npy, |v: i64| v as f64),
        (TypeChar::Int, 4) => widen(npy, |v: i32| f64::from(v)),
        (TypeChar::Int, 2) => widen(npy, |v: i16| f64::from(v)),
        (TypeChar::Int, 1) => widen(npy, |v: i8| f64::from(v)),
        (TypeChar::Uint, 8) => widen(npy, |v: u64| v as f64),
        (TypeChar::Uint, 4) => widen(npy, |v: u32| f64::from(v)),
        (TypeChar::Uint, 2) => widen(npy, |v: u16| f64::from(v)),
        (TypeChar::Uint, 1) => widen(npy, |v: u8| f64::from(v)),
        (TypeChar::Bool, 1) => widen(npy, |v: bool| if v { 1. } else { 0. }),
        _ => return None,
    };

    Some(data)
}
