#![allow(dead_code)]

use std::{fs, path::Path};

use ndarray::Array2;
use npyz::{Order, WriterBuilder, npz::NpzWriter};

const MI_INT8: u32 = 1;
const MI_UINT8: u32 = 2;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_DOUBLE: u32 = 9;
const MI_MATRIX: u32 = 14;
const MX_DOUBLE_CLASS: u32 = 6;
const MX_UINT8_CLASS: u32 = 9;
const MX_LOGICAL_FLAG: u32 = 0x0200;

/// Writes an `.npz` archive with a float `x` matrix and an int64 `y` vector.
pub fn write_npz(path: &Path, x: &Array2<f64>, y: &[i64]) {
    write_npz_with_order(path, x, y, Order::C);
}

pub fn write_npz_with_order(path: &Path, x: &Array2<f64>, y: &[i64], order: Order) {
    let mut npz = NpzWriter::create(path).unwrap();

    let data: Vec<f64> = match order {
        Order::C => x.iter().copied().collect(),
        Order::Fortran => x.t().iter().copied().collect(),
    };
    let mut writer = npz
        .array::<f64>("x", Default::default())
        .unwrap()
        .default_dtype()
        .order(order)
        .shape(&[x.nrows() as u64, x.ncols() as u64])
        .begin_nd()
        .unwrap();
    writer.extend(data).unwrap();
    writer.finish().unwrap();

    let mut writer = npz
        .array::<i64>("y", Default::default())
        .unwrap()
        .default_dtype()
        .shape(&[y.len() as u64])
        .begin_nd()
        .unwrap();
    writer.extend(y.iter().copied()).unwrap();
    writer.finish().unwrap();
}

/// Writes an `.npz` archive holding only `x`.
pub fn write_npz_without_labels(path: &Path, x: &Array2<f64>) {
    let mut npz = NpzWriter::create(path).unwrap();
    let mut writer = npz
        .array::<f64>("x", Default::default())
        .unwrap()
        .default_dtype()
        .shape(&[x.nrows() as u64, x.ncols() as u64])
        .begin_nd()
        .unwrap();
    writer.extend(x.iter().copied()).unwrap();
    writer.finish().unwrap();
}

/// Writes an uncompressed level 5 MAT-file holding a single real double matrix.
pub fn write_mat(path: &Path, name: &str, x: &Array2<f64>) {
    // column-major
    let real: Vec<u8> = x.t().iter().flat_map(|v| v.to_le_bytes()).collect();
    let matrix = MatMatrix {
        name,
        class: MX_DOUBLE_CLASS,
        logical: false,
        dims: (x.nrows(), x.ncols()),
        data_type: MI_DOUBLE,
        real: &real,
    };
    write_mat_matrix(path, &matrix);
}

/// Writes a column vector of labels as a MAT-file.
pub fn write_mat_labels(path: &Path, labels: &[i64]) {
    let column = Array2::from_shape_fn((labels.len(), 1), |(i, _)| labels[i] as f64);
    write_mat(path, "labels", &column);
}

/// Writes a `uint8` column vector of labels, flagged as logical if asked, the way
/// `scipy.io.savemat` stores `uint8` and `bool` arrays.
pub fn write_mat_u8_labels(path: &Path, labels: &[u8], logical: bool) {
    let matrix = MatMatrix {
        name: "labels",
        class: MX_UINT8_CLASS,
        logical,
        dims: (labels.len(), 1),
        data_type: MI_UINT8,
        real: labels,
    };
    write_mat_matrix(path, &matrix);
}

struct MatMatrix<'a> {
    name: &'a str,
    class: u32,
    logical: bool,
    dims: (usize, usize),
    data_type: u32,
    real: &'a [u8],
}

fn write_mat_matrix(path: &Path, matrix: &MatMatrix) {
    let mut header = b"MATLAB 5.0 MAT-file, Platform: GLNXA64, Created by: tests".to_vec();
    header.resize(116, b' ');

    let mut out = header;
    out.extend([0u8; 8]);
    out.extend(0x0100u16.to_le_bytes());
    out.extend(b"IM");

    let class = matrix.class | if matrix.logical { MX_LOGICAL_FLAG } else { 0 };
    let flags: Vec<u8> = [class, 0].iter().flat_map(|v| v.to_le_bytes()).collect();
    let (rows, cols) = matrix.dims;
    let dims: Vec<u8> = [rows as i32, cols as i32]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();

    let mut body = Vec::new();
    push_element(&mut body, MI_UINT32, &flags);
    push_element(&mut body, MI_INT32, &dims);
    push_element(&mut body, MI_INT8, matrix.name.as_bytes());
    push_element(&mut body, matrix.data_type, matrix.real);

    push_element(&mut out, MI_MATRIX, &body);
    fs::write(path, out).unwrap();
}

fn push_element(out: &mut Vec<u8>, ty: u32, data: &[u8]) {
    out.extend(ty.to_le_bytes());
    out.extend((data.len() as u32).to_le_bytes());
    out.extend(data);

    let pad = (8 - data.len() % 8) % 8;
    out.extend(std::iter::repeat_n(0u8, pad));
}
