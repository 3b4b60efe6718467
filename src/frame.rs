//! Column-oriented data container for preprocessing.
//!
//! A [`Frame`] is an ordered collection of named, equal-length columns of
//! [`Value`] cells. It is the interchange type between transformation units:
//! every unit consumes a frame slice and produces a new frame with the same
//! row count. Missing data is modeled explicitly with [`Value::Missing`]
//! rather than NaN, so numeric and string columns share one representation.
//!
//! # Example
//! ```
//! use tabprep::frame::{Frame, Value};
//!
//! let frame = Frame::from_columns(vec![
//!     ("age", vec![Value::from(25.0), Value::Missing, Value::from(40.0)]),
//!     ("city", vec![Value::from("paris"), Value::from("rome"), Value::from("paris")]),
//! ]);
//! assert_eq!(frame.n_rows(), 3);
//! assert_eq!(frame.n_cols(), 2);
//! ```

use crate::error::PreprocessError;
use ndarray::Array2;
use std::cmp::Ordering;
use std::fmt;

/// One cell of tabular data.
///
/// `Num` never holds NaN: converting an `f64` through `Value::from`
/// normalizes NaN to `Missing`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A numeric cell.
    Num(f64),
    /// A string (categorical) cell.
    Str(String),
    /// A missing cell.
    Missing,
}

impl Value {
    /// Whether this cell is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric content, if any.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(v) => Some(*v),
            _ => None,
        }
    }

    /// String content, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Total ordering over cells: `Missing` < `Num` < `Str`, numbers by
    /// numeric order, strings lexicographically.
    ///
    /// Used to sort learned categories and to break frequency ties
    /// deterministically.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Missing, Value::Missing) => Ordering::Equal,
            (Value::Missing, _) => Ordering::Less,
            (_, Value::Missing) => Ordering::Greater,
            (Value::Num(a), Value::Num(b)) => a.total_cmp(b),
            (Value::Num(_), Value::Str(_)) => Ordering::Less,
            (Value::Str(_), Value::Num(_)) => Ordering::Greater,
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            Value::Missing
        } else {
            Value::Num(v)
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl fmt::Display for Value {
    /// Renders the cell as a category label: whole numbers without a
    /// fractional part, strings verbatim, missing as `<missing>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(v) => {
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{}", v)
                }
            }
            Value::Str(s) => write!(f, "{}", s),
            Value::Missing => write!(f, "<missing>"),
        }
    }
}

/// An ordered collection of named, equal-length columns.
///
/// Column names are positional labels; duplicates are permitted (they arise
/// when column overlap between feature groups is explicitly allowed), and
/// name lookup returns the first match. Output column positions, not names,
/// are the stable contract.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Vec<Value>>,
    n_rows: usize,
}

impl Frame {
    /// Create an empty frame with zero rows and zero columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from `(name, cells)` pairs.
    ///
    /// # Panics
    /// Panics if the columns have differing lengths.
    pub fn from_columns<N: Into<String>>(columns: Vec<(N, Vec<Value>)>) -> Self {
        let mut names = Vec::with_capacity(columns.len());
        let mut cols = Vec::with_capacity(columns.len());
        let mut n_rows = None;
        for (name, cells) in columns {
            let name = name.into();
            match n_rows {
                None => n_rows = Some(cells.len()),
                Some(n) => assert_eq!(
                    n,
                    cells.len(),
                    "column \"{}\" has {} rows, expected {}",
                    name,
                    cells.len(),
                    n
                ),
            }
            names.push(name);
            cols.push(cells);
        }
        Self {
            names,
            columns: cols,
            n_rows: n_rows.unwrap_or(0),
        }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Ordered column names.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Cells of the first column with the given name, if present.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Cells of the column at the given position.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn column_at(&self, index: usize) -> &[Value] {
        &self.columns[index]
    }

    /// Whether a column with the given name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Iterate over `(name, cells)` pairs in column order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Horizontally concatenate frames, preserving argument order.
    ///
    /// # Panics
    /// Panics if the frames have differing row counts.
    pub fn hcat(frames: &[Frame]) -> Frame {
        let n_rows = frames.first().map(|f| f.n_rows).unwrap_or(0);
        let mut names = Vec::new();
        let mut columns = Vec::new();
        for frame in frames {
            assert_eq!(
                frame.n_rows, n_rows,
                "cannot concatenate frames with differing row counts"
            );
            names.extend(frame.names.iter().cloned());
            columns.extend(frame.columns.iter().cloned());
        }
        Frame {
            names,
            columns,
            n_rows,
        }
    }

    /// Convert the frame to a dense row-major `f64` matrix.
    ///
    /// `Missing` cells map to NaN. A string cell fails with
    /// [`PreprocessError::TransformValue`] naming the column, since it has
    /// no numeric representation.
    pub fn to_matrix(&self) -> Result<Array2<f64>, PreprocessError> {
        let mut matrix = Array2::zeros((self.n_rows, self.n_cols()));
        for (j, (name, cells)) in self.iter_columns().enumerate() {
            for (i, cell) in cells.iter().enumerate() {
                matrix[[i, j]] = match cell {
                    Value::Num(v) => *v,
                    Value::Missing => f64::NAN,
                    Value::Str(s) => {
                        return Err(PreprocessError::TransformValue(format!(
                            "column \"{}\": string value \"{}\" has no numeric representation",
                            name, s
                        )))
                    }
                };
            }
        }
        Ok(matrix)
    }
}
