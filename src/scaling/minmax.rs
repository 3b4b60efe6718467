//! Min-max scaler.
//!
//! Transforms features by scaling each column into a target range
//! (default [0, 1]):
//! ```text
//! x_scaled = (x - x_min) / (x_max - x_min) * (hi - lo) + lo
//! ```
//! A constant column maps to the lower bound of the range.

use crate::config::{ParamReader, StepSpec};
use crate::error::PreprocessError;
use crate::frame::{Frame, Value};
use crate::scaling::numeric_cells;
use crate::traits::{ensure_columns_match, TransformUnit};

#[derive(Clone, Debug)]
struct FittedRange {
    columns: Vec<String>,
    min: Vec<f64>,
    max: Vec<f64>,
}

/// Range scaling transformer.
#[derive(Clone, Debug)]
pub struct MinMaxScaler {
    lo: f64,
    hi: f64,
    state: Option<FittedRange>,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    /// Create a scaler with the default [0, 1] target range.
    pub fn new() -> Self {
        Self {
            lo: 0.0,
            hi: 1.0,
            state: None,
        }
    }

    /// Set the target range.
    ///
    /// # Panics
    /// Panics if `hi` is not greater than `lo`.
    pub fn with_range(mut self, lo: f64, hi: f64) -> Self {
        assert!(hi > lo, "range max must be greater than range min");
        self.lo = lo;
        self.hi = hi;
        self
    }

    /// Construct from a configuration step.
    ///
    /// Accepted parameters: `feature_range` (list of two numbers, default
    /// `[0, 1]`, lower bound strictly below the upper).
    pub fn from_spec(spec: &StepSpec) -> Result<Self, PreprocessError> {
        let reader = ParamReader::new(&spec.name, &spec.params);
        reader.ensure_known(&["feature_range"])?;
        let (lo, hi) = reader.number_pair_or("feature_range", (0.0, 1.0))?;
        if hi <= lo {
            return Err(PreprocessError::InvalidStepParameters {
                step: spec.name.clone(),
                reason: format!(
                    "parameter \"feature_range\" needs min < max, got [{}, {}]",
                    lo, hi
                ),
            });
        }
        let mut scaler = Self::new();
        scaler.lo = lo;
        scaler.hi = hi;
        Ok(scaler)
    }
}

impl TransformUnit for MinMaxScaler {
    fn fit(&mut self, data: &Frame) -> Result<(), PreprocessError> {
        if data.n_rows() == 0 {
            return Err(PreprocessError::TransformValue(
                "min_max_scaler: cannot fit on an empty frame".to_string(),
            ));
        }

        let mut columns = Vec::with_capacity(data.n_cols());
        let mut min = Vec::with_capacity(data.n_cols());
        let mut max = Vec::with_capacity(data.n_cols());
        for (name, cells) in data.iter_columns() {
            let values = numeric_cells("min_max_scaler", name, cells)?;
            let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            columns.push(name.to_string());
            min.push(lo);
            max.push(hi);
        }
        self.state = Some(FittedRange { columns, min, max });
        Ok(())
    }

    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessError> {
        let state = self.state.as_ref().ok_or(PreprocessError::NotFitted)?;
        ensure_columns_match("min_max_scaler", &state.columns, data)?;

        let width = self.hi - self.lo;
        let mut columns = Vec::with_capacity(state.columns.len());
        for (index, name) in state.columns.iter().enumerate() {
            let values = numeric_cells("min_max_scaler", name, data.column_at(index))?;
            let (col_min, col_max) = (state.min[index], state.max[index]);
            let cells = values
                .into_iter()
                .map(|v| {
                    let scaled = if col_max > col_min {
                        self.lo + (v - col_min) * width / (col_max - col_min)
                    } else {
                        self.lo
                    };
                    Value::Num(scaled)
                })
                .collect();
            columns.push((name.clone(), cells));
        }
        Ok(Frame::from_columns(columns))
    }

    fn step_name(&self) -> &'static str {
        "min_max_scaler"
    }

    fn output_names(&self, input_names: &[String]) -> Option<Vec<String>> {
        Some(input_names.to_vec())
    }

    fn clone_unfitted(&self) -> Box<dyn TransformUnit> {
        let mut fresh = Self::new();
        fresh.lo = self.lo;
        fresh.hi = self.hi;
        Box::new(fresh)
    }
}
