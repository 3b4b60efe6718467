//! Standard scaler (z-score normalization).
//!
//! Transforms features by removing the mean and scaling to unit variance:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean and `s` the population standard deviation of the
//! training column. A zero-variance column is scaled by 1.0 instead of
//! dividing by zero, so constant columns pass through centered.

use crate::config::{ParamReader, StepSpec};
use crate::error::PreprocessError;
use crate::frame::{Frame, Value};
use crate::scaling::numeric_cells;
use crate::traits::{ensure_columns_match, TransformUnit};

/// Learned per-column statistics.
#[derive(Clone, Debug)]
struct FittedStats {
    columns: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Z-score scaling transformer.
#[derive(Clone, Debug)]
pub struct StandardScaler {
    with_mean: bool,
    with_std: bool,
    state: Option<FittedStats>,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    /// Create a scaler that centers and scales.
    pub fn new() -> Self {
        Self {
            with_mean: true,
            with_std: true,
            state: None,
        }
    }

    /// Set whether to center data by the column mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.with_std = with_std;
        self
    }

    /// Construct from a configuration step.
    ///
    /// Accepted parameters: `with_mean` and `with_std` (bools, both
    /// defaulting to true).
    pub fn from_spec(spec: &StepSpec) -> Result<Self, PreprocessError> {
        let reader = ParamReader::new(&spec.name, &spec.params);
        reader.ensure_known(&["with_mean", "with_std"])?;
        Ok(Self::new()
            .with_mean(reader.bool_or("with_mean", true)?)
            .with_std(reader.bool_or("with_std", true)?))
    }
}

impl TransformUnit for StandardScaler {
    fn fit(&mut self, data: &Frame) -> Result<(), PreprocessError> {
        if data.n_rows() == 0 {
            return Err(PreprocessError::TransformValue(
                "standard_scaler: cannot fit on an empty frame".to_string(),
            ));
        }

        let mut columns = Vec::with_capacity(data.n_cols());
        let mut mean = Vec::with_capacity(data.n_cols());
        let mut scale = Vec::with_capacity(data.n_cols());
        for (name, cells) in data.iter_columns() {
            let values = numeric_cells("standard_scaler", name, cells)?;
            let n = values.len() as f64;
            let m = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / n;
            let std = variance.sqrt();
            columns.push(name.to_string());
            mean.push(m);
            scale.push(if std == 0.0 { 1.0 } else { std });
        }
        self.state = Some(FittedStats {
            columns,
            mean,
            scale,
        });
        Ok(())
    }

    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessError> {
        let state = self.state.as_ref().ok_or(PreprocessError::NotFitted)?;
        ensure_columns_match("standard_scaler", &state.columns, data)?;

        let mut columns = Vec::with_capacity(state.columns.len());
        for (index, name) in state.columns.iter().enumerate() {
            let values = numeric_cells("standard_scaler", name, data.column_at(index))?;
            let offset = if self.with_mean { state.mean[index] } else { 0.0 };
            let divisor = if self.with_std { state.scale[index] } else { 1.0 };
            let cells = values
                .into_iter()
                .map(|v| Value::Num((v - offset) / divisor))
                .collect();
            columns.push((name.clone(), cells));
        }
        Ok(Frame::from_columns(columns))
    }

    fn step_name(&self) -> &'static str {
        "standard_scaler"
    }

    fn output_names(&self, input_names: &[String]) -> Option<Vec<String>> {
        Some(input_names.to_vec())
    }

    fn clone_unfitted(&self) -> Box<dyn TransformUnit> {
        Box::new(
            Self::new()
                .with_mean(self.with_mean)
                .with_std(self.with_std),
        )
    }
}
