//! Numeric feature scaling transformers.

mod minmax;
mod standard;

pub use minmax::MinMaxScaler;
pub use standard::StandardScaler;

use crate::error::PreprocessError;
use crate::frame::Value;

/// Numeric cells of a column, for scaler fit and transform.
///
/// Scalers operate on complete numeric data: a missing cell means an
/// imputation step is absent or misplaced, and a string cell cannot be
/// scaled at all.
pub(crate) fn numeric_cells(
    step: &str,
    column: &str,
    cells: &[Value],
) -> Result<Vec<f64>, PreprocessError> {
    let mut values = Vec::with_capacity(cells.len());
    for cell in cells {
        match cell {
            Value::Num(v) => values.push(*v),
            Value::Missing => {
                return Err(PreprocessError::TransformValue(format!(
                    "{}: column \"{}\" contains missing values; impute before scaling",
                    step, column
                )))
            }
            Value::Str(s) => {
                return Err(PreprocessError::TransformValue(format!(
                    "{}: column \"{}\": expected a numeric value, got \"{}\"",
                    step, column, s
                )))
            }
        }
    }
    Ok(values)
}
