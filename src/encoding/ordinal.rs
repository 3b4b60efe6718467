//! Ordinal encoding for categorical features.
//!
//! Maps each category to its index in the sorted category list learned
//! during fit (0, 1, 2, ...). Column count and names are preserved.

use crate::config::{ParamReader, StepSpec};
use crate::encoding::HandleUnknown;
use crate::error::PreprocessError;
use crate::frame::{Frame, Value};
use crate::traits::{ensure_columns_match, TransformUnit};

#[derive(Clone, Debug)]
struct FittedCategories {
    columns: Vec<String>,
    categories: Vec<Vec<Value>>,
}

/// Category-to-index encoder for categorical columns.
#[derive(Clone, Debug, Default)]
pub struct OrdinalEncoder {
    handle_unknown: HandleUnknown,
    state: Option<FittedCategories>,
}

impl OrdinalEncoder {
    /// Create an encoder that fails on unknown categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for categories unseen during fit.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }

    /// Construct from a configuration step.
    ///
    /// Accepted parameters: `handle_unknown` (one of `error`, `ignore`;
    /// default `error`; `ignore` emits a missing cell for unknowns).
    pub fn from_spec(spec: &StepSpec) -> Result<Self, PreprocessError> {
        let reader = ParamReader::new(&spec.name, &spec.params);
        reader.ensure_known(&["handle_unknown"])?;
        let strategy = match reader
            .str_choice("handle_unknown", &["error", "ignore"], "error")?
            .as_str()
        {
            "ignore" => HandleUnknown::Ignore,
            _ => HandleUnknown::Error,
        };
        Ok(Self::new().with_handle_unknown(strategy))
    }
}

impl TransformUnit for OrdinalEncoder {
    fn fit(&mut self, data: &Frame) -> Result<(), PreprocessError> {
        if data.n_rows() == 0 {
            return Err(PreprocessError::TransformValue(
                "ordinal_encoder: cannot fit on an empty frame".to_string(),
            ));
        }

        let mut columns = Vec::with_capacity(data.n_cols());
        let mut categories = Vec::with_capacity(data.n_cols());
        for (name, cells) in data.iter_columns() {
            let mut observed: Vec<Value> = Vec::new();
            for cell in cells {
                if cell.is_missing() {
                    return Err(PreprocessError::TransformValue(format!(
                        "ordinal_encoder: column \"{}\" contains missing values; \
                         impute before encoding",
                        name
                    )));
                }
                if !observed.contains(cell) {
                    observed.push(cell.clone());
                }
            }
            observed.sort_by(|a, b| a.total_cmp(b));
            columns.push(name.to_string());
            categories.push(observed);
        }
        self.state = Some(FittedCategories {
            columns,
            categories,
        });
        Ok(())
    }

    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessError> {
        let state = self.state.as_ref().ok_or(PreprocessError::NotFitted)?;
        ensure_columns_match("ordinal_encoder", &state.columns, data)?;

        let mut columns = Vec::with_capacity(state.columns.len());
        for (index, (name, categories)) in
            state.columns.iter().zip(&state.categories).enumerate()
        {
            let mut cells = Vec::with_capacity(data.n_rows());
            for cell in data.column_at(index) {
                if cell.is_missing() {
                    return Err(PreprocessError::TransformValue(format!(
                        "ordinal_encoder: column \"{}\" contains missing values; \
                         impute before encoding",
                        name
                    )));
                }
                match categories.iter().position(|c| c == cell) {
                    Some(ordinal) => cells.push(Value::Num(ordinal as f64)),
                    None => match self.handle_unknown {
                        HandleUnknown::Error => {
                            return Err(PreprocessError::TransformValue(format!(
                                "ordinal_encoder: unknown category \"{}\" in column \"{}\"",
                                cell, name
                            )))
                        }
                        HandleUnknown::Ignore => cells.push(Value::Missing),
                    },
                }
            }
            columns.push((name.clone(), cells));
        }
        Ok(Frame::from_columns(columns))
    }

    fn step_name(&self) -> &'static str {
        "ordinal_encoder"
    }

    fn output_names(&self, input_names: &[String]) -> Option<Vec<String>> {
        Some(input_names.to_vec())
    }

    fn clone_unfitted(&self) -> Box<dyn TransformUnit> {
        Box::new(Self::new().with_handle_unknown(self.handle_unknown))
    }
}
