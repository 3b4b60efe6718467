//! One-hot encoding for categorical features.
//!
//! Each input column expands into one indicator column per category
//! observed during fit, named `{column}_{category}`, in column order then
//! sorted category order.
//!
//! # Example
//! ```
//! use tabprep::encoding::OneHotEncoder;
//! use tabprep::frame::{Frame, Value};
//! use tabprep::traits::TransformUnit;
//!
//! let frame = Frame::from_columns(vec![(
//!     "city",
//!     vec![Value::from("rome"), Value::from("paris"), Value::from("rome")],
//! )]);
//! let mut encoder = OneHotEncoder::new();
//! let encoded = encoder.fit_transform(&frame).unwrap();
//! assert_eq!(
//!     encoded.column_names(),
//!     &["city_paris".to_string(), "city_rome".to_string()]
//! );
//! ```

use crate::config::{ParamReader, StepSpec};
use crate::encoding::HandleUnknown;
use crate::error::PreprocessError;
use crate::frame::{Frame, Value};
use crate::traits::{ensure_columns_match, TransformUnit};

/// Categories learned per column.
#[derive(Clone, Debug)]
struct FittedCategories {
    columns: Vec<String>,
    categories: Vec<Vec<Value>>,
}

/// Indicator-expansion encoder for categorical columns.
///
/// Missing cells are rejected at fit and transform time: imputation belongs
/// before encoding, and an implicit missing-indicator category would
/// silently change the output width.
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    handle_unknown: HandleUnknown,
    state: Option<FittedCategories>,
}

impl OneHotEncoder {
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
    /// default `error`).
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

    /// Categories learned for each column, once fitted.
    pub fn categories(&self) -> Option<&[Vec<Value>]> {
        self.state.as_ref().map(|s| s.categories.as_slice())
    }
}

/// Distinct non-missing cells of a column, sorted.
fn learn_categories(column: &str, cells: &[Value]) -> Result<Vec<Value>, PreprocessError> {
    let mut categories: Vec<Value> = Vec::new();
    for cell in cells {
        if cell.is_missing() {
            return Err(PreprocessError::TransformValue(format!(
                "one_hot_encoder: column \"{}\" contains missing values; impute before encoding",
                column
            )));
        }
        if !categories.contains(cell) {
            categories.push(cell.clone());
        }
    }
    categories.sort_by(|a, b| a.total_cmp(b));
    Ok(categories)
}

impl TransformUnit for OneHotEncoder {
    fn fit(&mut self, data: &Frame) -> Result<(), PreprocessError> {
        if data.n_rows() == 0 {
            return Err(PreprocessError::TransformValue(
                "one_hot_encoder: cannot fit on an empty frame".to_string(),
            ));
        }

        let mut columns = Vec::with_capacity(data.n_cols());
        let mut categories = Vec::with_capacity(data.n_cols());
        for (name, cells) in data.iter_columns() {
            categories.push(learn_categories(name, cells)?);
            columns.push(name.to_string());
        }
        self.state = Some(FittedCategories {
            columns,
            categories,
        });
        Ok(())
    }

    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessError> {
        let state = self.state.as_ref().ok_or(PreprocessError::NotFitted)?;
        ensure_columns_match("one_hot_encoder", &state.columns, data)?;

        let n_rows = data.n_rows();
        let mut output: Vec<(String, Vec<Value>)> = Vec::new();
        for (index, (name, categories)) in
            state.columns.iter().zip(&state.categories).enumerate()
        {
            let mut indicators = vec![vec![Value::Num(0.0); n_rows]; categories.len()];
            for (row, cell) in data.column_at(index).iter().enumerate() {
                if cell.is_missing() {
                    return Err(PreprocessError::TransformValue(format!(
                        "one_hot_encoder: column \"{}\" contains missing values; \
                         impute before encoding",
                        name
                    )));
                }
                match categories.iter().position(|c| c == cell) {
                    Some(slot) => indicators[slot][row] = Value::Num(1.0),
                    None => {
                        if self.handle_unknown == HandleUnknown::Error {
                            return Err(PreprocessError::TransformValue(format!(
                                "one_hot_encoder: unknown category \"{}\" in column \"{}\"",
                                cell, name
                            )));
                        }
                        // Ignore: the row keeps all-zero indicators
                    }
                }
            }
            for (category, cells) in categories.iter().zip(indicators) {
                output.push((format!("{}_{}", name, category), cells));
            }
        }
        Ok(Frame::from_columns(output))
    }

    fn step_name(&self) -> &'static str {
        "one_hot_encoder"
    }

    fn output_names(&self, _input_names: &[String]) -> Option<Vec<String>> {
        let state = self.state.as_ref()?;
        Some(
            state
                .columns
                .iter()
                .zip(&state.categories)
                .flat_map(|(name, categories)| {
                    categories
                        .iter()
                        .map(move |category| format!("{}_{}", name, category))
                })
                .collect(),
        )
    }

    fn clone_unfitted(&self) -> Box<dyn TransformUnit> {
        Box::new(Self::new().with_handle_unknown(self.handle_unknown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city_frame() -> Frame {
        Frame::from_columns(vec![(
            "city",
            vec![
                Value::from("rome"),
                Value::from("paris"),
                Value::from("rome"),
            ],
        )])
    }

    #[test]
    fn test_one_hot_expansion() {
        let mut encoder = OneHotEncoder::new();
        let encoded = encoder.fit_transform(&city_frame()).unwrap();

        assert_eq!(
            encoded.column_names(),
            &["city_paris".to_string(), "city_rome".to_string()]
        );
        assert_eq!(encoded.column("city_rome").unwrap()[0], Value::Num(1.0));
        assert_eq!(encoded.column("city_paris").unwrap()[0], Value::Num(0.0));
        assert_eq!(encoded.column("city_paris").unwrap()[1], Value::Num(1.0));
    }

    #[test]
    fn test_categories_sorted() {
        let mut encoder = OneHotEncoder::new();
        encoder.fit(&city_frame()).unwrap();
        assert_eq!(
            encoder.categories().unwrap()[0],
            vec![Value::from("paris"), Value::from("rome")]
        );
    }

    #[test]
    fn test_numeric_categories() {
        let frame = Frame::from_columns(vec![(
            "code",
            vec![Value::from(2.0), Value::from(0.0), Value::from(2.0)],
        )]);
        let mut encoder = OneHotEncoder::new();
        let encoded = encoder.fit_transform(&frame).unwrap();
        assert_eq!(
            encoded.column_names(),
            &["code_0".to_string(), "code_2".to_string()]
        );
        assert_eq!(encoded.column("code_2").unwrap()[0], Value::Num(1.0));
    }

    #[test]
    fn test_multiple_columns_keep_column_order() {
        let frame = Frame::from_columns(vec![
            ("a", vec![Value::from("x"), Value::from("y")]),
            ("b", vec![Value::from("p"), Value::from("q")]),
        ]);
        let mut encoder = OneHotEncoder::new();
        let encoded = encoder.fit_transform(&frame).unwrap();
        assert_eq!(
            encoded.column_names(),
            &[
                "a_x".to_string(),
                "a_y".to_string(),
                "b_p".to_string(),
                "b_q".to_string()
            ]
        );
    }

    #[test]
    fn test_unknown_category_errors_by_default() {
        let mut encoder = OneHotEncoder::new();
        encoder.fit(&city_frame()).unwrap();
        let fresh = Frame::from_columns(vec![("city", vec![Value::from("oslo")])]);
        let result = encoder.transform(&fresh);
        assert!(matches!(
            result,
            Err(PreprocessError::TransformValue(ref msg)) if msg.contains("oslo")
        ));
    }

    #[test]
    fn test_unknown_category_ignored_when_configured() {
        let mut encoder = OneHotEncoder::new().with_handle_unknown(HandleUnknown::Ignore);
        encoder.fit(&city_frame()).unwrap();
        let fresh = Frame::from_columns(vec![("city", vec![Value::from("oslo")])]);
        let encoded = encoder.transform(&fresh).unwrap();
        assert_eq!(encoded.column("city_paris").unwrap()[0], Value::Num(0.0));
        assert_eq!(encoded.column("city_rome").unwrap()[0], Value::Num(0.0));
    }

    #[test]
    fn test_missing_cells_rejected() {
        let frame = Frame::from_columns(vec![("city", vec![Value::from("rome"), Value::Missing])]);
        let mut encoder = OneHotEncoder::new();
        let result = encoder.fit(&frame);
        assert!(matches!(
            result,
            Err(PreprocessError::TransformValue(ref msg)) if msg.contains("impute")
        ));
    }

    #[test]
    fn test_transform_before_fit() {
        let encoder = OneHotEncoder::new();
        assert!(matches!(
            encoder.transform(&city_frame()),
            Err(PreprocessError::NotFitted)
        ));
    }

    #[test]
    fn test_output_names_after_fit() {
        let mut encoder = OneHotEncoder::new();
        assert_eq!(encoder.output_names(&["city".to_string()]), None);
        encoder.fit(&city_frame()).unwrap();
        assert_eq!(
            encoder.output_names(&["city".to_string()]),
            Some(vec!["city_paris".to_string(), "city_rome".to_string()])
        );
    }

    #[test]
    fn test_from_spec() {
        let spec = StepSpec::new("one_hot_encoder").with_param("handle_unknown", "ignore");
        let encoder = OneHotEncoder::from_spec(&spec).unwrap();
        assert_eq!(encoder.handle_unknown, HandleUnknown::Ignore);
    }

    #[test]
    fn test_from_spec_rejects_bad_strategy() {
        let spec = StepSpec::new("one_hot_encoder").with_param("handle_unknown", "skip");
        assert!(matches!(
            OneHotEncoder::from_spec(&spec),
            Err(PreprocessError::InvalidStepParameters { .. })
        ));
    }
}
