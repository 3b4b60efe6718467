//! Simple imputer.
//!
//! Learns one fill value per column and replaces missing cells with it.
//! Supports mean, median, most_frequent, and constant strategies; the
//! frequency-based strategies work on string columns as well, which is how
//! categorical features are completed before encoding.
//!
//! # Example
//! ```
//! use tabprep::frame::{Frame, Value};
//! use tabprep::imputation::{ImputeStrategy, SimpleImputer};
//! use tabprep::traits::TransformUnit;
//!
//! let frame = Frame::from_columns(vec![(
//!     "age",
//!     vec![Value::from(10.0), Value::Missing, Value::from(20.0)],
//! )]);
//! let mut imputer = SimpleImputer::new(ImputeStrategy::Mean);
//! let imputed = imputer.fit_transform(&frame).unwrap();
//! assert_eq!(imputed.column("age").unwrap()[1], Value::Num(15.0));
//! ```

use crate::config::{ParamReader, ParamValue, StepSpec};
use crate::error::PreprocessError;
use crate::frame::{Frame, Value};
use crate::traits::{ensure_columns_match, TransformUnit};

/// Strategy for completing missing values.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ImputeStrategy {
    /// Replace missing cells with the column mean (numeric columns only).
    #[default]
    Mean,
    /// Replace missing cells with the column median (numeric columns only).
    Median,
    /// Replace missing cells with the most frequent value of the column.
    /// Ties are broken toward the smallest value.
    MostFrequent,
    /// Replace missing cells with a fixed value.
    Constant(Value),
}

impl ImputeStrategy {
    fn label(&self) -> &'static str {
        match self {
            ImputeStrategy::Mean => "mean",
            ImputeStrategy::Median => "median",
            ImputeStrategy::MostFrequent => "most_frequent",
            ImputeStrategy::Constant(_) => "constant",
        }
    }
}

/// Learned per-column fill values.
#[derive(Clone, Debug)]
struct FittedFills {
    columns: Vec<String>,
    fills: Vec<Value>,
}

/// Imputation transformer for completing missing values.
#[derive(Clone, Debug, Default)]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
    state: Option<FittedFills>,
}

impl SimpleImputer {
    /// Create an imputer with the given strategy.
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            state: None,
        }
    }

    /// Construct from a configuration step.
    ///
    /// Accepted parameters: `strategy` (one of `mean`, `median`,
    /// `most_frequent`, `constant`; default `mean`) and `fill_value`
    /// (number or string; required by and only accepted with `constant`).
    pub fn from_spec(spec: &StepSpec) -> Result<Self, PreprocessError> {
        let reader = ParamReader::new(&spec.name, &spec.params);
        reader.ensure_known(&["strategy", "fill_value"])?;
        let strategy = reader.str_choice(
            "strategy",
            &["mean", "median", "most_frequent", "constant"],
            "mean",
        )?;
        let invalid = |reason: String| PreprocessError::InvalidStepParameters {
            step: spec.name.clone(),
            reason,
        };

        if strategy == "constant" {
            let fill = match reader.get("fill_value") {
                Some(ParamValue::Int(v)) => Value::Num(*v as f64),
                Some(ParamValue::Float(v)) => Value::Num(*v),
                Some(ParamValue::Str(s)) => Value::Str(s.clone()),
                Some(other) => {
                    return Err(invalid(format!(
                        "parameter \"fill_value\" expects a number or string, got {:?}",
                        other
                    )))
                }
                None => {
                    return Err(invalid(
                        "the constant strategy requires a \"fill_value\" parameter".to_string(),
                    ))
                }
            };
            return Ok(Self::new(ImputeStrategy::Constant(fill)));
        }

        if reader.get("fill_value").is_some() {
            return Err(invalid(
                "parameter \"fill_value\" is only accepted with the constant strategy".to_string(),
            ));
        }
        let strategy = match strategy.as_str() {
            "mean" => ImputeStrategy::Mean,
            "median" => ImputeStrategy::Median,
            _ => ImputeStrategy::MostFrequent,
        };
        Ok(Self::new(strategy))
    }

    /// The fill value learned for each column, once fitted.
    pub fn fill_values(&self) -> Option<&[Value]> {
        self.state.as_ref().map(|s| s.fills.as_slice())
    }

    fn compute_fill(&self, column: &str, cells: &[Value]) -> Result<Value, PreprocessError> {
        match &self.strategy {
            ImputeStrategy::Constant(fill) => Ok(fill.clone()),
            ImputeStrategy::Mean => {
                let observed = numeric_observed(column, cells, self.strategy.label())?;
                Ok(Value::Num(
                    observed.iter().sum::<f64>() / observed.len() as f64,
                ))
            }
            ImputeStrategy::Median => {
                let mut observed = numeric_observed(column, cells, self.strategy.label())?;
                observed.sort_by(f64::total_cmp);
                let n = observed.len();
                let median = if n % 2 == 0 {
                    (observed[n / 2 - 1] + observed[n / 2]) / 2.0
                } else {
                    observed[n / 2]
                };
                Ok(Value::Num(median))
            }
            ImputeStrategy::MostFrequent => most_frequent(column, cells),
        }
    }
}

/// Non-missing numeric cells of a column, for the mean/median strategies.
fn numeric_observed(
    column: &str,
    cells: &[Value],
    strategy: &str,
) -> Result<Vec<f64>, PreprocessError> {
    let mut observed = Vec::with_capacity(cells.len());
    for cell in cells {
        match cell {
            Value::Num(v) => observed.push(*v),
            Value::Missing => {}
            Value::Str(s) => {
                return Err(PreprocessError::TransformValue(format!(
                    "simple_imputer: column \"{}\": the {} strategy requires numeric values, \
                     got \"{}\"",
                    column, strategy, s
                )))
            }
        }
    }
    if observed.is_empty() {
        return Err(PreprocessError::TransformValue(format!(
            "simple_imputer: column \"{}\" has no observed values to compute the {}",
            column, strategy
        )));
    }
    Ok(observed)
}

/// Most frequent non-missing value; ties go to the smallest value.
fn most_frequent(column: &str, cells: &[Value]) -> Result<Value, PreprocessError> {
    let mut counts: Vec<(Value, usize)> = Vec::new();
    for cell in cells {
        if cell.is_missing() {
            continue;
        }
        match counts.iter_mut().find(|(v, _)| v == cell) {
            Some(slot) => slot.1 += 1,
            None => counts.push((cell.clone(), 1)),
        }
    }
    if counts.is_empty() {
        return Err(PreprocessError::TransformValue(format!(
            "simple_imputer: column \"{}\" has no observed values to compute the most_frequent",
            column
        )));
    }
    counts.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut best = &counts[0];
    for candidate in &counts[1..] {
        if candidate.1 > best.1 {
            best = candidate;
        }
    }
    Ok(best.0.clone())
}

impl TransformUnit for SimpleImputer {
    fn fit(&mut self, data: &Frame) -> Result<(), PreprocessError> {
        if data.n_rows() == 0 {
            return Err(PreprocessError::TransformValue(
                "simple_imputer: cannot fit on an empty frame".to_string(),
            ));
        }

        let mut columns = Vec::with_capacity(data.n_cols());
        let mut fills = Vec::with_capacity(data.n_cols());
        for (name, cells) in data.iter_columns() {
            fills.push(self.compute_fill(name, cells)?);
            columns.push(name.to_string());
        }
        self.state = Some(FittedFills { columns, fills });
        Ok(())
    }

    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessError> {
        let state = self.state.as_ref().ok_or(PreprocessError::NotFitted)?;
        ensure_columns_match("simple_imputer", &state.columns, data)?;

        let columns = state
            .columns
            .iter()
            .zip(&state.fills)
            .enumerate()
            .map(|(index, (name, fill))| {
                let cells = data
                    .column_at(index)
                    .iter()
                    .map(|cell| {
                        if cell.is_missing() {
                            fill.clone()
                        } else {
                            cell.clone()
                        }
                    })
                    .collect();
                (name.clone(), cells)
            })
            .collect();
        Ok(Frame::from_columns(columns))
    }

    fn step_name(&self) -> &'static str {
        "simple_imputer"
    }

    fn output_names(&self, input_names: &[String]) -> Option<Vec<String>> {
        Some(input_names.to_vec())
    }

    fn clone_unfitted(&self) -> Box<dyn TransformUnit> {
        Box::new(Self::new(self.strategy.clone()))
    }
}
