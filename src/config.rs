//! Configuration model consumed by the pipeline assembler.
//!
//! These types mirror the shape an external configuration loader produces:
//! an ordered list of feature groups, each naming its columns and an ordered
//! list of parameterized steps. The crate never parses raw configuration
//! text; everything here is already structurally valid, and only semantic
//! errors (unknown step names, overlapping columns, missing columns) are
//! raised downstream.
//!
//! # Example
//! ```
//! use tabprep::config::{FeatureGroup, ParamValue, PreprocessorConfig, StepSpec};
//!
//! let config = PreprocessorConfig::new()
//!     .with_group(
//!         FeatureGroup::new("numeric", ["age", "claim_amount"])
//!             .with_step(StepSpec::new("simple_imputer").with_param("strategy", "mean"))
//!             .with_step(StepSpec::new("standard_scaler")),
//!     )
//!     .with_group(
//!         FeatureGroup::new("categorical", ["city"])
//!             .with_step(StepSpec::new("simple_imputer").with_param("strategy", "most_frequent"))
//!             .with_step(StepSpec::new("one_hot_encoder")),
//!     );
//! assert_eq!(config.groups.len(), 2);
//! ```

use crate::error::PreprocessError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One constructor parameter value: a scalar or a sequence of scalars.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// String scalar.
    Str(String),
    /// Sequence of values.
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Boolean content, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric content, widening integers to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// String content, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Sequence content, if any.
    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Str(_) => "string",
            ParamValue::List(_) => "list",
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl<V: Into<ParamValue>> From<Vec<V>> for ParamValue {
    fn from(items: Vec<V>) -> Self {
        ParamValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Constructor parameters keyed by name. A `BTreeMap` keeps iteration
/// deterministic for logging and error reporting.
pub type Params = BTreeMap<String, ParamValue>;

/// One named, parameterized processing step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepSpec {
    /// Step name, resolved through the registry.
    pub name: String,
    /// Constructor parameters.
    #[serde(default)]
    pub params: Params,
}

impl StepSpec {
    /// Create a step with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Params::new(),
        }
    }

    /// Add one constructor parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// A named set of columns sharing one ordered sequence of steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureGroup {
    /// Unique group identifier.
    pub name: String,
    /// Columns this group governs, in declaration order.
    pub columns: Vec<String>,
    /// Steps applied in declaration order.
    pub steps: Vec<StepSpec>,
}

impl FeatureGroup {
    /// Create a group with no steps.
    pub fn new<C: Into<String>>(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = C>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            steps: Vec::new(),
        }
    }

    /// Append one step.
    pub fn with_step(mut self, step: StepSpec) -> Self {
        self.steps.push(step);
        self
    }
}

/// Top-level configuration: ordered feature groups plus the overlap policy.
///
/// Group declaration order fixes the output column order of the composed
/// pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// Feature groups in declaration order.
    pub groups: Vec<FeatureGroup>,
    /// When true, one column may be claimed by several groups (it is then
    /// processed once per claiming group). Default: columns are disjoint.
    #[serde(default)]
    pub allow_column_overlap: bool,
}

impl PreprocessorConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one feature group.
    pub fn with_group(mut self, group: FeatureGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Allow columns to be claimed by several groups.
    pub fn with_column_overlap(mut self) -> Self {
        self.allow_column_overlap = true;
        self
    }
}

/// Typed view over a step's parameter map, used by unit constructors.
///
/// Every accessor reports failures as
/// [`PreprocessError::InvalidStepParameters`] naming the step and parameter,
/// so misconfiguration is caught at construction time, before any data is
/// touched.
pub struct ParamReader<'a> {
    step: &'a str,
    params: &'a Params,
}

impl<'a> ParamReader<'a> {
    /// Create a reader for the given step's parameters.
    pub fn new(step: &'a str, params: &'a Params) -> Self {
        Self { step, params }
    }

    fn invalid(&self, reason: String) -> PreprocessError {
        PreprocessError::InvalidStepParameters {
            step: self.step.to_string(),
            reason,
        }
    }

    /// Fail if the map contains a key outside the accepted set.
    pub fn ensure_known(&self, accepted: &[&str]) -> Result<(), PreprocessError> {
        for key in self.params.keys() {
            if !accepted.contains(&key.as_str()) {
                return Err(self.invalid(format!(
                    "unrecognized parameter \"{}\" (accepted: {})",
                    key,
                    accepted.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Raw parameter value, if present.
    pub fn get(&self, key: &str) -> Option<&'a ParamValue> {
        self.params.get(key)
    }

    /// String parameter constrained to a fixed set of choices.
    pub fn str_choice(
        &self,
        key: &str,
        choices: &[&str],
        default: &str,
    ) -> Result<String, PreprocessError> {
        match self.params.get(key) {
            None => Ok(default.to_string()),
            Some(value) => {
                let s = value.as_str().ok_or_else(|| {
                    self.invalid(format!(
                        "parameter \"{}\" expects a string, got {}",
                        key,
                        value.type_name()
                    ))
                })?;
                if choices.contains(&s) {
                    Ok(s.to_string())
                } else {
                    Err(self.invalid(format!(
                        "parameter \"{}\" must be one of {}, got \"{}\"",
                        key,
                        choices.join(", "),
                        s
                    )))
                }
            }
        }
    }

    /// Boolean parameter with a default.
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, PreprocessError> {
        match self.params.get(key) {
            None => Ok(default),
            Some(value) => value.as_bool().ok_or_else(|| {
                self.invalid(format!(
                    "parameter \"{}\" expects a bool, got {}",
                    key,
                    value.type_name()
                ))
            }),
        }
    }

    /// Two-number sequence parameter with a default, e.g. a value range.
    pub fn number_pair_or(
        &self,
        key: &str,
        default: (f64, f64),
    ) -> Result<(f64, f64), PreprocessError> {
        match self.params.get(key) {
            None => Ok(default),
            Some(value) => {
                let items = value.as_list().ok_or_else(|| {
                    self.invalid(format!(
                        "parameter \"{}\" expects a list of two numbers, got {}",
                        key,
                        value.type_name()
                    ))
                })?;
                if items.len() != 2 {
                    return Err(self.invalid(format!(
                        "parameter \"{}\" expects exactly two numbers, got {}",
                        key,
                        items.len()
                    )));
                }
                let lo = items[0].as_f64();
                let hi = items[1].as_f64();
                match (lo, hi) {
                    (Some(lo), Some(hi)) => Ok((lo, hi)),
                    _ => Err(self.invalid(format!(
                        "parameter \"{}\" expects numeric entries",
                        key
                    ))),
                }
            }
        }
    }
}
