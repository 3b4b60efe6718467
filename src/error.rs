//! Error types for pipeline assembly and execution.

use std::fmt;

/// Error type for every fallible operation in the crate.
///
/// Variants carry enough context (step name, group name, column name) to
/// locate the offending configuration entry. Errors are raised immediately
/// and never downgraded to defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum PreprocessError {
    /// A step name has no registered constructor.
    UnknownStep { step: String },
    /// A step name was registered twice.
    DuplicateRegistration { step: String },
    /// A step parameter is unrecognized or has an incompatible value.
    InvalidStepParameters { step: String, reason: String },
    /// A feature group declares no processing steps.
    EmptyGroup { group: String },
    /// The configuration declares no feature groups.
    EmptyConfiguration,
    /// Two feature groups claim the same column while overlap is disallowed.
    OverlappingColumns {
        column: String,
        first_group: String,
        second_group: String,
    },
    /// A column declared by a feature group is absent from the input data.
    MissingColumn { column: String, group: String },
    /// A transform was requested before fitting.
    NotFitted,
    /// A value in the data is incompatible with a transformation unit.
    TransformValue(String),
}

impl fmt::Display for PreprocessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreprocessError::UnknownStep { step } => {
                write!(f, "Unknown step \"{}\": no registered constructor", step)
            }
            PreprocessError::DuplicateRegistration { step } => {
                write!(f, "Step \"{}\" is already registered", step)
            }
            PreprocessError::InvalidStepParameters { step, reason } => {
                write!(f, "Invalid parameters for step \"{}\": {}", step, reason)
            }
            PreprocessError::EmptyGroup { group } => {
                write!(f, "Feature group \"{}\" declares no steps", group)
            }
            PreprocessError::EmptyConfiguration => {
                write!(f, "Configuration declares no feature groups")
            }
            PreprocessError::OverlappingColumns {
                column,
                first_group,
                second_group,
            } => {
                write!(
                    f,
                    "Column \"{}\" is claimed by groups \"{}\" and \"{}\"",
                    column, first_group, second_group
                )
            }
            PreprocessError::MissingColumn { column, group } => {
                write!(
                    f,
                    "Column \"{}\" (group \"{}\") is missing from the input data",
                    column, group
                )
            }
            PreprocessError::NotFitted => {
                write!(f, "Preprocessor must be fitted before transforming data")
            }
            PreprocessError::TransformValue(msg) => {
                write!(f, "Invalid value: {}", msg)
            }
        }
    }
}

impl std::error::Error for PreprocessError {}
