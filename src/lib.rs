//! # tabprep
//!
//! Configuration-driven preprocessing pipelines for tabular data.
//!
//! The shape of the pipeline — which columns are processed, by which steps,
//! with which parameters — lives entirely in a declarative configuration.
//! Changing how numeric and categorical features are cleaned, imputed,
//! scaled, or encoded is a configuration edit, not a code change: step names
//! are resolved through an explicit [`registry::Registry`] rather than any
//! form of dynamic code loading.
//!
//! ## Core Design Principles
//!
//! - **Configuration over code**: feature groups, step order, and step
//!   parameters come from a [`config::PreprocessorConfig`] produced by an
//!   external loader; the crate raises only semantic errors (unknown steps,
//!   overlapping or missing columns).
//! - **Explicit resolution**: untrusted step-name strings select behavior
//!   only through registry entries registered at start-up; parameter
//!   validation happens at construction time, before any data is touched.
//! - **Deterministic output layout**: per-group outputs are concatenated in
//!   group-declaration order, which is the sole source of truth for output
//!   column positions and names.
//! - **One-way lifecycle**: a [`preprocessor::Preprocessor`] moves from
//!   unfitted to fitted; fitting is all-or-nothing and transforming before
//!   fitting fails rather than guessing.
//!
//! ## Quick Start
//!
//! ```
//! use tabprep::config::{FeatureGroup, PreprocessorConfig, StepSpec};
//! use tabprep::frame::{Frame, Value};
//! use tabprep::preprocessor::Preprocessor;
//! use tabprep::registry::Registry;
//!
//! // Normally deserialized from a configuration file by an external loader.
//! let config = PreprocessorConfig::new()
//!     .with_group(
//!         FeatureGroup::new("numeric", ["age"])
//!             .with_step(StepSpec::new("simple_imputer").with_param("strategy", "mean"))
//!             .with_step(StepSpec::new("standard_scaler")),
//!     )
//!     .with_group(
//!         FeatureGroup::new("categorical", ["city"])
//!             .with_step(StepSpec::new("simple_imputer").with_param("strategy", "most_frequent"))
//!             .with_step(StepSpec::new("one_hot_encoder")),
//!     );
//!
//! let registry = Registry::with_builtins();
//! let mut preprocessor = Preprocessor::from_config(&config, &registry).unwrap();
//!
//! let frame = Frame::from_columns(vec![
//!     ("age", vec![Value::from(22.0), Value::Missing, Value::from(38.0)]),
//!     ("city", vec![Value::from("rome"), Value::from("paris"), Value::Missing]),
//! ]);
//!
//! let output = preprocessor.fit_transform(&frame).unwrap();
//! let names = preprocessor.output_feature_names().unwrap();
//! assert_eq!(names[0], "age");
//! assert_eq!(output.n_cols(), names.len());
//! ```
//!
//! ## Module Structure
//!
//! - `frame` — named-column data container (`Frame`, `Value`)
//! - `config` — configuration model (`PreprocessorConfig`, `FeatureGroup`,
//!   `StepSpec`, `ParamValue`)
//! - `registry` — step-name to constructor table
//! - `traits` — the `TransformUnit` capability trait
//! - `imputation`, `scaling`, `encoding` — built-in transformation units
//! - `pipeline` — per-group chains and their column-routing composition
//! - `preprocessor` — the fit/transform facade

/// Configuration model consumed by the assembler.
pub mod config;

/// Categorical feature encoding transformers.
pub mod encoding;

/// Error types.
pub mod error;

/// Named-column data container.
pub mod frame;

/// Missing-value imputation transformers.
pub mod imputation;

/// Pipeline assembly and composition.
pub mod pipeline;

/// The fit/transform facade.
pub mod preprocessor;

/// Step-name registry.
pub mod registry;

/// Numeric feature scaling transformers.
pub mod scaling;

/// Core trait for transformation units.
pub mod traits;

pub use config::{FeatureGroup, ParamValue, Params, PreprocessorConfig, StepSpec};
pub use error::PreprocessError;
pub use frame::{Frame, Value};
pub use preprocessor::Preprocessor;
pub use registry::Registry;
pub use traits::TransformUnit;
