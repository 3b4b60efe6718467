//! Preprocessor facade.
//!
//! Owns the composed pipeline and exposes the fit/transform contract with a
//! one-way UNFITTED → FITTED lifecycle. Construction performs all
//! configuration validation (step resolution, parameter checking, column
//! disjointness), so a `Preprocessor` in hand means the configuration is
//! sound; only data-dependent errors remain possible afterwards.
//!
//! # Example
//! ```
//! use tabprep::config::{FeatureGroup, PreprocessorConfig, StepSpec};
//! use tabprep::frame::{Frame, Value};
//! use tabprep::preprocessor::Preprocessor;
//! use tabprep::registry::Registry;
//!
//! let registry = Registry::with_builtins();
//! let config = PreprocessorConfig::new().with_group(
//!     FeatureGroup::new("numeric", ["age"])
//!         .with_step(StepSpec::new("simple_imputer").with_param("strategy", "mean"))
//!         .with_step(StepSpec::new("standard_scaler")),
//! );
//!
//! let mut preprocessor = Preprocessor::from_config(&config, &registry).unwrap();
//! let frame = Frame::from_columns(vec![(
//!     "age",
//!     vec![Value::from(20.0), Value::Missing, Value::from(40.0)],
//! )]);
//! let output = preprocessor.fit_transform(&frame).unwrap();
//! assert_eq!(output.n_cols(), 1);
//! assert_eq!(
//!     preprocessor.output_feature_names().unwrap(),
//!     vec!["age".to_string()]
//! );
//! ```

use crate::config::PreprocessorConfig;
use crate::error::PreprocessError;
use crate::frame::Frame;
use crate::pipeline::CompositePipeline;
use crate::registry::Registry;
use log::debug;

/// Configuration-driven preprocessing facade.
///
/// Fitting is all-or-nothing: each fit starts from the validated unfitted
/// template and the fitted pipeline is swapped in only on full success, so a
/// failure mid-fit leaves the previous state — unfitted or an earlier
/// successful fit — untouched, and a re-fit can never mix statistics learned
/// from different data sets.
pub struct Preprocessor {
    template: CompositePipeline,
    fitted: Option<CompositePipeline>,
}

impl Preprocessor {
    /// Validate the configuration against the registry and build an
    /// unfitted preprocessor.
    pub fn from_config(
        config: &PreprocessorConfig,
        registry: &Registry,
    ) -> Result<Self, PreprocessError> {
        Ok(Self {
            template: CompositePipeline::compose(registry, config)?,
            fitted: None,
        })
    }

    /// Whether a fit has completed successfully.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Fit the pipeline on `data`. Returns `self` for chaining.
    pub fn fit(&mut self, data: &Frame) -> Result<&mut Self, PreprocessError> {
        self.fit_impl(data)?;
        Ok(self)
    }

    /// Fit the pipeline on `data` and return the transformed frame.
    ///
    /// Equivalent to `fit(data)` followed by `transform(data)`, but reuses
    /// the frame already produced while sequentially fitting the chains.
    pub fn fit_transform(&mut self, data: &Frame) -> Result<Frame, PreprocessError> {
        self.fit_impl(data)
    }

    fn fit_impl(&mut self, data: &Frame) -> Result<Frame, PreprocessError> {
        let mut candidate = self.template.clone_unfitted();
        let output = candidate.fit(data)?;
        debug!(
            "fitted {} group(s) on {} row(s); {} output column(s)",
            candidate.len(),
            data.n_rows(),
            output.n_cols()
        );
        self.fitted = Some(candidate);
        Ok(output)
    }

    /// Transform `data` with the fitted pipeline.
    ///
    /// `data` may be any frame containing the configured columns with
    /// compatible value types. Fails with [`PreprocessError::NotFitted`]
    /// before the first successful fit.
    pub fn transform(&self, data: &Frame) -> Result<Frame, PreprocessError> {
        match &self.fitted {
            Some(pipeline) => pipeline.transform(data),
            None => Err(PreprocessError::NotFitted),
        }
    }

    /// Ordered output feature names: each group's sub-pipeline output names
    /// concatenated in group-declaration order.
    ///
    /// Fails with [`PreprocessError::NotFitted`] before the first
    /// successful fit.
    pub fn output_feature_names(&self) -> Result<Vec<String>, PreprocessError> {
        self.fitted
            .as_ref()
            .and_then(CompositePipeline::output_feature_names)
            .ok_or(PreprocessError::NotFitted)
    }
}
