//! Sequential pipeline for one feature group.
//!
//! Chains the group's transformation units so that step *i*'s output feeds
//! step *i + 1*'s input. Fitting interleaves fit and transform: step 1 is
//! fitted on the raw slice, its transform output fits step 2, and so on —
//! never fit-all-then-transform-all, since later steps must learn from
//! already-transformed data.

use crate::config::FeatureGroup;
use crate::error::PreprocessError;
use crate::frame::Frame;
use crate::registry::Registry;
use crate::traits::TransformUnit;
use log::debug;

/// Ordered chain of transformation units for one feature group.
pub struct GroupPipeline {
    group: String,
    steps: Vec<(String, Box<dyn TransformUnit>)>,
}

impl GroupPipeline {
    /// Instantiate every step of a feature group, in declaration order.
    ///
    /// Fails with [`PreprocessError::EmptyGroup`] when the group declares no
    /// steps, and propagates resolution and parameter errors from the
    /// registry; a failing step leaves no partially built pipeline behind.
    pub fn build(registry: &Registry, group: &FeatureGroup) -> Result<Self, PreprocessError> {
        if group.steps.is_empty() {
            return Err(PreprocessError::EmptyGroup {
                group: group.name.clone(),
            });
        }
        let steps = group
            .steps
            .iter()
            .map(|spec| Ok((spec.name.clone(), registry.instantiate(spec)?)))
            .collect::<Result<Vec<_>, PreprocessError>>()?;
        Ok(Self {
            group: group.name.clone(),
            steps,
        })
    }

    /// Fit the chain on `data`, returning the fully transformed frame.
    ///
    /// The returned frame is what `transform(data)` would produce on the
    /// freshly fitted chain; callers fitting and transforming the same data
    /// can use it directly instead of a second pass.
    pub fn fit(&mut self, data: &Frame) -> Result<Frame, PreprocessError> {
        let mut current = data.clone();
        for (name, unit) in &mut self.steps {
            unit.fit(&current)?;
            current = unit.transform(&current)?;
            debug!(
                "group \"{}\": fitted step \"{}\" ({} -> {} columns)",
                self.group,
                name,
                data.n_cols(),
                current.n_cols()
            );
        }
        Ok(current)
    }

    /// Run the already-fitted chain on `data`.
    pub fn transform(&self, data: &Frame) -> Result<Frame, PreprocessError> {
        let mut current = data.clone();
        for (_, unit) in &self.steps {
            current = unit.transform(&current)?;
        }
        Ok(current)
    }

    /// Output names for the chain, given the group's column identifiers.
    ///
    /// Folds the names through each unit's naming capability. If any unit in
    /// the chain does not expose output names, the group's original column
    /// identifiers are used as-is.
    pub fn output_names(&self, group_columns: &[String]) -> Vec<String> {
        let mut names = group_columns.to_vec();
        for (_, unit) in &self.steps {
            match unit.output_names(&names) {
                Some(next) => names = next,
                None => return group_columns.to_vec(),
            }
        }
        names
    }

    /// Declared step names, in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the chain has no steps. Never true for a built pipeline.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// A fresh unfitted chain with the same units and hyperparameters.
    pub(crate) fn clone_unfitted(&self) -> Self {
        Self {
            group: self.group.clone(),
            steps: self
                .steps
                .iter()
                .map(|(name, unit)| (name.clone(), unit.clone_unfitted()))
                .collect(),
        }
    }
}
