//! Composite pipeline routing feature groups to their column slices.
//!
//! The composite owns one [`GroupPipeline`] per feature group together with
//! the group's declared columns. At fit and transform time it slices the
//! input frame to each group's columns, delegates to the group's chain, and
//! concatenates the per-group outputs in group-declaration order. That
//! order — fixed when the configuration was written — is the sole source of
//! truth for output column positions.

use crate::config::PreprocessorConfig;
use crate::error::PreprocessError;
use crate::frame::Frame;
use crate::pipeline::GroupPipeline;
use crate::registry::Registry;
use log::debug;
use std::collections::HashMap;

struct GroupEntry {
    name: String,
    columns: Vec<String>,
    pipeline: GroupPipeline,
}

/// Column-routing composition of per-group pipelines.
pub struct CompositePipeline {
    groups: Vec<GroupEntry>,
    /// Per-group output names, recorded when the composite is fitted.
    output_names: Option<Vec<Vec<String>>>,
}

impl CompositePipeline {
    /// Build the composite from a validated configuration.
    ///
    /// Fails with [`PreprocessError::EmptyConfiguration`] when no groups are
    /// declared and, unless `allow_column_overlap` is set, with
    /// [`PreprocessError::OverlappingColumns`] when two groups (or one group
    /// twice) claim the same column. Step resolution and parameter errors
    /// propagate from the per-group builds.
    pub fn compose(
        registry: &Registry,
        config: &PreprocessorConfig,
    ) -> Result<Self, PreprocessError> {
        if config.groups.is_empty() {
            return Err(PreprocessError::EmptyConfiguration);
        }

        if !config.allow_column_overlap {
            let mut claimed: HashMap<&str, &str> = HashMap::new();
            for group in &config.groups {
                for column in &group.columns {
                    if let Some(first_group) = claimed.insert(column.as_str(), group.name.as_str())
                    {
                        return Err(PreprocessError::OverlappingColumns {
                            column: column.clone(),
                            first_group: first_group.to_string(),
                            second_group: group.name.clone(),
                        });
                    }
                }
            }
        }

        let groups = config
            .groups
            .iter()
            .map(|group| {
                Ok(GroupEntry {
                    name: group.name.clone(),
                    columns: group.columns.clone(),
                    pipeline: GroupPipeline::build(registry, group)?,
                })
            })
            .collect::<Result<Vec<_>, PreprocessError>>()?;
        debug!("composed pipeline with {} group(s)", groups.len());

        Ok(Self {
            groups,
            output_names: None,
        })
    }

    /// Slice `data` down to one group's declared columns, in declared order.
    fn slice_group(data: &Frame, entry: &GroupEntry) -> Result<Frame, PreprocessError> {
        let columns = entry
            .columns
            .iter()
            .map(|name| {
                let cells = data.column(name).ok_or_else(|| {
                    PreprocessError::MissingColumn {
                        column: name.clone(),
                        group: entry.name.clone(),
                    }
                })?;
                Ok((name.clone(), cells.to_vec()))
            })
            .collect::<Result<Vec<_>, PreprocessError>>()?;
        Ok(Frame::from_columns(columns))
    }

    /// Fit every group's chain on its column slice, recording the output
    /// names, and return the concatenated transformed frame.
    pub fn fit(&mut self, data: &Frame) -> Result<Frame, PreprocessError> {
        let mut outputs = Vec::with_capacity(self.groups.len());
        let mut names = Vec::with_capacity(self.groups.len());
        for entry in &mut self.groups {
            let slice = Self::slice_group(data, entry)?;
            let output = entry.pipeline.fit(&slice)?;
            debug!(
                "group \"{}\": {} column(s) in, {} column(s) out",
                entry.name,
                entry.columns.len(),
                output.n_cols()
            );
            names.push(entry.pipeline.output_names(&entry.columns));
            outputs.push(output);
        }
        self.output_names = Some(names);
        Ok(Frame::hcat(&outputs))
    }

    /// Run every fitted group chain on its column slice of `data` and
    /// concatenate the results in group-declaration order.
    pub fn transform(&self, data: &Frame) -> Result<Frame, PreprocessError> {
        let mut outputs = Vec::with_capacity(self.groups.len());
        for entry in &self.groups {
            let slice = Self::slice_group(data, entry)?;
            outputs.push(entry.pipeline.transform(&slice)?);
        }
        Ok(Frame::hcat(&outputs))
    }

    /// Concatenated output names in group-declaration order, once fitted.
    pub fn output_feature_names(&self) -> Option<Vec<String>> {
        self.output_names
            .as_ref()
            .map(|names| names.iter().flatten().cloned().collect())
    }

    /// Group names in declaration order.
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Number of feature groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the composite holds no groups. Never true once composed.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// A fresh unfitted composite with the same groups and units.
    pub(crate) fn clone_unfitted(&self) -> Self {
        Self {
            groups: self
                .groups
                .iter()
                .map(|entry| GroupEntry {
                    name: entry.name.clone(),
                    columns: entry.columns.clone(),
                    pipeline: entry.pipeline.clone_unfitted(),
                })
                .collect(),
            output_names: None,
        }
    }
}
