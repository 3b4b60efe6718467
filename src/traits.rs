//! Core trait for transformation units.
//!
//! A [`TransformUnit`] is one opaque processing step inside a feature
//! group's pipeline: it learns state from a training frame and then
//! transforms frames of the same shape. Units are stored as
//! `Box<dyn TransformUnit>` so pipelines can hold heterogeneous steps
//! resolved from configuration at run time.

use crate::error::PreprocessError;
use crate::frame::Frame;

/// One fit/transform-capable processing step.
///
/// Implementors learn per-column state in [`fit`](TransformUnit::fit) and
/// must not mutate state in [`transform`](TransformUnit::transform), so a
/// fitted unit can transform any number of frames. Calling `transform`
/// before `fit` fails with [`PreprocessError::NotFitted`].
pub trait TransformUnit {
    /// Learn internal state from the training frame.
    fn fit(&mut self, data: &Frame) -> Result<(), PreprocessError>;

    /// Transform a frame using the learned state.
    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessError>;

    /// Fit on the frame, then transform it.
    ///
    /// Units that can compute both in one pass may override this; the result
    /// must equal the two-call sequence.
    fn fit_transform(&mut self, data: &Frame) -> Result<Frame, PreprocessError> {
        self.fit(data)?;
        self.transform(data)
    }

    /// The registered step name, used in log and error context.
    fn step_name(&self) -> &'static str;

    /// Output column names this unit produces for the given input names.
    ///
    /// Optional capability: the default returns `None`, which makes the
    /// enclosing pipeline fall back to the group's original column
    /// identifiers. Only meaningful once the unit is fitted (encoders learn
    /// their categories from data).
    fn output_names(&self, input_names: &[String]) -> Option<Vec<String>> {
        let _ = input_names;
        None
    }

    /// A fresh unfitted unit with the same hyperparameters.
    ///
    /// Lets a fitted pipeline be re-fitted from its configuration template
    /// without retaining any previously learned state.
    fn clone_unfitted(&self) -> Box<dyn TransformUnit>;
}

/// Verify that `data` carries exactly the columns a unit was fitted on,
/// in the same order.
pub(crate) fn ensure_columns_match(
    step: &str,
    fitted: &[String],
    data: &Frame,
) -> Result<(), PreprocessError> {
    if data.column_names() != fitted {
        return Err(PreprocessError::TransformValue(format!(
            "{}: fitted on columns [{}], got [{}]",
            step,
            fitted.join(", "),
            data.column_names().join(", ")
        )));
    }
    Ok(())
}
