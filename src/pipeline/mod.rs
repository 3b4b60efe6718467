//! Pipeline assembly: per-group step chains and their composition.

mod composite;
mod group;

pub use composite::CompositePipeline;
pub use group::GroupPipeline;
