//! Missing-value imputation transformers.

mod simple;

pub use simple::{ImputeStrategy, SimpleImputer};
