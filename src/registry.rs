//! Step-name registry.
//!
//! The registry maps the step names a configuration may use to constructor
//! functions producing ready-to-fit transformation units. It replaces the
//! original system's reflective class loading with an explicit start-up-time
//! table: configuration strings can only ever select behavior that was
//! deliberately registered, and extensions are new registry entries rather
//! than new parsing logic.
//!
//! Registration happens once, before any preprocessor is constructed;
//! lookups are read-only and safe to share across threads.
//!
//! # Example
//! ```
//! use tabprep::config::StepSpec;
//! use tabprep::registry::Registry;
//!
//! let registry = Registry::with_builtins();
//! let spec = StepSpec::new("standard_scaler");
//! let unit = registry.instantiate(&spec).unwrap();
//! assert_eq!(unit.step_name(), "standard_scaler");
//! ```

use crate::config::StepSpec;
use crate::encoding::{OneHotEncoder, OrdinalEncoder};
use crate::error::PreprocessError;
use crate::imputation::SimpleImputer;
use crate::scaling::{MinMaxScaler, StandardScaler};
use crate::traits::TransformUnit;
use log::debug;
use std::collections::HashMap;

/// Constructor producing one ready-to-fit unit from a step specification.
///
/// Constructors validate their parameter map eagerly and fail with
/// [`PreprocessError::InvalidStepParameters`] before any data is touched.
pub type UnitConstructor = fn(&StepSpec) -> Result<Box<dyn TransformUnit>, PreprocessError>;

/// Name-to-constructor table for transformation units.
pub struct Registry {
    constructors: HashMap<String, UnitConstructor>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in units: `simple_imputer`,
    /// `standard_scaler`, `min_max_scaler`, `one_hot_encoder`, and
    /// `ordinal_encoder`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        // A fresh registry cannot hold duplicates.
        registry
            .register("simple_imputer", build_simple_imputer)
            .unwrap();
        registry
            .register("standard_scaler", build_standard_scaler)
            .unwrap();
        registry
            .register("min_max_scaler", build_min_max_scaler)
            .unwrap();
        registry
            .register("one_hot_encoder", build_one_hot_encoder)
            .unwrap();
        registry
            .register("ordinal_encoder", build_ordinal_encoder)
            .unwrap();
        registry
    }

    /// Bind a step name to a constructor.
    ///
    /// Fails with [`PreprocessError::DuplicateRegistration`] if the name is
    /// already bound, so an extension can never silently shadow a built-in.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        constructor: UnitConstructor,
    ) -> Result<(), PreprocessError> {
        let name = name.into();
        if self.constructors.contains_key(&name) {
            return Err(PreprocessError::DuplicateRegistration { step: name });
        }
        debug!("registering step \"{}\"", name);
        self.constructors.insert(name, constructor);
        Ok(())
    }

    /// Look up the constructor for a step name.
    pub fn resolve(&self, name: &str) -> Result<UnitConstructor, PreprocessError> {
        self.constructors
            .get(name)
            .copied()
            .ok_or_else(|| PreprocessError::UnknownStep {
                step: name.to_string(),
            })
    }

    /// Resolve a step specification and construct its unit.
    pub fn instantiate(&self, spec: &StepSpec) -> Result<Box<dyn TransformUnit>, PreprocessError> {
        let constructor = self.resolve(&spec.name)?;
        let unit = constructor(spec)?;
        debug!(
            "instantiated step \"{}\" with {} parameter(s)",
            spec.name,
            spec.params.len()
        );
        Ok(unit)
    }

    /// Registered step names, sorted.
    pub fn step_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered steps.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Whether no steps are registered.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn build_simple_imputer(spec: &StepSpec) -> Result<Box<dyn TransformUnit>, PreprocessError> {
    Ok(Box::new(SimpleImputer::from_spec(spec)?))
}

fn build_standard_scaler(spec: &StepSpec) -> Result<Box<dyn TransformUnit>, PreprocessError> {
    Ok(Box::new(StandardScaler::from_spec(spec)?))
}

fn build_min_max_scaler(spec: &StepSpec) -> Result<Box<dyn TransformUnit>, PreprocessError> {
    Ok(Box::new(MinMaxScaler::from_spec(spec)?))
}

fn build_one_hot_encoder(spec: &StepSpec) -> Result<Box<dyn TransformUnit>, PreprocessError> {
    Ok(Box::new(OneHotEncoder::from_spec(spec)?))
}

fn build_ordinal_encoder(spec: &StepSpec) -> Result<Box<dyn TransformUnit>, PreprocessError> {
    Ok(Box::new(OrdinalEncoder::from_spec(spec)?))
}
