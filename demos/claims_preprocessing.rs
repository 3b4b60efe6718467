//! Claims Preprocessing Walkthrough
//!
//! Demonstrates the full configuration-driven workflow on a small
//! insurance-claims-style data set:
//! - Mixed feature types (numeric, categorical)
//! - Missing value imputation per feature group
//! - Scaling and one-hot encoding selected by step name
//! - Deterministic output feature naming
//!
//! Run with: cargo run --example claims_preprocessing

use tabprep::config::{FeatureGroup, PreprocessorConfig, StepSpec};
use tabprep::frame::{Frame, Value};
use tabprep::preprocessor::Preprocessor;
use tabprep::registry::Registry;
use std::error::Error;

/// The configuration an external loader would produce from a file like:
///
/// ```yaml
/// groups:
///   - name: numeric
///     columns: [age, claim_amount]
///     steps:
///       - name: simple_imputer
///         params: { strategy: mean }
///       - name: standard_scaler
///   - name: categorical
///     columns: [city, payment_method]
///     steps:
///       - name: simple_imputer
///         params: { strategy: most_frequent }
///       - name: one_hot_encoder
/// ```
fn build_config() -> PreprocessorConfig {
    PreprocessorConfig::new()
        .with_group(
            FeatureGroup::new("numeric", ["age", "claim_amount"])
                .with_step(StepSpec::new("simple_imputer").with_param("strategy", "mean"))
                .with_step(StepSpec::new("standard_scaler")),
        )
        .with_group(
            FeatureGroup::new("categorical", ["city", "payment_method"])
                .with_step(StepSpec::new("simple_imputer").with_param("strategy", "most_frequent"))
                .with_step(StepSpec::new("one_hot_encoder")),
        )
}

fn build_claims() -> Frame {
    Frame::from_columns(vec![
        (
            "age",
            vec![
                Value::from(25.0),
                Value::from(35.0),
                Value::Missing,
                Value::from(45.0),
                Value::from(35.0),
                Value::from(40.0),
            ],
        ),
        (
            "claim_amount",
            vec![
                Value::from(1000.0),
                Value::from(2000.0),
                Value::from(1500.0),
                Value::Missing,
                Value::from(3000.0),
                Value::from(2500.0),
            ],
        ),
        (
            "city",
            vec![
                Value::from("london"),
                Value::from("paris"),
                Value::Missing,
                Value::from("paris"),
                Value::from("berlin"),
                Value::from("rome"),
            ],
        ),
        (
            "payment_method",
            vec![
                Value::from("card"),
                Value::Missing,
                Value::from("cash"),
                Value::from("card"),
                Value::from("transfer"),
                Value::from("card"),
            ],
        ),
    ])
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let registry = Registry::with_builtins();
    println!("Registered steps: {:?}", registry.step_names());

    let config = build_config();
    let mut preprocessor = Preprocessor::from_config(&config, &registry)?;

    let claims = build_claims();
    println!(
        "Input: {} rows x {} columns {:?}",
        claims.n_rows(),
        claims.n_cols(),
        claims.column_names()
    );

    let output = preprocessor.fit_transform(&claims)?;
    let names = preprocessor.output_feature_names()?;
    let matrix = output.to_matrix()?;

    println!("Output features ({}):", names.len());
    for name in &names {
        println!("  {}", name);
    }

    println!("Transformed matrix:");
    for row in matrix.rows() {
        let cells: Vec<String> = row.iter().map(|v| format!("{:7.3}", v)).collect();
        println!("  [{}]", cells.join(", "));
    }

    // The fitted preprocessor applies the same learned statistics to new data.
    let incoming = Frame::from_columns(vec![
        ("age", vec![Value::Missing]),
        ("claim_amount", vec![Value::from(1800.0)]),
        ("city", vec![Value::from("rome")]),
        ("payment_method", vec![Value::from("card")]),
    ]);
    let scored = preprocessor.transform(&incoming)?;
    println!(
        "New claim transformed: {:?}",
        scored.to_matrix()?.row(0).to_vec()
    );

    Ok(())
}
