//! End-to-end tests for configuration-driven preprocessing.
//!
//! The scenario mirrors a claims-style data set: numeric columns are
//! mean-imputed and standardized, categorical columns are most-frequent
//! imputed and one-hot encoded, and the output layout follows the
//! group-declaration order of the configuration.

use tabprep::config::{FeatureGroup, PreprocessorConfig, StepSpec};
use tabprep::error::PreprocessError;
use tabprep::frame::{Frame, Value};
use tabprep::preprocessor::Preprocessor;
use tabprep::registry::Registry;

/// Two groups: numeric [age, claim_amount] and categorical
/// [city, payment_method], as a configuration loader would produce them.
fn claims_config() -> PreprocessorConfig {
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

/// Six rows with one missing cell per column.
fn claims_frame() -> Frame {
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

/// Standardize with the population standard deviation, the same statistics
/// the scaler learns.
fn zscore(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = (values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n).sqrt();
    values.iter().map(|v| (v - mean) / std).collect()
}

#[test]
fn end_to_end_claims_scenario() {
    let registry = Registry::with_builtins();
    let mut preprocessor = Preprocessor::from_config(&claims_config(), &registry).unwrap();
    let output = preprocessor.fit_transform(&claims_frame()).unwrap();

    // Scaled numeric names first, then one indicator per observed category
    // across both categorical columns, in that order.
    let names = preprocessor.output_feature_names().unwrap();
    assert_eq!(
        names,
        vec![
            "age",
            "claim_amount",
            "city_berlin",
            "city_london",
            "city_paris",
            "city_rome",
            "payment_method_card",
            "payment_method_cash",
            "payment_method_transfer",
        ]
    );
    assert_eq!(output.n_cols(), names.len());

    let matrix = output.to_matrix().unwrap();
    assert_eq!(matrix.shape(), &[6, 9]);

    // Missing ages were replaced by the mean of the observed five (36),
    // missing claim amounts by 2000, then both columns standardized.
    let age_imputed = [25.0, 35.0, 36.0, 45.0, 35.0, 40.0];
    let claim_imputed = [1000.0, 2000.0, 1500.0, 2000.0, 3000.0, 2500.0];
    let age_expected = zscore(&age_imputed);
    let claim_expected = zscore(&claim_imputed);
    for row in 0..6 {
        assert!((matrix[[row, 0]] - age_expected[row]).abs() < 1e-9);
        assert!((matrix[[row, 1]] - claim_expected[row]).abs() < 1e-9);
    }

    // The missing city became "paris" (most frequent), the missing payment
    // method "card". Categories are sorted, so the indicator blocks are
    // [berlin, london, paris, rome] and [card, cash, transfer].
    let city_expected = [
        [0.0, 1.0, 0.0, 0.0], // london
        [0.0, 0.0, 1.0, 0.0], // paris
        [0.0, 0.0, 1.0, 0.0], // paris (imputed)
        [0.0, 0.0, 1.0, 0.0], // paris
        [1.0, 0.0, 0.0, 0.0], // berlin
        [0.0, 0.0, 0.0, 1.0], // rome
    ];
    let payment_expected = [
        [1.0, 0.0, 0.0], // card
        [1.0, 0.0, 0.0], // card (imputed)
        [0.0, 1.0, 0.0], // cash
        [1.0, 0.0, 0.0], // card
        [0.0, 0.0, 1.0], // transfer
        [1.0, 0.0, 0.0], // card
    ];
    for row in 0..6 {
        for col in 0..4 {
            assert!((matrix[[row, 2 + col]] - city_expected[row][col]).abs() < 1e-12);
        }
        for col in 0..3 {
            assert!((matrix[[row, 6 + col]] - payment_expected[row][col]).abs() < 1e-12);
        }
    }
}

#[test]
fn fit_transform_matches_fit_then_transform() {
    let registry = Registry::with_builtins();
    let frame = claims_frame();

    let mut combined = Preprocessor::from_config(&claims_config(), &registry).unwrap();
    let one_pass = combined.fit_transform(&frame).unwrap();

    let mut sequential = Preprocessor::from_config(&claims_config(), &registry).unwrap();
    sequential.fit(&frame).unwrap();
    let two_pass = sequential.transform(&frame).unwrap();

    assert_eq!(one_pass.column_names(), two_pass.column_names());
    let a = one_pass.to_matrix().unwrap();
    let b = two_pass.to_matrix().unwrap();
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() < 1e-12);
    }
}

#[test]
fn transform_before_fit_is_rejected() {
    let registry = Registry::with_builtins();
    let preprocessor = Preprocessor::from_config(&claims_config(), &registry).unwrap();
    assert!(matches!(
        preprocessor.transform(&claims_frame()),
        Err(PreprocessError::NotFitted)
    ));
}

#[test]
fn overlapping_columns_name_column_and_groups() {
    let registry = Registry::with_builtins();
    let config = PreprocessorConfig::new()
        .with_group(
            FeatureGroup::new("numeric", ["age", "claim_amount"])
                .with_step(StepSpec::new("standard_scaler")),
        )
        .with_group(
            FeatureGroup::new("ranges", ["age"]).with_step(StepSpec::new("min_max_scaler")),
        );
    let result = Preprocessor::from_config(&config, &registry);
    assert!(matches!(
        result,
        Err(PreprocessError::OverlappingColumns {
            ref column,
            ref first_group,
            ref second_group,
        }) if column == "age" && first_group == "numeric" && second_group == "ranges"
    ));
}

#[test]
fn unknown_step_fails_at_construction() {
    let registry = Registry::with_builtins();
    let config = PreprocessorConfig::new().with_group(
        FeatureGroup::new("numeric", ["age"]).with_step(StepSpec::new("no_such_scaler")),
    );
    let result = Preprocessor::from_config(&config, &registry);
    assert!(matches!(
        result,
        Err(PreprocessError::UnknownStep { ref step }) if step == "no_such_scaler"
    ));
}

#[test]
fn output_name_count_matches_output_width() {
    let registry = Registry::with_builtins();
    let config = claims_config().with_group(
        FeatureGroup::new("extra", ["priority"]).with_step(StepSpec::new("ordinal_encoder")),
    );
    let mut preprocessor = Preprocessor::from_config(&config, &registry).unwrap();

    let mut frame = claims_frame();
    frame = Frame::hcat(&[
        frame,
        Frame::from_columns(vec![(
            "priority",
            vec![
                Value::from("low"),
                Value::from("high"),
                Value::from("low"),
                Value::from("medium"),
                Value::from("high"),
                Value::from("low"),
            ],
        )]),
    ]);

    let output = preprocessor.fit_transform(&frame).unwrap();
    let names = preprocessor.output_feature_names().unwrap();
    assert_eq!(names.len(), output.n_cols());
    // 2 scaled + 4 city + 3 payment + 1 ordinal
    assert_eq!(names.len(), 10);
    assert_eq!(names[9], "priority");
}

#[test]
fn transform_applies_fitted_state_to_new_data() {
    let registry = Registry::with_builtins();
    let mut preprocessor = Preprocessor::from_config(&claims_config(), &registry).unwrap();
    preprocessor.fit(&claims_frame()).unwrap();

    let fresh = Frame::from_columns(vec![
        ("age", vec![Value::from(36.0), Value::Missing]),
        ("claim_amount", vec![Value::from(2000.0), Value::from(2000.0)]),
        ("city", vec![Value::from("rome"), Value::from("paris")]),
        ("payment_method", vec![Value::from("cash"), Value::Missing]),
    ]);
    let output = preprocessor.transform(&fresh).unwrap();
    let matrix = output.to_matrix().unwrap();

    // 36 and 2000 are the fitted means; the missing age imputes to 36, so
    // the whole numeric block is zero.
    for row in 0..2 {
        assert!(matrix[[row, 0]].abs() < 1e-9);
        assert!(matrix[[row, 1]].abs() < 1e-9);
    }
    // city_rome, then city_paris on the second row.
    assert!((matrix[[0, 5]] - 1.0).abs() < 1e-12);
    assert!((matrix[[1, 4]] - 1.0).abs() < 1e-12);
    // Missing payment method imputes to the fitted "card".
    assert!((matrix[[1, 6]] - 1.0).abs() < 1e-12);
}

#[test]
fn unseen_category_surfaces_as_transform_error() {
    let registry = Registry::with_builtins();
    let mut preprocessor = Preprocessor::from_config(&claims_config(), &registry).unwrap();
    preprocessor.fit(&claims_frame()).unwrap();

    let fresh = Frame::from_columns(vec![
        ("age", vec![Value::from(30.0)]),
        ("claim_amount", vec![Value::from(1500.0)]),
        ("city", vec![Value::from("oslo")]),
        ("payment_method", vec![Value::from("card")]),
    ]);
    let result = preprocessor.transform(&fresh);
    assert!(matches!(
        result,
        Err(PreprocessError::TransformValue(ref msg)) if msg.contains("oslo")
    ));
}

#[test]
fn missing_column_at_transform_names_column_and_group() {
    let registry = Registry::with_builtins();
    let mut preprocessor = Preprocessor::from_config(&claims_config(), &registry).unwrap();
    preprocessor.fit(&claims_frame()).unwrap();

    let incomplete = Frame::from_columns(vec![
        ("age", vec![Value::from(30.0)]),
        ("claim_amount", vec![Value::from(1500.0)]),
        ("city", vec![Value::from("paris")]),
    ]);
    let result = preprocessor.transform(&incomplete);
    assert!(matches!(
        result,
        Err(PreprocessError::MissingColumn { ref column, ref group })
            if column == "payment_method" && group == "categorical"
    ));
}

#[test]
fn refit_overwrites_all_fitted_state() {
    let registry = Registry::with_builtins();
    let mut preprocessor = Preprocessor::from_config(&claims_config(), &registry).unwrap();
    preprocessor.fit(&claims_frame()).unwrap();

    // Re-fit on data with different statistics and a different category set.
    let second = Frame::from_columns(vec![
        (
            "age",
            vec![Value::from(60.0), Value::from(70.0), Value::from(80.0)],
        ),
        (
            "claim_amount",
            vec![Value::from(100.0), Value::from(200.0), Value::from(300.0)],
        ),
        (
            "city",
            vec![
                Value::from("tokyo"),
                Value::from("osaka"),
                Value::from("tokyo"),
            ],
        ),
        (
            "payment_method",
            vec![
                Value::from("crypto"),
                Value::from("crypto"),
                Value::from("cash"),
            ],
        ),
    ]);
    preprocessor.fit(&second).unwrap();

    // Names reflect only the second fit's categories.
    let names = preprocessor.output_feature_names().unwrap();
    assert_eq!(
        names,
        vec![
            "age",
            "claim_amount",
            "city_osaka",
            "city_tokyo",
            "payment_method_cash",
            "payment_method_crypto",
        ]
    );

    // A category from the first fit is now unknown: no residual mixing.
    let old_city = Frame::from_columns(vec![
        ("age", vec![Value::from(70.0)]),
        ("claim_amount", vec![Value::from(200.0)]),
        ("city", vec![Value::from("paris")]),
        ("payment_method", vec![Value::from("cash")]),
    ]);
    assert!(preprocessor.transform(&old_city).is_err());

    // And the numeric statistics are the second fit's alone: 70 is the new
    // mean and scales to zero.
    let probe = Frame::from_columns(vec![
        ("age", vec![Value::from(70.0)]),
        ("claim_amount", vec![Value::from(200.0)]),
        ("city", vec![Value::from("tokyo")]),
        ("payment_method", vec![Value::from("cash")]),
    ]);
    let matrix = preprocessor.transform(&probe).unwrap().to_matrix().unwrap();
    assert!(matrix[[0, 0]].abs() < 1e-9);
    assert!(matrix[[0, 1]].abs() < 1e-9);
}

#[test]
fn groups_may_share_columns_when_opted_in() {
    let registry = Registry::with_builtins();
    let config = PreprocessorConfig::new()
        .with_group(
            FeatureGroup::new("standardized", ["age"])
                .with_step(StepSpec::new("standard_scaler")),
        )
        .with_group(
            FeatureGroup::new("ranged", ["age"]).with_step(StepSpec::new("min_max_scaler")),
        )
        .with_column_overlap();
    let mut preprocessor = Preprocessor::from_config(&config, &registry).unwrap();

    let frame = Frame::from_columns(vec![(
        "age",
        vec![Value::from(10.0), Value::from(20.0), Value::from(30.0)],
    )]);
    let output = preprocessor.fit_transform(&frame).unwrap();
    let matrix = output.to_matrix().unwrap();
    assert_eq!(matrix.shape(), &[3, 2]);
    // Column 0 is standardized, column 1 range-scaled into [0, 1].
    assert!(matrix[[1, 0]].abs() < 1e-12);
    assert!((matrix[[1, 1]] - 0.5).abs() < 1e-12);
}
