//! Tests for single-parameter sweeps

use crate::test_helpers::{dec, render, rng, texts};
use approx::assert_relative_eq;
use sweepcase_rs::sweep::{ParamValue, Sweep};
use sweepcase_rs::SweepError;

#[test]
fn test_single_value() {
    let result = Sweep::single("alpha", 0.5).generate(&mut rng(0)).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].get("alpha"), Some(&ParamValue::Float(0.5)));
}

#[test]
fn test_list_yields_one_assignment_per_value() {
    let values = ["0.1", "0.2", "0.3", "x"];
    let result = texts("alpha", &values).generate(&mut rng(0)).unwrap();

    assert_eq!(result.len(), values.len());
    for (i, assignment) in result.iter().enumerate() {
        assert_eq!(assignment.get("alpha").and_then(ParamValue::as_text), Some(values[i]));
    }

    assert!(texts("alpha", &[]).generate(&mut rng(0)).unwrap().is_empty());
}

#[test]
fn test_range_zero_increment() {
    let same = Sweep::range("x", dec("1.5"), dec("1.5"), dec("0"));
    assert_eq!(render(&same.generate(&mut rng(0)).unwrap()), vec!["x=1.5"]);

    let differ = Sweep::range("x", dec("1.5"), dec("-2"), dec("0"));
    assert_eq!(
        render(&differ.generate(&mut rng(0)).unwrap()),
        vec!["x=1.5", "x=-2"]
    );
}

#[test]
fn test_range_tenths_are_exact() {
    let sweep = Sweep::range("x", dec("0.1"), dec("1.0"), dec("0.1"));
    let result = sweep.generate(&mut rng(0)).unwrap();

    assert_eq!(result.len(), 10);
    let last = result[9].get("x").and_then(ParamValue::as_decimal).unwrap();
    assert_eq!(last, dec("1"));
}

#[test]
fn test_range_never_exceeds_end() {
    let sweep = Sweep::range("x", dec("0"), dec("1"), dec("0.3"));
    let result = sweep.generate(&mut rng(0)).unwrap();

    assert_eq!(result.len(), 4);
    for assignment in &result {
        assert!(assignment.get("x").and_then(ParamValue::as_decimal).unwrap() <= dec("1"));
    }
}

#[test]
fn test_range_descending() {
    let sweep = Sweep::range("x", dec("1"), dec("0"), dec("0.4"));
    assert_eq!(
        render(&sweep.generate(&mut rng(0)).unwrap()),
        vec!["x=1", "x=0.6", "x=0.2"]
    );
}

#[test]
fn test_uniform_distribution() {
    let sweep = Sweep::uniform("u", 10.0, 20.0, 2000);
    let result = sweep.generate(&mut rng(17)).unwrap();
    assert_eq!(result.len(), 2000);

    let values: Vec<f64> = result
        .iter()
        .map(|a| a.get("u").and_then(ParamValue::as_f64).unwrap())
        .collect();
    assert!(values.iter().all(|v| (10.0..20.0).contains(v)));

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    assert_relative_eq!(mean, 15.0, epsilon = 0.5);
}

#[test]
fn test_uniform_same_source_same_draws() {
    let sweep = Sweep::uniform("u", 0.0, 1.0, 8);
    assert_eq!(
        sweep.generate(&mut rng(3)).unwrap(),
        sweep.generate(&mut rng(3)).unwrap()
    );
    assert_ne!(
        sweep.generate(&mut rng(3)).unwrap(),
        sweep.generate(&mut rng(4)).unwrap()
    );
}

#[test]
fn test_uniform_negative_count() {
    let sweep = Sweep::uniform("u", 0.0, 1.0, -3);
    assert!(matches!(
        sweep.generate(&mut rng(0)),
        Err(SweepError::InvalidArgument(_))
    ));
    assert_eq!(sweep.len_hint(), None);
}

#[test]
fn test_range_too_fine_fails_without_generating() {
    let sweep = sweepcase_rs::parse_sweep_expression("x=0:1e-20:1").unwrap();
    assert_eq!(sweep.len_hint(), None);
    match sweep.generate(&mut rng(0)) {
        Err(SweepError::InvalidArgument(msg)) => assert!(msg.contains("'x'")),
        other => panic!("Expected InvalidArgument error, got {:?}", other),
    }

    let sweep = Sweep::range("x", dec("0"), dec("1"), dec("1e-3"));
    assert_eq!(sweep.len_hint(), Some(1001));
    assert_eq!(sweep.generate(&mut rng(0)).unwrap().len(), 1001);
}
