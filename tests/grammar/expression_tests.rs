//! Tests for sweep expression parsing

use crate::test_helpers::{dec, render, rng};
use sweepcase_rs::grammar::parse_sweep_expression;
use sweepcase_rs::sweep::{ParamValue, Sweep};
use sweepcase_rs::SweepError;

fn generated(expression: &str) -> Vec<String> {
    let sweep = parse_sweep_expression(expression).unwrap();
    render(&sweep.generate(&mut rng(0)).unwrap())
}

#[test]
fn test_list_of_strings() {
    let sweep = parse_sweep_expression("alpha=0.1,0.2,0.3").unwrap();
    match &sweep {
        Sweep::List { name, values } => {
            assert_eq!(name, "alpha");
            assert_eq!(
                values,
                &vec![
                    ParamValue::text("0.1"),
                    ParamValue::text("0.2"),
                    ParamValue::text("0.3")
                ]
            );
        }
        other => panic!("Expected list sweep, got {:?}", other),
    }
}

#[test]
fn test_range_start_increment_end() {
    let sweep = parse_sweep_expression("alpha=0:0.5:1").unwrap();
    match &sweep {
        Sweep::Range {
            start,
            end,
            increment,
            ..
        } => {
            assert_eq!(*start, dec("0"));
            assert_eq!(*increment, dec("0.5"));
            assert_eq!(*end, dec("1"));
        }
        other => panic!("Expected range sweep, got {:?}", other),
    }

    let values: Vec<_> = sweep
        .generate(&mut rng(0))
        .unwrap()
        .iter()
        .map(|a| a.get("alpha").and_then(ParamValue::as_decimal).unwrap())
        .collect();
    assert_eq!(values, vec![dec("0"), dec("0.5"), dec("1")]);
}

#[test]
fn test_range_scientific_and_negative() {
    assert_eq!(generated("x=-2:5e-1:-1"), vec!["x=-2", "x=-1.5", "x=-1.0"]);
}

#[test]
fn test_whitespace_around_sides() {
    assert_eq!(
        parse_sweep_expression("  beta =  7 ").unwrap(),
        Sweep::single("beta", "7")
    );
    assert_eq!(generated("beta = a , b"), vec!["beta=a", "beta=b"]);
}

#[test]
fn test_invalid_expressions() {
    let invalid = [
        "alpha",
        "a=1=2",
        "alpha=",
        " = 3",
        "alpha=1:two:3",
        "alpha=1,,3",
        "a b = 1:2:3",
        "a b = 1, 2 x",
    ];
    for arg in invalid {
        match parse_sweep_expression(arg) {
            Err(SweepError::InvalidSweepExpression { raw, .. }) => assert_eq!(raw, arg),
            other => panic!("Expected InvalidSweepExpression for '{}', got {:?}", arg, other),
        }
    }
}

#[test]
fn test_colons_outside_ranges_are_text() {
    assert_eq!(
        parse_sweep_expression("t=12:30").unwrap(),
        Sweep::single("t", "12:30")
    );
    assert_eq!(generated("alpha=1:2"), vec!["alpha=1:2"]);
    assert_eq!(generated("host=a:b:c:d"), vec!["host=a:b:c:d"]);
}

#[test]
fn test_parallel_list_column_major() {
    assert_eq!(
        generated("x y z = 1 a p, 2 b q"),
        vec!["x=1 y=a z=p", "x=2 y=b z=q"]
    );
}

#[test]
fn test_parallel_list_shared_boundaries() {
    assert_eq!(
        generated("x y = 1, 2, 3, 4 a, b, c, d"),
        vec!["x=1 y=a", "x=2 y=b", "x=3 y=c", "x=4 y=d"]
    );
}

#[test]
fn test_parallel_ranges_three_names() {
    assert_eq!(
        generated("a b c = 0:1:1 10:10:20 0.5:0.25:0.75"),
        vec!["a=0 b=10 c=0.5", "a=1 b=20 c=0.75"]
    );
}

#[test]
fn test_parallel_ranges_unequal_lengths_fail_on_generate() {
    let sweep = parse_sweep_expression("a b = 0:1:2 0:1:5").unwrap();
    assert!(matches!(
        sweep.generate(&mut rng(0)),
        Err(SweepError::LengthMismatch { .. })
    ));
}

#[test]
fn test_round_trip_through_structural_export() {
    for expression in ["a=1", "a=1,2,3", "a=0:0.25:1", "a b = 1 2, 3 4", "a b = 0:1:2 5:1:7"] {
        let sweep = parse_sweep_expression(expression).unwrap();
        let json = sweep.to_node().to_json().unwrap();
        let restored =
            Sweep::from_node(&sweepcase_rs::sweep::SweepNode::from_json(&json).unwrap()).unwrap();

        assert_eq!(restored, sweep);
        assert_eq!(
            render(&restored.generate(&mut rng(0)).unwrap()),
            generated(expression)
        );
    }
}
