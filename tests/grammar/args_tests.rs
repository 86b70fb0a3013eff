//! Tests for command-line argument classification

use crate::test_helpers::{render, rng};
use sweepcase_rs::grammar::SweepArgs;
use sweepcase_rs::SweepError;

#[test]
fn test_sweeps_and_switches_separated() {
    let args = SweepArgs::parse([
        "--runs",
        "3",
        "alpha=0:1:2",
        "-v",
        "beta gamma = 1 x, 2 y",
        "input.dat",
    ])
    .unwrap();

    assert_eq!(args.sweeps.len(), 2);
    assert_eq!(args.passthrough, vec!["--runs", "3", "-v", "input.dat"]);
}

#[test]
fn test_root_is_product_of_arguments() {
    let root = SweepArgs::parse(["alpha=0:1:2", "beta gamma = 1 x, 2 y"])
        .unwrap()
        .into_root();
    let result = root.generate(&mut rng(0)).unwrap();

    assert_eq!(result.len(), 6);
    assert_eq!(render(&result)[1], "alpha=0 beta=2 gamma=y");
}

#[test]
fn test_no_sweeps() {
    let args = SweepArgs::parse(Vec::<String>::new()).unwrap();
    assert!(args.is_empty());
    assert!(args.into_root().generate(&mut rng(0)).unwrap().is_empty());
}

#[test]
fn test_bad_expression_reports_argument() {
    match SweepArgs::parse(["ok=1", "bad=1:2"]) {
        Err(SweepError::InvalidSweepExpression { raw, .. }) => assert_eq!(raw, "bad=1:2"),
        other => panic!("Expected InvalidSweepExpression error, got {:?}", other),
    }
}
