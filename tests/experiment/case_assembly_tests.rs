//! End-to-end tests: expressions to seeded cases

use crate::test_helpers::rng;
use std::collections::HashSet;
use sweepcase_rs::experiment::{assemble_cases, Experiment, ExperimentConfig};
use sweepcase_rs::grammar::SweepArgs;
use sweepcase_rs::seed::{SeedTable, SeedTableCoordinate};
use sweepcase_rs::sweep::Sweep;
use sweepcase_rs::SweepError;

fn root() -> Sweep {
    SweepArgs::parse(["solver=cg", "tol=0.1:0.1:0.3", "mesh order = coarse 1, fine 2"])
        .unwrap()
        .into_root()
}

#[test]
fn test_no_two_cases_share_a_seed() {
    let table = SeedTable::generate(200, 4, &mut rng(1)).unwrap();
    let config = ExperimentConfig::default()
        .with_num_runs(5)
        .with_coordinate(SeedTableCoordinate::new(10, 2, 4).unwrap());
    let experiment = Experiment::new("tol-study", root(), &config, &mut rng(2)).unwrap();

    let cases = experiment.cases(&table, &mut rng(3)).unwrap();
    assert_eq!(cases.len(), 6);

    let mut positions = HashSet::new();
    for (i, case) in cases.iter().enumerate() {
        assert_eq!(case.index, i);
        assert_eq!(case.seeds.len(), 5);
        for (run, seed) in case.seeds.iter().enumerate() {
            let row = 10 + i * 5 + run;
            assert_eq!(Some(*seed), table.get(row, 2));
            assert!(positions.insert(row));
        }
        assert_eq!(case.assignment.get("solver").unwrap().to_string(), "cg");
    }
}

#[test]
fn test_rerun_from_saved_experiment_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let table_path = dir.path().join("seeds.json");
    let experiment_path = dir.path().join("experiment.json");

    let table = SeedTable::generate(100, 16, &mut rng(4)).unwrap();
    table.save_json(&table_path).unwrap();

    let root = Sweep::multiplicative(vec![root(), Sweep::uniform("noise", 0.0, 1.0, 2)]);
    let config = ExperimentConfig::default()
        .with_num_runs(2)
        .with_coordinate(SeedTableCoordinate::new(0, 7, 16).unwrap());
    let experiment = Experiment::new("rerun", root, &config, &mut rng(5)).unwrap();
    experiment.save_json(&experiment_path).unwrap();
    let original = experiment.cases(&table, &mut rng(6)).unwrap();

    let reloaded = Experiment::load_json(&experiment_path).unwrap();
    let rerun = reloaded
        .cases(&SeedTable::load_json(&table_path).unwrap(), &mut rng(6))
        .unwrap();

    assert_eq!(rerun, original);
    assert_eq!(
        serde_json::to_string(&rerun).unwrap(),
        serde_json::to_string(&original).unwrap()
    );
}

#[test]
fn test_strict_mode_treats_single_values_as_dimensions() {
    let table = SeedTable::generate(10, 2, &mut rng(0)).unwrap();
    let root = Sweep::multiplicative(vec![
        Sweep::single("a", "default"),
        SweepArgs::parse(["a=1,2"]).unwrap().into_root(),
    ]);
    let coordinate = SeedTableCoordinate::new(0, 0, 2).unwrap();

    let overriding = ExperimentConfig::default().with_coordinate(coordinate);
    let experiment = Experiment::new("e", root.clone(), &overriding, &mut rng(0)).unwrap();
    assert_eq!(experiment.cases(&table, &mut rng(0)).unwrap().len(), 2);

    let strict = overriding.with_override_defaults(false);
    let experiment = Experiment::new("e", root, &strict, &mut rng(0)).unwrap();
    assert!(matches!(
        experiment.cases(&table, &mut rng(0)),
        Err(SweepError::DuplicateParameter { .. })
    ));
}

#[test]
fn test_assemble_cases_directly() {
    let table = SeedTable::from_rows(vec![vec![7], vec![8], vec![9]]).unwrap();
    let assignments = SweepArgs::parse(["x=1,2,3"])
        .unwrap()
        .into_root()
        .generate(&mut rng(0))
        .unwrap();

    let cases = assemble_cases(assignments, &table, SeedTableCoordinate::new(0, 0, 1).unwrap(), 1)
        .unwrap();
    let seeds: Vec<i64> = cases.iter().flat_map(|c| c.seeds.clone()).collect();
    assert_eq!(seeds, vec![7, 8, 9]);
}

#[test]
fn test_invalid_config_rejected() {
    let config = ExperimentConfig::default().with_num_runs(0);
    assert!(matches!(
        Experiment::new("e", root(), &config, &mut rng(0)),
        Err(SweepError::InvalidArgument(_))
    ));
}
