//! Tests for seed tables and coordinates

use crate::test_helpers::rng;
use sweepcase_rs::seed::{SeedTable, SeedTableCoordinate};
use sweepcase_rs::SweepError;

fn counting_table(rows: i64, width: i64) -> SeedTable {
    SeedTable::from_rows(
        (0..rows)
            .map(|r| (0..width).map(|c| r * 100 + c).collect())
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_same_coordinate_same_seeds() {
    let table = SeedTable::generate(50, 8, &mut rng(21)).unwrap();
    let coord = SeedTableCoordinate::new(12, 5, table.width()).unwrap();

    let first = table.next_seeds(coord, 3).unwrap();
    let second = table.next_seeds(coord, 3).unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    assert_eq!(first[0], table.get(12, 5).unwrap());
    assert_eq!(first[2], table.get(14, 5).unwrap());
}

#[test]
fn test_reads_to_last_row() {
    let table = counting_table(4, 2);
    let coord = SeedTableCoordinate::new(1, 1, 2).unwrap();
    assert_eq!(table.next_seeds(coord, 3).unwrap(), vec![101, 201, 301]);
}

#[test]
fn test_past_last_row_is_exhausted() {
    let table = counting_table(4, 2);
    let coord = SeedTableCoordinate::new(1, 1, 2).unwrap();
    assert!(matches!(
        table.next_seeds(coord, 4),
        Err(SweepError::SeedTableExhausted { .. })
    ));
    assert!(table.next_seeds(coord.advance(3), 1).is_err());
}

#[test]
fn test_table_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seeds.json");

    let table = SeedTable::generate(16, 4, &mut rng(8)).unwrap();
    table.save_json(&path).unwrap();
    let loaded = SeedTable::load_json(&path).unwrap();

    let coord = SeedTableCoordinate::new(3, 2, 4).unwrap();
    assert_eq!(loaded.next_seeds(coord, 5).unwrap(), table.next_seeds(coord, 5).unwrap());
}

#[test]
fn test_load_missing_file() {
    assert!(matches!(
        SeedTable::load_json("/nonexistent/seeds.json"),
        Err(SweepError::IoError(_))
    ));
}

#[test]
fn test_configured_dimensions_that_overflow_are_rejected() {
    let json = format!(
        r#"{{"seed_table_rows": {}, "seed_table_width": 2}}"#,
        usize::MAX / 2 + 1
    );
    let config = sweepcase_rs::ExperimentConfig::from_json(&json).unwrap();
    assert!(matches!(
        SeedTable::generate(config.seed_table_rows, config.seed_table_width, &mut rng(0)),
        Err(SweepError::InvalidArgument(_))
    ));
}
