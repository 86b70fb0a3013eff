//! # Experiments and Cases
//!
//! An [`Experiment`] ties a root sweep to a run count and a seed coordinate.
//! [`Experiment::cases`] turns it into the ordered list of [`ExperimentCase`]s a
//! job runner executes, each carrying its own run seeds.
//!
//! The coordinate is fixed when the experiment is created and persisted with it,
//! so reloading an experiment and assembling again yields identical cases.

pub mod config;

pub use config::ExperimentConfig;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

use crate::error::{Result, SweepError};
use crate::seed::{SeedTable, SeedTableCoordinate};
use crate::sweep::{Assignment, GenerationMode, Sweep, SweepNode};

/// One resolved assignment plus its run seeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentCase {
    /// Position in the experiment's case list
    pub index: usize,

    pub assignment: Assignment,

    /// One seed per run
    pub seeds: Vec<i64>,
}

/// Attach seeds to assignments.
///
/// Each case takes the next `num_runs` seeds down the coordinate's column, so
/// no two cases share a seed. Any exhaustion fails the whole assembly.
pub fn assemble_cases(
    assignments: Vec<Assignment>,
    table: &SeedTable,
    coordinate: SeedTableCoordinate,
    num_runs: usize,
) -> Result<Vec<ExperimentCase>> {
    let mut cursor = coordinate;
    let mut cases = Vec::with_capacity(assignments.len());
    for (index, assignment) in assignments.into_iter().enumerate() {
        let seeds = table.next_seeds(cursor, num_runs)?;
        cursor = cursor.advance(num_runs);
        cases.push(ExperimentCase {
            index,
            assignment,
            seeds,
        });
    }
    Ok(cases)
}

/// A named sweep with its run count and seed coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ExperimentRecord", try_from = "ExperimentRecord")]
pub struct Experiment {
    name: String,
    root: Sweep,
    num_runs: usize,
    coordinate: SeedTableCoordinate,
    mode: GenerationMode,
}

impl Experiment {
    /// Create an experiment.
    ///
    /// The coordinate comes from `config.coordinate` when set, otherwise it is
    /// drawn from `rng` within the configured table dimensions.
    pub fn new<R: Rng + ?Sized>(
        name: &str,
        root: Sweep,
        config: &ExperimentConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let coordinate = match config.coordinate {
            Some(coordinate) => coordinate,
            None => SeedTableCoordinate::random(
                config.seed_table_rows,
                config.seed_table_width,
                rng,
            )?,
        };

        Ok(Self {
            name: name.to_string(),
            root,
            num_runs: config.num_runs,
            coordinate,
            mode: config.mode(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Sweep {
        &self.root
    }

    pub fn num_runs(&self) -> usize {
        self.num_runs
    }

    pub fn coordinate(&self) -> SeedTableCoordinate {
        self.coordinate
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Generate the root sweep and seed every case.
    ///
    /// `rng` feeds uniform random leaves only; seeds come from `table`.
    pub fn cases<R: Rng + ?Sized>(
        &self,
        table: &SeedTable,
        rng: &mut R,
    ) -> Result<Vec<ExperimentCase>> {
        let assignments = self.root.generate_with_mode(rng, self.mode)?;
        let cases = assemble_cases(assignments, table, self.coordinate, self.num_runs)?;
        info!(
            experiment = %self.name,
            cases = cases.len(),
            runs = self.num_runs,
            row = self.coordinate.row(),
            column = self.coordinate.column(),
            "assembled experiment cases"
        );
        Ok(cases)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save the experiment to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Load an experiment from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }
}

/// Persisted form of an [`Experiment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExperimentRecord {
    name: String,
    root: SweepNode,
    num_runs: usize,
    coordinate: SeedTableCoordinate,
    override_defaults: bool,
}

impl From<Experiment> for ExperimentRecord {
    fn from(experiment: Experiment) -> Self {
        Self {
            name: experiment.name,
            root: experiment.root.to_node(),
            num_runs: experiment.num_runs,
            coordinate: experiment.coordinate,
            override_defaults: experiment.mode == GenerationMode::OverrideDefaults,
        }
    }
}

impl TryFrom<ExperimentRecord> for Experiment {
    type Error = SweepError;

    fn try_from(record: ExperimentRecord) -> Result<Self> {
        if record.num_runs == 0 {
            return Err(SweepError::InvalidArgument(
                "num_runs must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            name: record.name,
            root: Sweep::from_node(&record.root)?,
            num_runs: record.num_runs,
            coordinate: record.coordinate,
            mode: if record.override_defaults {
                GenerationMode::OverrideDefaults
            } else {
                GenerationMode::Strict
            },
        })
    }
}
