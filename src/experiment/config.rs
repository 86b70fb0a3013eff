//! Configuration options for experiment case generation.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Result, SweepError};
use crate::seed::SeedTableCoordinate;
use crate::sweep::GenerationMode;

/// Configuration for building an [`Experiment`](super::Experiment).
///
/// Fields missing from a JSON document take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Number of seeded runs per case. Default: 1
    pub num_runs: usize,

    /// Rows in the seed table. Default: 10000
    pub seed_table_rows: usize,

    /// Columns in the seed table. Default: 16
    pub seed_table_width: usize,

    /// Treat single-value children of the root as overridable defaults. Default: true
    pub override_defaults: bool,

    /// Explicit seed coordinate, replacing the random pick. Default: None
    pub coordinate: Option<SeedTableCoordinate>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            num_runs: 1,
            seed_table_rows: 10_000,
            seed_table_width: 16,
            override_defaults: true,
            coordinate: None,
        }
    }
}

impl ExperimentConfig {
    pub fn with_num_runs(mut self, num_runs: usize) -> Self {
        self.num_runs = num_runs;
        self
    }

    pub fn with_coordinate(mut self, coordinate: SeedTableCoordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn with_override_defaults(mut self, override_defaults: bool) -> Self {
        self.override_defaults = override_defaults;
        self
    }

    /// Generation mode implied by `override_defaults`.
    pub fn mode(&self) -> GenerationMode {
        if self.override_defaults {
            GenerationMode::OverrideDefaults
        } else {
            GenerationMode::Strict
        }
    }

    /// Check the configuration for values that can never produce cases.
    pub fn validate(&self) -> Result<()> {
        if self.num_runs == 0 {
            return Err(SweepError::InvalidArgument(
                "num_runs must be at least 1".to_string(),
            ));
        }
        if self.seed_table_rows == 0 || self.seed_table_width == 0 {
            return Err(SweepError::InvalidArgument(format!(
                "seed table must be non-empty, got {}x{}",
                self.seed_table_rows, self.seed_table_width
            )));
        }
        if let Some(coordinate) = self.coordinate {
            SeedTableCoordinate::new(coordinate.row(), coordinate.column(), self.seed_table_width)?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: ExperimentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }
}
