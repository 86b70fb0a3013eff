//! # sweepcase-rs
//!
//! `sweepcase-rs` turns a declarative description of parameter sweeps into the
//! ordered list of experiment cases a batch job runner executes, each with
//! reproducible random seeds for its repeated runs.
//!
//! The library provides:
//! - A typed sweep tree: single values, lists, exact-decimal ranges and uniform
//!   random samples, combined by cartesian product or positional zip
//! - A compact command-line grammar for sweeps (`alpha=0:0.5:1`, `a b = 1 x, 2 y`)
//! - A seed table and coordinate scheme that reproduces earlier runs exactly
//! - A structural export of sweep trees for persistence
//!
//! ## Basic Usage
//!
//! ```
//! use rand::SeedableRng;
//! use sweepcase_rs::experiment::{Experiment, ExperimentConfig};
//! use sweepcase_rs::grammar::SweepArgs;
//! use sweepcase_rs::seed::{SeedTable, SeedTableCoordinate};
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
//! let root = SweepArgs::parse(["solver=cg,gmres", "tol=0.1:0.1:0.3"])
//!     .unwrap()
//!     .into_root();
//!
//! let config = ExperimentConfig::default()
//!     .with_num_runs(2)
//!     .with_coordinate(SeedTableCoordinate::new(0, 3, 16).unwrap());
//! let table = SeedTable::generate(config.seed_table_rows, config.seed_table_width, &mut rng).unwrap();
//! let experiment = Experiment::new("tuning", root, &config, &mut rng).unwrap();
//!
//! let cases = experiment.cases(&table, &mut rng).unwrap();
//! assert_eq!(cases.len(), 6);
//! assert!(cases.iter().all(|case| case.seeds.len() == 2));
//! ```

// Public modules
pub mod error;

pub mod experiment;
pub mod grammar;
pub mod seed;
pub mod sweep;

// Re-exports for convenience
pub use error::{Result, SweepError};
pub use experiment::{Experiment, ExperimentCase, ExperimentConfig};
pub use grammar::parse_sweep_expression;
pub use seed::{SeedTable, SeedTableCoordinate};
pub use sweep::{Assignment, GenerationMode, ParamValue, Sweep};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
