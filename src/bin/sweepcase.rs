use clap::Parser;
use color_eyre::eyre::{bail, WrapErr};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use sweepcase_rs::experiment::{Experiment, ExperimentConfig};
use sweepcase_rs::grammar::SweepArgs;
use sweepcase_rs::seed::{SeedTable, SeedTableCoordinate};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sweepcase")]
#[command(about = "Expand parameter sweep expressions into seeded experiment cases")]
struct Args {
    /// Sweep expressions, e.g. `alpha=0:0.5:1` or `"a b = 1 x, 2 y"`
    sweeps: Vec<String>,

    /// Experiment name
    #[arg(short, long, default_value = "experiment")]
    name: String,

    /// Runs per case (overrides the config file)
    #[arg(short, long)]
    runs: Option<usize>,

    /// Experiment configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed table to read seeds from (JSON); a fresh one is drawn when omitted
    #[arg(long)]
    seed_table: Option<PathBuf>,

    /// Write the seed table used to this path
    #[arg(long)]
    save_seed_table: Option<PathBuf>,

    /// Seed table row to start from
    #[arg(long, requires = "column")]
    row: Option<usize>,

    /// Seed table column to read
    #[arg(long, requires = "row")]
    column: Option<usize>,

    /// Treat single values as sweep dimensions instead of overridable defaults
    #[arg(long)]
    strict: bool,

    /// Seed for uniform random sweeps and coordinate selection
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Print the sweep tree instead of the cases
    #[arg(long)]
    export_tree: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level);

    let parsed = SweepArgs::parse(&args.sweeps)?;
    if !parsed.passthrough.is_empty() {
        bail!(
            "not sweep expressions: {}",
            parsed.passthrough.join(" ")
        );
    }
    let root = parsed.into_root();

    if args.export_tree {
        println!("{}", root.to_node().to_json()?);
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load_json(path)
            .wrap_err_with(|| format!("loading config {}", path.display()))?,
        None => ExperimentConfig::default(),
    };
    if let Some(runs) = args.runs {
        config.num_runs = runs;
    }
    if args.strict {
        config.override_defaults = false;
    }

    let mut rng = match args.rng_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(rand::thread_rng())?,
    };

    let table = match &args.seed_table {
        Some(path) => SeedTable::load_json(path)
            .wrap_err_with(|| format!("loading seed table {}", path.display()))?,
        None => SeedTable::generate(config.seed_table_rows, config.seed_table_width, &mut rng)?,
    };
    config.seed_table_rows = table.rows();
    config.seed_table_width = table.width();

    if let (Some(row), Some(column)) = (args.row, args.column) {
        config.coordinate = Some(SeedTableCoordinate::new(row, column, table.width())?);
    }

    let experiment = Experiment::new(&args.name, root, &config, &mut rng)?;
    let cases = experiment.cases(&table, &mut rng)?;

    if let Some(path) = &args.save_seed_table {
        table
            .save_json(path)
            .wrap_err_with(|| format!("saving seed table {}", path.display()))?;
    }

    tracing::info!(
        row = experiment.coordinate().row(),
        column = experiment.coordinate().column(),
        "seed coordinate"
    );
    println!("{}", serde_json::to_string_pretty(&cases)?);
    Ok(())
}
