//! Offline primitive table generator.
//!
//! Builds the primitive table for each configured vehicle model and
//! writes the store files the planner loads at startup.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use marga_plan::config::PlannerConfig;
use marga_plan::primitive::{store, PrimitiveTable};
use marga_plan::ConfigError;

#[derive(Parser, Debug)]
#[command(name = "primgen", about = "Generate motion primitive table files")]
struct Args {
    /// Planner configuration file (YAML); defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for .mprm files
    #[arg(short, long, default_value = "tables")]
    out: PathBuf,

    /// Generate only this model (default: all configured models)
    #[arg(short, long)]
    model: Option<String>,
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let config = match &args.config {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };
    let disc = config.discretizer();
    let registry = config.build_registry();

    std::fs::create_dir_all(&args.out)?;

    let names: Vec<&str> = match &args.model {
        Some(name) => vec![name.as_str()],
        None => registry.names(),
    };

    for name in names {
        let model = registry
            .get(name)
            .ok_or_else(|| ConfigError::UnknownModel(name.to_string()))?;
        let table = PrimitiveTable::build(model, &disc)?;
        let path = args.out.join(store::table_file_name(name, &disc));
        store::save(&table, &path)?;
        info!(
            "{}: {} primitives across {} headings -> {}",
            name,
            table.len(),
            disc.heading_count(),
            path.display()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("primgen failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
