mod table;
mod tui;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::{Args, Parser};
use rms_planner_core::{
    load_pool_snapshot, parse_scenario, FileScenarioRepository, PlannerConfig, PlannerService, ResourcePool,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rms-planner")]
#[command(about = "What-if capacity planning for rental equipment pools", long_about = None)]
struct Cli {
    /// Directory holding scenarios.json and config.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a scenario (usage: add 10 2024-01-01 2024-01-05 Spring expo, or q:10 s:today e:+3d)
    Add {
        /// Accept zero/negative quantities and end dates before start dates
        #[arg(long)]
        force: bool,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// List the working set of scenarios
    List,
    /// Remove a scenario by id prefix
    Remove { id: String },
    /// Drop every scenario from the working set
    Clear,
    /// Show the impact of the working set on a pool
    Impact {
        #[command(flatten)]
        pool: PoolArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the interactive planner
    Tui {
        #[command(flatten)]
        pool: PoolArgs,
    },
}

#[derive(Args, Default)]
struct PoolArgs {
    /// Total units of the item in existence
    #[arg(long, requires = "available", conflicts_with = "pool")]
    total: Option<u64>,
    /// Units currently free
    #[arg(long, requires = "total", conflicts_with = "pool")]
    available: Option<u64>,
    /// JSON pool snapshot file
    #[arg(long)]
    pool: Option<PathBuf>,
}

impl PoolArgs {
    /// Flags first, then a snapshot file, then `default_pool` from config.json.
    fn resolve(&self, config: &PlannerConfig) -> Result<Option<ResourcePool>> {
        if let (Some(total), Some(available)) = (self.total, self.available) {
            return Ok(Some(ResourcePool::new(total, available)));
        }
        if let Some(path) = &self.pool {
            return load_pool_snapshot(path).map(Some);
        }
        Ok(config.default_pool.clone())
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = PlannerConfig::load(cli.data_dir)?;
    let service = PlannerService::new(FileScenarioRepository::new(&config.data_dir)?);
    debug!(data_dir = %config.data_dir.display(), "starting");

    match cli.command {
        Some(Commands::Add { force, args }) => {
            let today = Local::now().date_naive();
            let scenario = parse_scenario(&args, today, force)?;
            let created = service.add_scenario(scenario)?;
            println!("Scenario added: {} (ID: {})", created.label.as_deref().unwrap_or("-"), created.short_id());
            println!("  Quantity: {}", created.quantity);
            println!("  Period:   {} .. {} ({} days)", created.start, created.end, created.days());
        }
        Some(Commands::List) => {
            let scenarios = service.list_scenarios()?;
            if scenarios.is_empty() {
                println!("No scenarios in the working set.");
            } else {
                table::print_scenarios(&scenarios);
            }
        }
        Some(Commands::Remove { id }) => {
            let removed = service.remove_scenario(&id)?;
            println!("Scenario removed: {} (ID: {})", removed.label.as_deref().unwrap_or("-"), removed.short_id());
        }
        Some(Commands::Clear) => {
            service.clear()?;
            println!("Working set cleared.");
        }
        Some(Commands::Impact { pool, json }) => {
            let pool = pool.resolve(&config)?.ok_or_else(|| {
                anyhow!("No pool snapshot: pass --total and --available, --pool FILE, or set default_pool in config.json")
            })?;
            let report = service.evaluate(&pool)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                table::print_report(&report);
            }
        }
        Some(Commands::Tui { pool }) => {
            let pool = pool.resolve(&config)?.unwrap_or_default();
            tui::run(service, pool)?;
        }
        None => {
            let pool = PoolArgs::default().resolve(&config)?.unwrap_or_default();
            tui::run(service, pool)?;
        }
    }
    Ok(())
}
