use reactgas::{Simulation, SimulationConfig};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

/// Run a reactive ideal-gas simulation and log a summary of the run.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML scenario file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the scenario)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of steps (overrides the scenario; dt stays total_time / steps)
    #[arg(long)]
    steps: Option<usize>,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut cfg = match &args.config {
        Some(path) => SimulationConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(steps) = args.steps {
        cfg.steps = steps;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = load_config(&args)?;

    info!(
        "placing {} particles (r = {}, m = {}) in a {} box",
        cfg.num_particles, cfg.radius, cfg.mass, cfg.box_size
    );
    let mut sim = Simulation::new(&cfg)?;

    info!("running {} steps of dt = {}", cfg.steps, cfg.dt());
    let report = sim.run(cfg.steps)?;

    let last = sim.steps_taken();
    let start = sim.population(0)?;
    let end = sim.population(last)?;
    info!(
        "t = {}: {} elastic collisions, {} merges",
        sim.time(),
        report.elastic,
        report.merged
    );
    info!(
        "population A {} -> {}, B {} -> {}, dead {}",
        start.a, end.a, start.b, end.b, end.dead
    );
    info!(
        "kinetic energy {:.6e} -> {:.6e}, temperature {:.6e} K -> {:.6e} K",
        sim.total_energy(0)?,
        sim.total_energy(last)?,
        sim.temperature(0)?,
        sim.temperature(last)?
    );
    Ok(())
}
