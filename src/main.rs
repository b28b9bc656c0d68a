use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use log::{error, info};

use slabmd::{
    output::{FileRecorder, NullRecorder, Recorder},
    parallel::Communicator,
    Launcher, Result, Simulation, SimulationConfig,
};

/// Molecular dynamics of an electrolyte confined between two charged walls
#[derive(Parser)]
#[command(name = "slabmd", version)]
#[command(about = "Parallel Nose-Hoover chain MD of ions in a slab", long_about = None)]
struct Cli {
    /// JSON configuration file
    config: PathBuf,
    /// Number of worker threads, overriding the configuration
    #[arg(short, long)]
    workers: Option<usize>,
    /// Output directory, overriding the configuration
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Log the full run banner and finer progress
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: Cli) -> Result<()> {
    let mut config = SimulationConfig::load(&cli.config)?;
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    config.control.verbose |= cli.verbose;

    let system = config.build()?;
    info!(
        "Built {} ions in a {} x {} x {} slab",
        system.ions.num_ions(),
        system.interface.lx(),
        system.interface.ly(),
        system.interface.lz()
    );

    let launcher = Launcher::new(config.workers)?;
    info!("Running on {} workers", launcher.num_workers());
    let output_dir = &config.output_dir;
    let summaries = launcher.run(|worker| {
        let mut recorder: Box<dyn Recorder> = if worker.is_reporter() {
            Box::new(FileRecorder::create(output_dir)?)
        } else {
            Box::new(NullRecorder)
        };
        let mut simulation = Simulation::new(system.clone(), worker)?;
        simulation.run(recorder.as_mut())
    })?;

    if let Some(energy) = summaries.first().and_then(|s| s.last_energy.as_ref()) {
        info!(
            "Final energies: kinetic {:.6}, potential {:.6}, extended {:.6}",
            energy.kinetic,
            energy.potential_energy(),
            energy.extended()
        );
    }
    info!("Results written to {}", output_dir.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
