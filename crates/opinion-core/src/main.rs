//! Opinion dynamics simulation runner
//!
//! Loads a run configuration, applies command line overrides, runs the
//! simulation to completion and writes a JSON run report.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use opinion_core::config::DEFAULT_CONFIG_PATH;
use opinion_core::output::DEFAULT_REPORT_PATH;
use opinion_core::{default_config_toml, write_report, SimConfig, SimError, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "opinion_sim")]
#[command(about = "Reputation-weighted opinion dynamics on a random network")]
struct Args {
    /// TOML run configuration (defaults to opinion.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of agents
    #[arg(long)]
    population: Option<usize>,

    /// Number of ticks to simulate
    #[arg(long)]
    steps: Option<u64>,

    /// Target average network degree
    #[arg(long)]
    avg_degree: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Reputation step on agreement/disagreement
    #[arg(long)]
    delta: Option<f64>,

    /// Per-tick reputation decay rate
    #[arg(long)]
    decay: Option<f64>,

    /// Lower reputation bound
    #[arg(long)]
    rep_min: Option<f64>,

    /// Upper reputation bound
    #[arg(long)]
    rep_max: Option<f64>,

    /// Fermi imitation sensitivity
    #[arg(long)]
    beta: Option<f64>,

    /// Interval between metric samples (in ticks)
    #[arg(long)]
    record_every: Option<u64>,

    /// Where to write the JSON run report
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    output: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

impl Args {
    fn load_config(&self) -> Result<SimConfig, SimError> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                SimConfig::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => SimConfig::default(),
        };

        if let Some(population) = self.population {
            config.simulation.population = population;
        }
        if let Some(steps) = self.steps {
            config.simulation.steps = steps;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(record_every) = self.record_every {
            config.simulation.record_every = record_every;
        }
        if let Some(avg_degree) = self.avg_degree {
            config.network.avg_degree = avg_degree;
        }
        if let Some(delta) = self.delta {
            config.phases.delta = delta;
        }
        if let Some(decay) = self.decay {
            config.phases.decay = decay;
        }
        if let Some(rep_min) = self.rep_min {
            config.phases.rep_min = rep_min;
        }
        if let Some(rep_max) = self.rep_max {
            config.phases.rep_max = rep_max;
        }
        if let Some(beta) = self.beta {
            config.phases.beta = beta;
        }

        Ok(config)
    }
}

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return Ok(());
    }

    let config = args.load_config()?;
    info!(
        population = config.simulation.population,
        steps = config.simulation.steps,
        avg_degree = config.network.avg_degree,
        seed = config.simulation.seed,
        "configuration loaded"
    );

    let mut simulation = Simulation::new(config)?;
    simulation.run();

    if let Some(last) = simulation.history().last() {
        println!(
            "Step {:>5}: opinion-1 fraction {:.3}, consensus {:.3}, mean reputation {:.3}",
            last.step, last.opinion_fraction, last.consensus, last.mean_reputation
        );
    } else {
        warn!("no metrics recorded; run shorter than the recording interval");
    }

    let report = simulation.into_report();
    write_report(&args.output, &report)?;
    println!("Wrote {} ({} samples)", args.output.display(), report.metrics.len());

    Ok(())
}
