//! Ripple command-line interface.
//!
//! Run scattering computations from TOML configuration files:
//! ```sh
//! ripple run job.toml
//! ripple converge job.toml
//! ripple validate job.toml
//! ```

mod config;
mod export;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ripple")]
#[command(about = "Ripple: 2D dielectric-cavity scattering-matrix solver")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one resolution and export the scattering matrix.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the mesh-refinement convergence study.
    Converge {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without solving.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Ripple cavity-scattering solver");
            println!("===============================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());
            runner::run_solve(&job, &output)?;
        }
        Commands::Converge { config, output } => {
            println!("Ripple convergence study");
            println!("========================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());
            runner::run_convergence(&job, &output)?;
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            println!("Configuration OK: {}", config.display());
            println!(
                "  cavity: r0={}, nc={}, no={}",
                job.cavity.radius, job.cavity.n_core, job.cavity.n_outside
            );
            println!(
                "  simulation: k={}, Mmax={}, N={}, {} convergence sizes",
                job.simulation.wavenumber,
                job.simulation.max_order,
                job.simulation.points,
                job.simulation.mesh_sizes.len()
            );
        }
    }

    Ok(())
}
