//! MECH - simulador de mecanismo
//! Roda os controladores contra uma planta sintética, tick a tick

mod sim;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sim::{EffectiveConfig, Plant, SimConfig, Simulation};

#[derive(Parser)]
#[command(name = "mech")]
#[command(author = "MECH Contributors")]
#[command(version = "2026.10.15")]
#[command(about = "MECH - bounded move and active hold simulator", long_about = None)]
struct Cli {
    /// JSON file with movement, hold and actuator configuration
    #[arg(short, long, global = true, value_name = "FILE", env = "MECH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move to a target, then optionally hold there
    Simulate {
        /// Target position
        #[arg(short, long)]
        target: f64,

        /// Starting position of the plant
        #[arg(short, long, default_value_t = 0.0)]
        start: f64,

        /// Tick budget for the move
        #[arg(long, default_value_t = 500)]
        ticks: usize,

        /// Hold ticks after the move finishes
        #[arg(long, default_value_t = 0)]
        hold_ticks: usize,

        /// Position change per unit of output per tick
        #[arg(long, default_value_t = 1.0)]
        gain: f64,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration and tuning defaults as JSON
    Config,
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mech=info,mech_control=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Config => {
            let effective = EffectiveConfig::new(config);
            println!("{}", serde_json::to_string_pretty(&effective)?);
        }
        Commands::Simulate {
            target,
            start,
            ticks,
            hold_ticks,
            gain,
            json,
        } => {
            let mut simulation = Simulation::new(&config, Plant::new(start, gain))?;
            let report = simulation.run(target, ticks, hold_ticks)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("state:    {:?}", report.snapshot.state);
                println!("position: {:.3}", report.final_position);
                println!("ticks:    {} move / {} hold", report.move_ticks, report.hold_ticks);
            }
        }
    }

    Ok(())
}
