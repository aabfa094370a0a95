use clap::{Parser, Subcommand};
use nozzle_simulation::utils::interpolation::linspace;
use nozzle_simulation::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nozzle")]
#[command(version = "0.1.0")]
#[command(about = "Bell nozzle performance, contour and staging calculator", long_about = None)]
struct Cli {
    /// Mission configuration (JSON); the reference engine is used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tabulate the standard atmosphere
    Atmosphere {
        /// Highest altitude (m)
        #[arg(long, default_value = "120000.0")]
        max_altitude: f64,

        /// Number of altitude samples
        #[arg(long, default_value = "25")]
        samples: usize,
    },
    /// Thrust along the configured flight segments
    Profile,
    /// Bell nozzle angles and contour for one expansion ratio
    Contour {
        /// Expansion ratio Ae/At
        #[arg(short, long)]
        expansion_ratio: f64,

        /// Length percentage of the 15° cone (60, 80 or 90)
        #[arg(short, long)]
        length_percentage: Option<u32>,

        /// Write the x,r point table to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Altitudes at which the optimal expansion ratio changes
    Stages {
        /// Highest altitude to scan (m)
        #[arg(long, default_value = "120000.0")]
        max_altitude: f64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => MissionConfig::from_file(path)?,
        None => MissionConfig::default(),
    };
    let engine = config.engine.engine();
    let mut telemetry = Telemetry::new();

    match cli.command {
        Commands::Atmosphere {
            max_altitude,
            samples,
        } => {
            let altitudes = linspace(0.0, max_altitude, samples);
            let profile = StandardAtmosphere::new().evaluate(&altitudes);
            telemetry.record_atmosphere(&altitudes, &profile);
        }
        Commands::Profile => {
            let profile =
                FlightProfile::evaluate(&engine, &StandardAtmosphere::new(), &config.segments)?;
            info!(
                samples = profile.samples.len(),
                mass_flow = engine.mass_flow_rate(),
                "flight profile evaluated"
            );
            telemetry.record_profile(&profile);
        }
        Commands::Contour {
            expansion_ratio,
            length_percentage,
            output,
        } => {
            let length = length_percentage
                .map(LengthPercentage::from_percent)
                .unwrap_or_else(|| config.contour.length());

            // CAD tables are drawn in millimetres
            let throat_radius_mm = engine.throat_radius() * 1000.0;
            let nozzle = BellNozzle::with_resolution(
                engine.gas.specific_heat_ratio,
                expansion_ratio,
                throat_radius_mm,
                length,
                config.contour.points_per_section,
            )?;
            telemetry.record_nozzle(&nozzle);

            if let Some(path) = output {
                export_point_table(&nozzle.contour, &path)?;
            }
        }
        Commands::Stages { max_altitude } => {
            let breakpoints = StageOptimizer::new(config.staging).find_breakpoints(
                engine.gas.specific_heat_ratio,
                engine.chamber_pressure,
                engine.throat_area,
                max_altitude,
            )?;
            telemetry.record_breakpoints(&breakpoints);
        }
    }

    telemetry.display_data();

    Ok(())
}
