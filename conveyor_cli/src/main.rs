//! # Conveyor CLI
//!
//! Terminal front end for belt conveyor cross-section and capacity checks.
//!
//! ```text
//! conveyor_cli k-factor --trough "35° trough" --surcharge 20
//! conveyor_cli capacity --width 1000 --trough 30 --surcharge 20 --speed 2.0 --density 1.6 --json
//! conveyor_cli table
//! conveyor_cli            # interactive prompts
//! ```

mod config;
mod error;
mod logging;
mod output;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use conveyor_core::calculations::{capacity, cross_section};
use conveyor_core::{parse_trough_label, BeltGeometry, CapacityInput, FlowState, KFactorTable};
use log::{debug, error, info};

use crate::config::{Config, Defaults};
use crate::error::CliError;

/// Belt conveyor cross-section and capacity calculator
#[derive(Parser)]
#[command(name = "conveyor_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Belt conveyor cross-section and capacity calculator", long_about = None)]
struct Cli {
    /// Config file (TOML); missing file means defaults
    #[arg(short, long, default_value = "conveyor.toml")]
    config: PathBuf,

    /// Alternate K-factor table (JSON)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Look up the K-factor for a trough and surcharge angle
    KFactor {
        /// Trough angle or label, e.g. "35" or "35° trough"
        #[arg(long)]
        trough: Option<String>,
        /// Surcharge angle in degrees
        #[arg(long)]
        surcharge: Option<f64>,
    },
    /// Load cross-section area
    Area {
        #[command(flatten)]
        belt: BeltArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mass-flow capacity
    Capacity {
        #[command(flatten)]
        belt: BeltArgs,
        #[command(flatten)]
        flow: FlowArgs,
        /// Conveyor label for the report
        #[arg(long, default_value = "")]
        label: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the K-factor reference table
    Table,
}

#[derive(Args)]
struct BeltArgs {
    /// Belt width in mm
    #[arg(long)]
    width: Option<f64>,
    /// Trough angle or label, e.g. "35" or "35° trough"
    #[arg(long)]
    trough: Option<String>,
    /// Surcharge angle in degrees
    #[arg(long)]
    surcharge: Option<f64>,
}

impl BeltArgs {
    fn geometry(&self, defaults: &Defaults) -> BeltGeometry {
        BeltGeometry::from_trough_label(
            self.width.unwrap_or(defaults.width_mm),
            self.trough.as_deref(),
            self.surcharge.unwrap_or(defaults.surcharge_deg),
            defaults.trough_deg,
        )
    }
}

#[derive(Args)]
struct FlowArgs {
    /// Belt speed in m/s
    #[arg(long)]
    speed: Option<f64>,
    /// Bulk density in t/m³
    #[arg(long)]
    density: Option<f64>,
}

impl FlowArgs {
    fn flow(&self, defaults: &Defaults) -> FlowState {
        FlowState::new(
            self.speed.unwrap_or(defaults.speed_mps),
            self.density.unwrap_or(defaults.density_tpm3),
        )
    }
}

fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        if let Some(calc) = e.calc_error() {
            if let Ok(json) = serde_json::to_string_pretty(calc) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let cfg = config::load_or_default(&cli.config)?;

    let level = logging::resolve_level(&[cli.log_level.as_deref(), cfg.log_level.as_deref()]);
    logging::init_logging(level, cfg.log_file().as_deref())?;
    debug!("Config: {:?}", cfg);

    let custom_table;
    let table = match cli.table.clone().or_else(|| cfg.table_path()) {
        Some(path) => {
            info!("Using K-factor table from {}", path.display());
            custom_table = KFactorTable::from_json_file(&path)?;
            &custom_table
        }
        None => KFactorTable::standard(),
    };

    match cli.command {
        Some(command) => execute(command, table, &cfg),
        None => interactive(table, &cfg),
    }
}

fn execute(command: Command, table: &KFactorTable, cfg: &Config) -> Result<(), CliError> {
    let defaults = &cfg.defaults;
    match command {
        Command::KFactor { trough, surcharge } => {
            let trough_deg = parse_trough_label(trough.as_deref(), defaults.trough_deg);
            let surcharge_deg = surcharge.unwrap_or(defaults.surcharge_deg);
            let k = table.k_factor(trough_deg, surcharge_deg)?;
            output::print_k_factor(trough_deg, surcharge_deg, k);
        }
        Command::Area { belt, json } => {
            let geometry = belt.geometry(defaults);
            let section = cross_section::calculate(&geometry, table)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&section)?);
            } else {
                output::print_cross_section(&section);
                output::print_warnings(&geometry.clamp_warnings());
            }
        }
        Command::Capacity { belt, flow, label, json } => {
            let input = CapacityInput {
                label,
                geometry: belt.geometry(defaults),
                flow: flow.flow(defaults),
            };
            let result = capacity::calculate_with_table(&input, table)?;
            info!("Capacity '{}': {:.1} t/h", result.label, result.mass_flow_tph);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output::print_capacity(&result);
            }
        }
        Command::Table => output::print_table(table)?,
    }
    Ok(())
}

fn prompt_line(prompt: &str) -> Result<String, CliError> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_f64(prompt: &str, default: f64) -> Result<f64, CliError> {
    let input = prompt_line(&format!("{} [{}]: ", prompt, default))?;
    Ok(input.parse().unwrap_or(default))
}

fn interactive(table: &KFactorTable, cfg: &Config) -> Result<(), CliError> {
    let d = &cfg.defaults;

    println!("Conveyor Capacity Calculator");
    println!("============================");
    println!();

    let width_mm = prompt_f64("Belt width (mm)", d.width_mm)?;
    let trough_label = prompt_line(&format!(
        "Trough angle or label, e.g. \"35° trough\" [{}]: ",
        d.trough_deg
    ))?;
    let surcharge_deg = prompt_f64("Surcharge angle (deg)", d.surcharge_deg)?;
    let speed_mps = prompt_f64("Belt speed (m/s)", d.speed_mps)?;
    let density_tpm3 = prompt_f64("Bulk density (t/m³)", d.density_tpm3)?;
    println!();

    let input = CapacityInput {
        label: "Interactive".to_string(),
        geometry: BeltGeometry::from_trough_label(
            width_mm,
            Some(trough_label.as_str()),
            surcharge_deg,
            d.trough_deg,
        ),
        flow: FlowState::new(speed_mps, density_tpm3),
    };
    let result = capacity::calculate_with_table(&input, table)?;
    output::print_capacity(&result);

    println!();
    println!("JSON Output:");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_capacity() {
        let cli = Cli::try_parse_from([
            "conveyor_cli",
            "capacity",
            "--width",
            "1000",
            "--trough",
            "35° trough",
            "--speed",
            "2.0",
            "--json",
        ])
        .unwrap();
        let Some(Command::Capacity { belt, flow, json, .. }) = cli.command else {
            panic!("expected capacity subcommand");
        };
        let defaults = Defaults::default();
        let geometry = belt.geometry(&defaults);
        assert_eq!(geometry.width_mm, 1000.0);
        assert_eq!(geometry.trough_deg, 35.0);
        assert_eq!(geometry.surcharge_deg, defaults.surcharge_deg);
        assert_eq!(flow.flow(&defaults).speed_mps, 2.0);
        assert_eq!(flow.flow(&defaults).density_tpm3, defaults.density_tpm3);
        assert!(json);
    }

    #[test]
    fn test_cli_without_subcommand_is_interactive() {
        let cli = Cli::try_parse_from(["conveyor_cli", "--log-level", "debug"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, PathBuf::from("conveyor.toml"));
    }

    #[test]
    fn test_unparseable_trough_uses_default() {
        let cli = Cli::try_parse_from(["conveyor_cli", "area", "--trough", "flat"]).unwrap();
        let Some(Command::Area { belt, .. }) = cli.command else {
            panic!("expected area subcommand");
        };
        let mut defaults = Defaults::default();
        defaults.trough_deg = 0.0;
        assert_eq!(belt.geometry(&defaults).trough_deg, 0.0);
    }

    #[test]
    fn test_execute_with_standard_table() {
        let args = ["conveyor_cli", "k-factor", "--trough", "20", "--surcharge", "20"];
        let cli = Cli::try_parse_from(args).unwrap();
        let command = cli.command.unwrap();
        assert!(execute(command, KFactorTable::standard(), &Config::default()).is_ok());
    }
}
