use clap::{Args, Parser, Subcommand};
use rc_app::{
    AppConfig, AppResult, CapillaryReport, CapillaryRequest, CycleReport, CycleRequest, DomeReport,
    PropertyRegistry, RefrigerantReport, evaluate_cycle, list_refrigerants, load_config,
    sample_dome, size_capillary,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(about = "Refrigeration cycle evaluator and capillary sizer", long_about = None)]
struct Cli {
    /// Configuration YAML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Property-table dataset (overrides the configuration)
    #[arg(long, global = true)]
    tables: Option<PathBuf>,
    /// Capillary constants dataset (overrides the configuration)
    #[arg(long, global = true)]
    constants: Option<PathBuf>,
    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CycleArgs {
    /// Refrigerant id (e.g. R134a, R-454B)
    #[arg(short, long, default_value = "R134a")]
    refrigerant: String,
    /// Evaporating temperature [K]
    #[arg(long, default_value_t = 243.15)]
    evap_temp: f64,
    /// Condensing temperature [K]
    #[arg(long, default_value_t = 313.15)]
    cond_temp: f64,
    /// Superheat [K]
    #[arg(long, default_value_t = 0.0)]
    superheat: f64,
    /// Subcooling [K]
    #[arg(long, default_value_t = 0.0)]
    subcooling: f64,
}

impl From<CycleArgs> for CycleRequest {
    fn from(args: CycleArgs) -> Self {
        CycleRequest {
            refrigerant: args.refrigerant,
            evap_temp: args.evap_temp,
            cond_temp: args.cond_temp,
            superheat: args.superheat,
            subcooling: args.subcooling,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List refrigerants that can be evaluated
    Refrigerants {
        /// Only show ids containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Solve the cycle states and COP
    Cycle {
        #[command(flatten)]
        cycle: CycleArgs,
    },
    /// Sample the saturation dome around the operating span
    Dome {
        #[command(flatten)]
        cycle: CycleArgs,
        /// Number of temperature samples (defaults to the configured count)
        #[arg(long)]
        samples: Option<usize>,
    },
    /// Size a capillary tube for the cycle
    Capillary {
        #[command(flatten)]
        cycle: CycleArgs,
        /// Rated cooling capacity
        #[arg(long, default_value_t = 1000.0)]
        power: f64,
        /// Capacity unit: W, HP, kcal/h, Btu/h
        #[arg(long, default_value = "W")]
        unit: String,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = build_registry(&cli)?;
    let json = cli.json;

    match cli.command {
        Commands::Refrigerants { filter } => cmd_refrigerants(&registry, filter.as_deref(), json),
        Commands::Cycle { cycle } => cmd_cycle(&registry, cycle.into(), json),
        Commands::Dome { cycle, samples } => cmd_dome(&registry, cycle.into(), samples, json),
        Commands::Capillary { cycle, power, unit } => {
            let request = CapillaryRequest {
                cycle: cycle.into(),
                power,
                power_unit: unit,
            };
            cmd_capillary(&registry, &request, json)
        }
    }
}

fn build_registry(cli: &Cli) -> AppResult<PropertyRegistry> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(tables) = &cli.tables {
        config.tables_path = Some(tables.clone());
    }
    if let Some(constants) = &cli.constants {
        config.constants_path = Some(constants.clone());
    }
    debug!(
        tables = ?config.tables_path,
        constants = ?config.constants_path,
        "configuration resolved"
    );
    PropertyRegistry::load(&config)
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_refrigerants(
    registry: &PropertyRegistry,
    filter: Option<&str>,
    json: bool,
) -> AppResult<()> {
    let list: Vec<RefrigerantReport> = list_refrigerants(registry, filter);

    if json {
        return print_json(&list);
    }
    if list.is_empty() {
        println!("No refrigerants found");
    }
    for r in &list {
        println!("  {:<10} {:<8} {}", r.id, r.source, r.display_name);
    }
    Ok(())
}

fn cmd_cycle(registry: &PropertyRegistry, request: CycleRequest, json: bool) -> AppResult<()> {
    let report = evaluate_cycle(registry, &request)?;
    if json {
        return print_json(&report);
    }
    print_cycle(&report);
    Ok(())
}

fn cmd_dome(
    registry: &PropertyRegistry,
    request: CycleRequest,
    samples: Option<usize>,
    json: bool,
) -> AppResult<()> {
    let dome = sample_dome(registry, &request, samples)?;
    if json {
        return print_json(&dome);
    }
    print_dome(&dome);
    Ok(())
}

fn cmd_capillary(
    registry: &PropertyRegistry,
    request: &CapillaryRequest,
    json: bool,
) -> AppResult<()> {
    let report = size_capillary(registry, request)?;
    if json {
        return print_json(&report);
    }
    print_capillary(&report);
    Ok(())
}

fn print_cycle(report: &CycleReport) {
    println!(
        "{} ({}), Te = {:.2} K, Tc = {:.2} K, superheat {:.1} K, subcooling {:.1} K",
        report.refrigerant,
        report.source,
        report.evap_temp_k,
        report.cond_temp_k,
        report.superheat_k,
        report.subcooling_k
    );
    println!(
        "  {:>5} {:>12} {:>12} {:>10} {:>12}",
        "point", "P [bar]", "h [kJ/kg]", "T [K]", "rho [kg/m3]"
    );
    for (key, point) in &report.points {
        let rho = point
            .density_kg_m3
            .map(|d| format!("{:.2}", d))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>5} {:>12.4} {:>12.2} {:>10.2} {:>12}",
            key,
            point.pressure_pa / 1.0e5,
            point.enthalpy_j_kg / 1.0e3,
            point.temperature_k,
            rho
        );
    }
    println!("  COP: {:.3} ({})", report.cop, report.compression_model);
    println!(
        "  Refrigeration effect: {:.2} kJ/kg, compressor work: {:.2} kJ/kg, pressure ratio: {:.2}",
        report.refrigeration_effect_j_kg / 1.0e3,
        report.compressor_work_j_kg / 1.0e3,
        report.pressure_ratio
    );
    if !report.fallbacks.is_empty() {
        println!("  Fallbacks: {}", report.fallbacks.join(", "));
    }
    println!(
        "  Dome: {} points per branch",
        report.saturation.liquid.len()
    );
}

fn print_dome(dome: &DomeReport) {
    println!(
        "  {:>10} {:>12} {:>12} {:>12} {:>12}",
        "T [K]", "P_liq [bar]", "h_liq", "P_vap [bar]", "h_vap"
    );
    for (liq, vap) in dome.liquid.iter().zip(dome.vapor.iter()) {
        println!(
            "  {:>10.2} {:>12.4} {:>12.2} {:>12.4} {:>12.2}",
            liq.temperature_k,
            liq.pressure_pa / 1.0e5,
            liq.enthalpy_j_kg / 1.0e3,
            vap.pressure_pa / 1.0e5,
            vap.enthalpy_j_kg / 1.0e3
        );
    }
}

fn print_capillary(report: &CapillaryReport) {
    print_cycle(&report.cycle);
    println!();

    if let Some(failure) = &report.sizing_error {
        println!("✗ Capillary sizing failed: {}", failure.message);
        return;
    }
    let Some(sizing) = &report.sizing else {
        return;
    };

    println!(
        "Capacity {:.1} W, mass flow {:.3} kg/h, dP {:.3} bar, rho {:.1} kg/m3",
        sizing.capacity_w, sizing.mass_flow_kg_h, sizing.delta_p_bar, sizing.density_kg_m3
    );
    println!(
        "Correlation {} with C = {}{}",
        sizing.correlation,
        sizing.constant,
        if sizing.constant_defaulted {
            " (default)"
        } else {
            ""
        }
    );
    println!("  {:>8} {:>12} {}", "D [mm]", "L [m]", "validity");
    for c in &sizing.candidates {
        let length = c
            .length_m
            .map(|l| format!("{:.3}", l))
            .unwrap_or_else(|| "-".to_string());
        println!("  {:>8.2} {:>12} {}", c.diameter_mm, length, c.validity);
    }
    if let Some(w) = &sizing.winner {
        println!("✓ Selected: {:.2} mm x {:.3} m", w.diameter_mm, w.length_m);
    }
}
