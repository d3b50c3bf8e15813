//! Optimized vs pop-out booster trade study.
//!
//! Usage:
//! ```
//! cargo run -- --optimized 0.9,0.9,0.9 --burn-time 10 --pop-out 0.9,0.9
//! cargo run -- --config constants.json --json report.json --csv stages.csv
//! cargo run -- --designs designs.json
//! cargo run -- --surface-csv surface.csv --booster-surface-csv boosted.csv
//! ```

use clap::Parser;

use booster_trade::config::{EngineConstants, SpecificImpulse};
use booster_trade::error::ModelError;
use booster_trade::io::{csv, json};
use booster_trade::study::{ConfigurationReport, TradeStudy};
use booster_trade::sweep;
use booster_trade::vehicle::{Configuration, ConfigurationBuilder, TradeDesigns};

#[derive(Parser, Debug)]
#[command(name = "booster-trade")]
#[command(about = "Compare an optimized multi-stage rocket against a pop-out booster design")]
#[command(version)]
struct Args {
    /// Optimized rocket stage mass ratios, stage 1 first
    #[arg(long, value_delimiter = ',', default_value = "0.9,0.9,0.9")]
    optimized: Vec<f64>,

    /// Pop-out booster first-stage burn time in seconds
    #[arg(long, default_value_t = 10.0)]
    burn_time: f64,

    /// Pop-out booster upper-stage mass ratios (stage 2 onward)
    #[arg(long, value_delimiter = ',', default_value = "0.9,0.9")]
    pop_out: Vec<f64>,

    /// Both designs from a JSON file instead of the ratio flags
    #[arg(long, conflicts_with_all = ["optimized", "burn_time", "pop_out"])]
    designs: Option<String>,

    /// Engine constants JSON file (missing fields use defaults)
    #[arg(long)]
    config: Option<String>,

    /// Override specific impulse in seconds, one value or one per stage
    #[arg(long, value_delimiter = ',')]
    isp: Option<Vec<f64>>,

    /// Override payload mass in kg
    #[arg(long)]
    payload: Option<f64>,

    /// Write the full trade study as JSON
    #[arg(long)]
    json: Option<String>,

    /// Write per-stage series as CSV
    #[arg(long)]
    csv: Option<String>,

    /// Write the stage-1 x stage-2 delta-v surface as CSV
    /// (fixed 250/300/350 s Isp ladder and standard g, independent of --config/--isp)
    #[arg(long)]
    surface_csv: Option<String>,

    /// Write the same surface with the 200 s strap-on booster added, as CSV
    #[arg(long)]
    booster_surface_csv: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let constants = load_constants(&args)?;
    let designs = match &args.designs {
        Some(path) => TradeDesigns::from_json_file(path)?,
        None => TradeDesigns {
            optimized: configuration("Optimized Rocket", &args.optimized, None)?,
            pop_out: configuration("Pop-Out Booster", &args.pop_out, Some(args.burn_time))?,
        },
    };

    let study = TradeStudy::run(&designs.optimized, &designs.pop_out, &constants)?;
    print_study(&study, &constants);

    if let Some(path) = &args.json {
        json::write_report_file(path, &constants, &study)?;
        println!("  Exported: {}", path);
    }
    if let Some(path) = &args.csv {
        csv::write_stage_series_file(path, &study)?;
        println!("  Exported: {}", path);
    }
    if args.surface_csv.is_some() || args.booster_surface_csv.is_some() {
        let (surface, boosted) = sweep::reference_surfaces()?;
        for (path, grid) in [(&args.surface_csv, &surface), (&args.booster_surface_csv, &boosted)] {
            if let Some(path) = path {
                csv::write_surface_file(path, grid)?;
                let (r1, r2, dv) = grid.peak();
                println!("  Exported: {} (peak {:.1} m/s at {:.2} / {:.2})", path, dv, r1, r2);
            }
        }
    }
    println!();
    Ok(())
}

fn load_constants(args: &Args) -> Result<EngineConstants, Box<dyn std::error::Error>> {
    let mut constants = match &args.config {
        Some(path) => EngineConstants::from_json_file(path)?,
        None => EngineConstants::default(),
    };
    match args.isp.as_deref() {
        Some([single]) => constants.isp = SpecificImpulse::Uniform(*single),
        Some(values) => constants.isp = SpecificImpulse::PerStage(values.to_vec()),
        None => {}
    }
    if let Some(payload) = args.payload {
        constants.payload_mass = payload;
    }
    constants.validate()?;
    Ok(constants)
}

/// `burn_time` set means `ratios` are the upper stages of a pop-out design.
fn configuration(
    name: &str,
    ratios: &[f64],
    burn_time: Option<f64>,
) -> Result<Configuration, ModelError> {
    let (builder, upper) = match (burn_time, ratios.split_first()) {
        (Some(t), _) => (ConfigurationBuilder::new(name).burn_time(t), ratios),
        (None, Some((&first, rest))) => {
            (ConfigurationBuilder::new(name).first_stage_ratio(first), rest)
        }
        (None, None) => return Err(ModelError::NoStages),
    };
    Ok(upper.iter().fold(builder, |b, &r| b.stage(r)).build())
}

// ---------------------------------------------------------------------------
// Report printing
// ---------------------------------------------------------------------------

fn print_study(study: &TradeStudy, constants: &EngineConstants) {
    println!();
    println!("====================================================================");
    println!("  STAGING TRADE STUDY");
    println!("====================================================================");
    println!();
    println!("  Constants");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  g:             {:>8.3} m/s^2  Payload:      {:>8.1} kg",
        constants.gravity, constants.payload_mass
    );
    println!(
        "  Isp:           {:>14}  Diameter:     {:>8.2} m",
        format_isp(&constants.isp),
        constants.stage_diameter
    );
    println!();

    print_configuration(&study.optimized);
    print_configuration(&study.pop_out);

    println!("  Comparison");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  The {} is {}% efficient in velocity and {}% efficient in range.",
        study.pop_out.name.to_lowercase(),
        study.delta_v_efficiency_pct,
        study.range_efficiency_pct
    );
    println!("====================================================================");
}

fn print_configuration(report: &ConfigurationReport) {
    let perf = &report.performance;
    println!("  {}", report.name);
    println!("  ──────────────────────────────────────────────────────────────────");
    if let Some(t) = report.burn_time {
        println!("  First-stage burn time: {:.1} s", t);
    }
    println!(
        "  Delta V:       {:>10.3} m/s   Range:      {:>12.3} m",
        perf.total_delta_v, perf.range
    );
    println!(
        "  Stack mass:    {:>10.3} kg    Stack:      {:>12.3} m",
        report.stack.total_mass,
        report.stack.stage_lengths_m.iter().sum::<f64>()
    );
    println!(
        "  {:>5}  {:>8}  {:>10}  {:>10}  {:>12}  {:>9}  {:>7}",
        "stage", "ratio", "dv (m/s)", "cum dv", "range (m)", "mass (kg)", "len (m)"
    );
    println!("  {}", "─".repeat(66));
    for i in 0..report.mass_ratios.len() {
        println!(
            "  {:>5}  {:>8.5}  {:>10.3}  {:>10.3}  {:>12.3}  {:>9.3}  {:>7.3}",
            i + 1,
            report.mass_ratios[i],
            perf.stage_delta_v[i],
            perf.cumulative_delta_v[i],
            perf.cumulative_range[i],
            report.stack.stage_masses[i],
            report.stack.stage_lengths_m[i],
        );
    }
    println!();
}

fn format_isp(isp: &SpecificImpulse) -> String {
    match isp {
        SpecificImpulse::Uniform(v) => format!("{:.0} s", v),
        SpecificImpulse::PerStage(values) => {
            let parts: Vec<String> = values.iter().map(|v| format!("{:.0}", v)).collect();
            format!("{} s", parts.join("/"))
        }
    }
}
