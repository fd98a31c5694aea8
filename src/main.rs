//! energy-mix entry point: CLI wiring and config-driven engine construction.

use std::io;
use std::path::Path;
use std::process;

use energy_mix::config::ScenarioConfig;
use energy_mix::io::export::{export_result_csv, export_sweep_csv, write_json};
use energy_mix::mix::levers::{Lever, LeverPolicy};
use energy_mix::mix::summary::MixSummary;
use energy_mix::mix::sweep::sweep;
use energy_mix::mix::types::ScenarioResult;
use tracing_subscriber::EnvFilter;

/// Sweep resolution when `--steps` is not given.
const DEFAULT_SWEEP_STEPS: usize = 10;

/// Parsed CLI arguments.
#[derive(Debug, Default)]
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    /// `(lever name, raw value)` pairs applied on top of the loaded scenario.
    lever_overrides: Vec<(String, String)>,
    clamp: bool,
    debug: bool,
    json: bool,
    csv_out: Option<String>,
    sweep: Option<String>,
    steps: Option<usize>,
    help: bool,
}

fn print_help() {
    eprintln!("energy-mix: national energy-mix what-if calculator");
    eprintln!();
    eprintln!("Usage: energy-mix [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --car <pct>              Electric car adoption (0-100)");
    eprintln!("  --bicycle <pct>          Bicycle adoption (0-100)");
    eprintln!("  --solar <n>              Rooftop solar households (0-100)");
    eprintln!("  --home <n>               Insulated homes");
    eprintln!("  --windfarm <n>           New wind farms");
    eprintln!("  --clamp                  Clamp out-of-range levers instead of rejecting");
    eprintln!("  --debug                  Log inputs, delta and result to stderr");
    eprintln!("  --json                   Print the result as JSON");
    eprintln!("  --csv-out <path>         Export the result (or sweep) to CSV");
    eprintln!("  --sweep <lever>          Run the lever across 0-100");
    eprintln!("  --steps <n>              Sweep resolution (default: {DEFAULT_SWEEP_STEPS})");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args_from(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--help" | "-h" => cli.help = true,
            "--clamp" => cli.clamp = true,
            "--debug" => cli.debug = true,
            "--json" => cli.json = true,
            "--scenario" | "--preset" | "--csv-out" | "--sweep" | "--steps" | "--car"
            | "--bicycle" | "--solar" | "--home" | "--windfarm" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| format!("{flag} requires a value"))?
                    .clone();
                match flag {
                    "--scenario" => cli.scenario_path = Some(value),
                    "--preset" => cli.preset = Some(value),
                    "--csv-out" => cli.csv_out = Some(value),
                    "--sweep" => cli.sweep = Some(value),
                    "--steps" => {
                        let steps = value
                            .parse::<usize>()
                            .map_err(|_| format!("--steps value \"{value}\" is not a valid count"))?;
                        cli.steps = Some(steps);
                    }
                    lever => {
                        let name = lever.trim_start_matches("--").to_string();
                        cli.lever_overrides.push((name, value));
                    }
                }
            }
            other => return Err(format!("unknown argument \"{other}\"")),
        }
        i += 1;
    }

    if cli.scenario_path.is_some() && cli.preset.is_some() {
        return Err("--scenario and --preset are mutually exclusive; choose one source".into());
    }
    if cli.steps.is_some() && cli.sweep.is_none() {
        return Err("--steps only applies together with --sweep".into());
    }

    Ok(cli)
}

fn init_logging(debug: bool) {
    let default = if debug {
        "energy_mix=debug"
    } else {
        "energy_mix=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Loads the scenario: --scenario takes priority, then --preset, then baseline.
fn load_scenario(cli: &CliArgs) -> Result<ScenarioConfig, String> {
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path)).map_err(|e| e.to_string())?
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name).map_err(|e| e.to_string())?
    } else {
        ScenarioConfig::baseline()
    };

    for (name, raw) in &cli.lever_overrides {
        scenario
            .levers
            .set_from_str(name, raw)
            .map_err(|e| format!("error: {e}"))?;
    }
    if cli.clamp {
        scenario.validation.policy = LeverPolicy::Clamp;
    }
    if cli.debug {
        scenario.output.debug = true;
    }

    Ok(scenario)
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    process::exit(1);
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args_from(&args).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        print_help();
        process::exit(1);
    });
    if cli.help {
        print_help();
        return;
    }

    let scenario = load_scenario(&cli).unwrap_or_else(|e| fail(e));

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    init_logging(scenario.output.debug);
    let engine = scenario.engine();

    if let Some(ref name) = cli.sweep {
        let lever: Lever = name.parse().unwrap_or_else(|e| fail(format!("error: {e}")));
        let steps = cli.steps.unwrap_or(DEFAULT_SWEEP_STEPS);
        let points = sweep(&engine, &scenario.levers, lever, steps)
            .unwrap_or_else(|e| fail(format!("error: {e}")));

        for p in &points {
            let s = &p.summary;
            println!(
                "{lever}={:>6.1} | emissions={:>9.1} kt ({:+.1})  generation={:>9.1} GWh  \
                 cost={:>7.2} $M  investment={:>8.3} $B",
                p.value,
                s.emissions_kt,
                s.emissions_change_kt,
                s.production_gwh,
                s.cost_millions,
                s.investment_billions,
            );
        }

        if let Some(ref path) = cli.csv_out {
            if let Err(e) = export_sweep_csv(&points, lever, Path::new(path)) {
                fail(format!("error: failed to write CSV: {e}"));
            }
            eprintln!("Sweep written to {path}");
        }
        return;
    }

    let result = engine
        .run(&scenario.levers)
        .unwrap_or_else(|e| fail(format!("error: {e}")));

    if cli.json {
        if let Err(e) = write_json(&result, io::stdout().lock()) {
            fail(format!("error: failed to write JSON: {e}"));
        }
    } else {
        let reference = ScenarioResult::from_baseline(engine.baseline());
        println!("{result}");
        println!("{}", MixSummary::from_result(&result, &reference));
    }

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_result_csv(&result, Path::new(path)) {
            fail(format!("error: failed to write CSV: {e}"));
        }
        eprintln!("Result written to {path}");
    }
}
