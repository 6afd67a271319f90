use std::io::{self, Write as _};
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Armoury, EffectCatalog};
use crate::combat::ReportSummary;
use crate::config::Settings;
use crate::error::Result;
use crate::scenario::{Scenario, ScenarioOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Simulate,
    Inspect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
struct OutcomeJson<'a> {
    attacker: &'a str,
    report: ReportSummary,
}

#[derive(Debug, Serialize)]
struct ArmouryListing<'a> {
    data_set: &'a str,
    effects: Vec<String>,
    weapons: Vec<&'a str>,
    models: Vec<&'a str>,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("simulate") => Some(Command::Simulate),
        Some("inspect") => Some(Command::Inspect),
        _ => None,
    }
}

pub fn parse_format(args: &[String]) -> OutputFormat {
    if args.iter().any(|arg| arg == "--csv") {
        OutputFormat::Csv
    } else {
        OutputFormat::Json
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let settings = Settings::from_env();
    match parse_command(args) {
        Some(Command::Simulate) => handle_simulate(args, &settings),
        Some(Command::Inspect) => handle_inspect(args, &settings),
        None => {
            eprintln!("usage: mathhammer <simulate|inspect>");
            2
        }
    }
}

fn load_armoury(settings: &Settings, data_set: &str) -> Result<Armoury> {
    Armoury::load(
        settings.data_set_dir(data_set),
        Arc::new(EffectCatalog::builtin()),
    )
}

fn handle_simulate(args: &[String], settings: &Settings) -> i32 {
    let Some(path) = args.get(2).filter(|arg| !arg.starts_with("--")) else {
        eprintln!("usage: mathhammer simulate <scenario.yaml> [--csv]");
        return 2;
    };

    let outcomes = Scenario::from_path(path).and_then(|scenario| {
        let armoury = load_armoury(settings, &scenario.data_set)?;
        scenario.run(&armoury, &settings.worker_pool())
    });
    let outcomes = match outcomes {
        Ok(outcomes) => outcomes,
        Err(err) => {
            eprintln!("simulate failed: {err}");
            return 1;
        }
    };

    let printed = match parse_format(args) {
        OutputFormat::Json => print_json(&outcomes),
        OutputFormat::Csv => print_csv(&outcomes),
    };
    match printed {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("failed to write report: {err}");
            1
        }
    }
}

fn print_json(outcomes: &[ScenarioOutcome]) -> Result<()> {
    let payload: Vec<OutcomeJson<'_>> = outcomes
        .iter()
        .map(|outcome| OutcomeJson {
            attacker: &outcome.attacker,
            report: outcome.report.summary(),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// Each report as its own CSV table, introduced by a `# attacker` line.
fn print_csv(outcomes: &[ScenarioOutcome]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for outcome in outcomes {
        writeln!(out, "# {}", outcome.attacker)?;
        outcome.report.write_csv(&mut out)?;
    }
    Ok(())
}

fn handle_inspect(args: &[String], settings: &Settings) -> i32 {
    let Some(data_set) = args.get(2) else {
        eprintln!("usage: mathhammer inspect <data_set>");
        return 2;
    };
    let armoury = match load_armoury(settings, data_set) {
        Ok(armoury) => armoury,
        Err(err) => {
            eprintln!("inspect failed: {err}");
            return 1;
        }
    };

    let listing = ArmouryListing {
        data_set,
        effects: armoury.catalog().names(),
        weapons: armoury.weapon_names().collect(),
        models: armoury.model_names().collect(),
    };
    match serde_json::to_string_pretty(&listing) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize listing: {err}");
            1
        }
    }
}
