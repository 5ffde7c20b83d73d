use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use discrete_lab::{
    about,
    engine::{Engine, LabEngine, LabState, Operation, Workflow},
    engine_shell::{ShellRunResult, execute_shell_command, parse_shell_line, parse_shell_tokens},
    logging,
};
use serde::Serialize;
use std::{
    fs,
    io::{self, BufRead},
    path::Path,
};
use tracing::debug;

const DEFAULT_STATE_PATH: &str = ".discrete_lab_state.json";

#[derive(Parser, Debug)]
#[command(name = "discrete_cli", version = about::DISCRETE_DISPLAY_VERSION)]
#[command(about = "Number bases, finite sets, searching and sorting from the command line")]
struct Cli {
    /// Settings file; missing files start from defaults
    #[arg(long, global = true, default_value = DEFAULT_STATE_PATH)]
    state: String,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print supported operations, bases and algorithms
    Capabilities,
    /// Print the current settings
    Settings,
    /// Print version and build information
    Version,
    /// Apply one operation given as JSON or @file.json
    Op { json: String },
    /// Apply a workflow given as JSON or @file.json
    Workflow { json: String },
    /// Run one shell command, e.g. `shell bubble-sort 3,1,2`
    Shell {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        words: Vec<String>,
    },
    /// Read shell commands from stdin, one per line
    Repl,
}

fn load_json_arg(value: &str) -> Result<String> {
    match value.strip_prefix('@') {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Could not read JSON file '{path}'"))
        }
        None => Ok(value.to_string()),
    }
}

fn load_state(path: &str) -> Result<LabState> {
    if Path::new(path).exists() {
        LabState::load_from_path(path).map_err(|e| anyhow!(e))
    } else {
        debug!(path, "no state file, using defaults");
        Ok(LabState::default())
    }
}

fn save_state(engine: &LabEngine, path: &str) -> Result<()> {
    engine.state().save_to_path(path).map_err(|e| anyhow!(e))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Could not serialize JSON output")?;
    println!("{text}");
    Ok(())
}

fn print_shell_result(result: &ShellRunResult) -> Result<()> {
    match result.output.get("report").and_then(|r| r.as_array()) {
        Some(lines) => {
            for line in lines.iter().filter_map(|l| l.as_str()) {
                println!("{line}");
            }
            if let Some(warnings) = result.output["result"]["warnings"].as_array() {
                for warning in warnings.iter().filter_map(|w| w.as_str()) {
                    eprintln!("warning: {warning}");
                }
            }
            Ok(())
        }
        None => match result.output.get("help").and_then(|h| h.as_str()) {
            Some(help) => {
                println!("{help}");
                Ok(())
            }
            None => print_json(&result.output),
        },
    }
}

fn run_repl(engine: &mut LabEngine, state_path: &str) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Could not read from stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if matches!(trimmed, "exit" | "quit") {
            break;
        }
        let outcome = parse_shell_line(trimmed)
            .and_then(|cmd| execute_shell_command(engine, &cmd));
        match outcome {
            Ok(result) => {
                print_shell_result(&result)?;
                if result.state_changed {
                    save_state(engine, state_path)?;
                }
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut engine = LabEngine::from_state(load_state(&cli.state)?);
    match cli.command {
        Command::Capabilities => print_json(&LabEngine::capabilities()),
        Command::Settings => print_json(engine.settings()),
        Command::Version => {
            println!("{}", about::version_cli_text());
            Ok(())
        }
        Command::Op { json } => {
            let op: Operation =
                serde_json::from_str(&load_json_arg(&json)?).context("Invalid operation JSON")?;
            let mutates = matches!(op, Operation::SetParameter { .. });
            let result = engine.apply(op).map_err(|e| anyhow!(e))?;
            if mutates {
                save_state(&engine, &cli.state)?;
            }
            print_json(&result)
        }
        Command::Workflow { json } => {
            let workflow: Workflow =
                serde_json::from_str(&load_json_arg(&json)?).context("Invalid workflow JSON")?;
            let results = engine.apply_workflow(workflow).map_err(|e| anyhow!(e))?;
            save_state(&engine, &cli.state)?;
            print_json(&results)
        }
        Command::Shell { words } => {
            let command = parse_shell_tokens(&words).map_err(|e| anyhow!(e))?;
            debug!(command = %command.preview(), "shell command");
            let result = execute_shell_command(&mut engine, &command).map_err(|e| anyhow!(e))?;
            if result.state_changed {
                save_state(&engine, &cli.state)?;
            }
            print_shell_result(&result)
        }
        Command::Repl => run_repl(&mut engine, &cli.state),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
