use crate::{
    engine::{Engine, LabEngine, LabState, OpResult, Operation, Workflow},
    input,
    number_base::ArithmeticOp,
};
use discrete_protocol::SortAlgorithm;
use serde_json::{Value, json};
use std::fs;

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Help,
    Capabilities,
    Settings,
    History,
    LoadSettings { path: String },
    SaveSettings { path: String },
    Compute { op: Operation },
    Op { payload: String },
    Workflow { payload: String },
}

#[derive(Debug, Clone)]
pub struct ShellRunResult {
    pub state_changed: bool,
    pub output: Value,
}

impl ShellCommand {
    pub fn preview(&self) -> String {
        match self {
            Self::Help => "show shell command help".to_string(),
            Self::Capabilities => "inspect engine capabilities".to_string(),
            Self::Settings => "show current settings".to_string(),
            Self::History => "list operations applied in this session".to_string(),
            Self::LoadSettings { path } => format!("load settings from '{path}'"),
            Self::SaveSettings { path } => format!("save current settings to '{path}'"),
            Self::Compute { op } => format!("run {}", op.name()),
            Self::Op { .. } => "apply one engine operation from JSON".to_string(),
            Self::Workflow { .. } => "apply engine workflow from JSON".to_string(),
        }
    }
}

pub fn shell_help_text() -> &'static str {
    "Discrete Lab shell commands:\n\
help\n\
capabilities\n\
settings\n\
history\n\
convert VALUE FROM_BASE TO_BASE\n\
convert-all VALUE FROM_BASE\n\
arith A add|sub B BASE\n\
union SET_A SET_B\n\
intersection SET_A SET_B\n\
difference SET_A SET_B\n\
cardinality SET\n\
linear-search LIST TARGET\n\
binary-search LIST TARGET [--presort]\n\
bubble-sort LIST | selection-sort LIST | insertion-sort LIST\n\
set-parameter NAME JSON_VALUE\n\
load-settings PATH\n\
save-settings PATH\n\
op <operation-json-or-@file>\n\
workflow <workflow-json-or-@file>\n\
LIST and SET are comma-separated integers; quote them when they contain spaces"
}

fn parse_json_payload(raw: &str) -> Result<String, String> {
    if let Some(path) = raw.strip_prefix('@') {
        fs::read_to_string(path).map_err(|e| format!("Could not read JSON file '{path}': {e}"))
    } else {
        Ok(raw.to_string())
    }
}

fn token_error(command: &str) -> String {
    format!("Invalid '{command}' usage. Try: help")
}

fn parse_base(raw: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|_| format!("Invalid base '{raw}', expected 2, 8, 10 or 16"))
}

fn parse_list(raw: &str) -> Result<Vec<i64>, String> {
    input::parse_sequence(raw).map_err(|e| e.to_string())
}

fn parse_set(raw: &str) -> Result<Vec<i64>, String> {
    input::parse_set(raw)
        .map(|set| set.into_vec())
        .map_err(|e| e.to_string())
}

fn parse_set_pair(cmd: &str, tokens: &[String]) -> Result<(Vec<i64>, Vec<i64>), String> {
    if tokens.len() != 3 {
        return Err(token_error(cmd));
    }
    Ok((parse_set(&tokens[1])?, parse_set(&tokens[2])?))
}

pub fn parse_shell_tokens(tokens: &[String]) -> Result<ShellCommand, String> {
    if tokens.is_empty() {
        return Err("Missing shell command".to_string());
    }
    let cmd = tokens[0].as_str();
    let compute = |op: Operation| -> Result<ShellCommand, String> {
        Ok(ShellCommand::Compute { op })
    };
    match cmd {
        "help" | "-h" | "--help" => Ok(ShellCommand::Help),
        "capabilities" | "settings" | "history" => {
            if tokens.len() != 1 {
                return Err(token_error(cmd));
            }
            Ok(match cmd {
                "capabilities" => ShellCommand::Capabilities,
                "settings" => ShellCommand::Settings,
                _ => ShellCommand::History,
            })
        }
        "load-settings" | "save-settings" => {
            if tokens.len() != 2 {
                return Err(token_error(cmd));
            }
            let path = tokens[1].clone();
            Ok(if cmd == "load-settings" {
                ShellCommand::LoadSettings { path }
            } else {
                ShellCommand::SaveSettings { path }
            })
        }
        "convert" => {
            if tokens.len() != 4 {
                return Err(token_error(cmd));
            }
            compute(Operation::Convert {
                value: tokens[1].clone(),
                from_base: parse_base(&tokens[2])?,
                to_base: parse_base(&tokens[3])?,
            })
        }
        "convert-all" => {
            if tokens.len() != 3 {
                return Err(token_error(cmd));
            }
            compute(Operation::ConvertAll {
                value: tokens[1].clone(),
                from_base: parse_base(&tokens[2])?,
            })
        }
        "arith" => {
            if tokens.len() != 5 {
                return Err(token_error(cmd));
            }
            compute(Operation::Arithmetic {
                a: tokens[1].clone(),
                op: tokens[2].parse::<ArithmeticOp>()?,
                b: tokens[3].clone(),
                base: parse_base(&tokens[4])?,
            })
        }
        "union" | "intersection" | "difference" => {
            let (a, b) = parse_set_pair(cmd, tokens)?;
            compute(match cmd {
                "union" => Operation::Union { a, b },
                "intersection" => Operation::Intersection { a, b },
                _ => Operation::Difference { a, b },
            })
        }
        "cardinality" => {
            if tokens.len() != 2 {
                return Err(token_error(cmd));
            }
            compute(Operation::Cardinality {
                set: parse_set(&tokens[1])?,
            })
        }
        "linear-search" => {
            if tokens.len() != 3 {
                return Err(token_error(cmd));
            }
            compute(Operation::LinearSearch {
                values: parse_list(&tokens[1])?,
                target: input::parse_target(&tokens[2]).map_err(|e| e.to_string())?,
            })
        }
        "binary-search" => {
            if tokens.len() < 3 {
                return Err(token_error(cmd));
            }
            let mut presort = false;
            for extra in &tokens[3..] {
                match extra.as_str() {
                    "--presort" => presort = true,
                    other => {
                        return Err(format!("Unknown argument '{other}' for binary-search"));
                    }
                }
            }
            compute(Operation::BinarySearch {
                values: parse_list(&tokens[1])?,
                target: input::parse_target(&tokens[2]).map_err(|e| e.to_string())?,
                presort,
            })
        }
        "bubble-sort" | "selection-sort" | "insertion-sort" => {
            if tokens.len() != 2 {
                return Err(token_error(cmd));
            }
            compute(Operation::Sort {
                algorithm: cmd.parse::<SortAlgorithm>()?,
                values: parse_list(&tokens[1])?,
            })
        }
        "set-parameter" => {
            if tokens.len() < 3 {
                return Err(token_error(cmd));
            }
            let raw = tokens[2..].join(" ");
            // bare words such as `always` are taken as JSON strings
            let value = serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw));
            compute(Operation::SetParameter {
                name: tokens[1].clone(),
                value,
            })
        }
        "op" => {
            let payload = tokens[1..].join(" ");
            if payload.trim().is_empty() {
                return Err("Missing operation JSON".to_string());
            }
            Ok(ShellCommand::Op { payload })
        }
        "workflow" => {
            let payload = tokens[1..].join(" ");
            if payload.trim().is_empty() {
                return Err("Missing workflow JSON".to_string());
            }
            Ok(ShellCommand::Workflow { payload })
        }
        other => Err(format!("Unknown shell command '{other}'. Try: help")),
    }
}

pub fn parse_shell_line(line: &str) -> Result<ShellCommand, String> {
    let tokens = split_shell_words(line)?;
    parse_shell_tokens(&tokens)
}

pub fn split_shell_words(line: &str) -> Result<Vec<String>, String> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mode {
        Normal,
        SingleQuoted,
        DoubleQuoted,
    }

    let mut out = Vec::new();
    let mut current = String::new();
    let mut mode = Mode::Normal;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (mode, ch) {
            (Mode::Normal, '\'') => mode = Mode::SingleQuoted,
            (Mode::Normal, '"') => mode = Mode::DoubleQuoted,
            (Mode::Normal | Mode::DoubleQuoted, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (Mode::Normal, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            (Mode::SingleQuoted, '\'') | (Mode::DoubleQuoted, '"') => mode = Mode::Normal,
            (_, c) => current.push(c),
        }
    }

    if mode != Mode::Normal {
        return Err("Unterminated quoted string in shell command".to_string());
    }
    if !current.is_empty() {
        out.push(current);
    }
    if out.is_empty() {
        return Err("Empty shell command".to_string());
    }
    Ok(out)
}

fn result_output(result: &OpResult) -> Value {
    json!({ "result": result, "report": result.messages })
}

pub fn execute_shell_command(
    engine: &mut LabEngine,
    command: &ShellCommand,
) -> Result<ShellRunResult, String> {
    let settings_before = engine.settings().clone();
    let mut result = match command {
        ShellCommand::Help => ShellRunResult {
            state_changed: false,
            output: json!({ "help": shell_help_text() }),
        },
        ShellCommand::Capabilities => ShellRunResult {
            state_changed: false,
            output: serde_json::to_value(LabEngine::capabilities())
                .map_err(|e| format!("Could not serialize capabilities: {e}"))?,
        },
        ShellCommand::Settings => ShellRunResult {
            state_changed: false,
            output: serde_json::to_value(engine.settings())
                .map_err(|e| format!("Could not serialize settings: {e}"))?,
        },
        ShellCommand::History => {
            let entries: Vec<Value> = engine
                .operation_log()
                .iter()
                .map(|record| {
                    json!({
                        "op_id": record.result.op_id,
                        "run_id": record.run_id,
                        "operation": record.op.name(),
                    })
                })
                .collect();
            ShellRunResult {
                state_changed: false,
                output: json!({ "operations": entries }),
            }
        }
        ShellCommand::LoadSettings { path } => {
            let state = LabState::load_from_path(path).map_err(|e| e.to_string())?;
            *engine = LabEngine::from_state(state);
            ShellRunResult {
                state_changed: true,
                output: json!({
                    "message": format!("Loaded settings from '{path}'"),
                    "settings": engine.settings(),
                }),
            }
        }
        ShellCommand::SaveSettings { path } => {
            engine.state().save_to_path(path).map_err(|e| e.to_string())?;
            ShellRunResult {
                state_changed: false,
                output: json!({ "message": format!("Saved settings to '{path}'") }),
            }
        }
        ShellCommand::Compute { op } => {
            let op_result = engine.apply(op.clone()).map_err(|e| e.to_string())?;
            ShellRunResult {
                state_changed: false,
                output: result_output(&op_result),
            }
        }
        ShellCommand::Op { payload } => {
            let json_text = parse_json_payload(payload)?;
            let op: Operation = serde_json::from_str(&json_text)
                .map_err(|e| format!("Invalid operation JSON: {e}"))?;
            let op_result = engine.apply(op).map_err(|e| e.to_string())?;
            ShellRunResult {
                state_changed: false,
                output: result_output(&op_result),
            }
        }
        ShellCommand::Workflow { payload } => {
            let json_text = parse_json_payload(payload)?;
            let workflow: Workflow = serde_json::from_str(&json_text)
                .map_err(|e| format!("Invalid workflow JSON: {e}"))?;
            let results = engine.apply_workflow(workflow).map_err(|e| e.to_string())?;
            ShellRunResult {
                state_changed: false,
                output: json!({ "results": results }),
            }
        }
    };
    result.state_changed |= engine.settings() != &settings_before;
    Ok(result)
}
