mod debug_report;

use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use text_recognizer::{
    ComponentConfig, ComponentRecipe, Context, Culture, GraphComponent, Message, PipelineConfig, RecognizerKind,
    RuleRecognizers, TextRecognizer, recognize_verbose_with, recognize_with,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// The processed message as JSON.
    Message,
    /// Raw results of every recognizer as JSON.
    Raw,
    /// Colored saturation trace per recognizer.
    Trace,
}

struct CliConfig {
    input: String,
    reference_time: Option<NaiveDateTime>,
    pipeline: Option<PathBuf>,
    format: Format,
    color: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    let component_config = match component_config(config.pipeline.as_ref()) {
        Ok(component_config) => component_config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let context = config.reference_time.map(Context::at).unwrap_or_default();
    match run(&config, component_config, &context) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(
    config: &CliConfig,
    component_config: ComponentConfig,
    context: &Context,
) -> Result<(), Box<dyn std::error::Error>> {
    match config.format {
        Format::Message => {
            let recognizer =
                TextRecognizer::with_suite(component_config, RuleRecognizers::with_context(context.clone()));
            let messages = recognizer.process(vec![Message::from_text(config.input.as_str())])?;
            for message in &messages {
                println!("{}", serde_json::to_string_pretty(message.data())?);
            }
        }
        Format::Raw => {
            let mut out = Map::new();
            for kind in RecognizerKind::BATTERY {
                let results = recognize_with(kind, &config.input, &Culture::ENGLISH, context)?;
                out.insert(kind.name().to_string(), serde_json::to_value(results)?);
            }
            println!("{}", serde_json::to_string_pretty(&Value::Object(out))?);
        }
        Format::Trace => {
            let runs = RecognizerKind::BATTERY
                .iter()
                .map(|&kind| recognize_verbose_with(kind, &config.input, &Culture::ENGLISH, context))
                .collect::<Result<Vec<_>, _>>()?;
            debug_report::print_runs(&config.input, &runs, config.color);
        }
    }
    Ok(())
}

/// Options of the `TextRecognizer` entry of a pipeline file, over the
/// component defaults.
fn component_config(pipeline: Option<&PathBuf>) -> Result<ComponentConfig, Box<dyn std::error::Error>> {
    let mut merged = <TextRecognizer as ComponentRecipe>::get_default_config();
    let Some(path) = pipeline else {
        return Ok(merged);
    };

    let pipeline = PipelineConfig::load_from_file(path)?;
    let culture: Culture = pipeline.language.parse()?;
    if !culture.is_supported() {
        warn!(language = pipeline.language.as_str(), "pipeline language has no grammar, recognizing as English");
    }
    merged.extend(pipeline.component(<TextRecognizer as ComponentRecipe>::NAME)?.config.clone());
    Ok(merged)
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut reference_time = None;
    let mut pipeline = None;
    let mut format = Format::Message;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("text-recognizer {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--reference" => {
                let value = args.next().ok_or_else(|| "error: --reference expects a value".to_string())?;
                reference_time = Some(parse_reference(&value)?);
            }
            "--config" => {
                let value = args.next().ok_or_else(|| "error: --config expects a value".to_string())?;
                pipeline = Some(PathBuf::from(value));
            }
            "--format" => {
                let value = args.next().ok_or_else(|| "error: --format expects a value".to_string())?;
                format = parse_format(&value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--reference=") => {
                reference_time = Some(parse_reference(arg.trim_start_matches("--reference="))?);
            }
            _ if arg.starts_with("--config=") => {
                pipeline = Some(PathBuf::from(arg.trim_start_matches("--config=")));
            }
            _ if arg.starts_with("--format=") => {
                format = parse_format(arg.trim_start_matches("--format="))?;
            }
            _ if arg.starts_with("--input=") => {
                set_input(&mut input, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input: input.trim_end_matches(['\n', '\r']).to_string(), reference_time, pipeline, format, color })
}

fn set_input(input: &mut Option<String>, value: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *input = Some(value);
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_reference(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| format!("error: invalid --reference '{value}' (expected YYYY-MM-DDTHH:MM:SS)"))
}

fn parse_format(value: &str) -> Result<Format, String> {
    match value {
        "message" => Ok(Format::Message),
        "raw" => Ok(Format::Raw),
        "trace" => Ok(Format::Trace),
        _ => Err(format!("error: invalid --format '{value}' (expected message, raw or trace)")),
    }
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "text-recognizer {version}

Runs the structured-entity recognizer battery over a piece of text.

Usage:
  text-recognizer [OPTIONS] [--] <text...>
  text-recognizer [OPTIONS] --input <text>

Options:
  -i, --input <text>         Text to recognize. If omitted, reads remaining args
                             or stdin when no args are provided.
  --reference <timestamp>    Reference time in YYYY-MM-DDTHH:MM:SS.
                             Default: the local clock.
  --config <pipeline.yml>    Take component options from the TextRecognizer
                             entry of a pipeline file.
  --format <format>          message (default): the processed message as JSON.
                             raw: every recognizer's results as JSON.
                             trace: rule saturation trace per recognizer.
  --color                    Force ANSI color output (trace format).
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Logging goes to stderr and is controlled by RUST_LOG (default: warn).

Exit codes:
  0  Success.
  1  Recognition failed.
  2  Invalid arguments, missing input or bad pipeline file.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
