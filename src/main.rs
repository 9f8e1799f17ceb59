use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use compass::arc::ArcError;
use compass::config::{CompassConfig, ConfigError};
use compass::engine::{Action, EngineCore};
use compass::input::{Button, Key, Modifiers, Tool};
use compass::point::Point;
use serde_json::json;
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: {source}")]
    Arc { line: usize, source: ArcError },
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "compass", about = "Replay a pointer script through the compass engine")]
struct Cli {
    /// Script file, or `-` for stdin.
    #[arg(default_value = "-")]
    input: String,

    /// JSON file holding the preferred radius. Overrides the environment.
    #[arg(long, env = "COMPASS_RADIUS_FILE")]
    radius_file: Option<PathBuf>,

    /// Print only the final element list.
    #[arg(long)]
    elements_only: bool,
}

/// One script line.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Down { at: Point, shift: bool },
    Move(Point),
    Up(Point),
    Key(String),
    Tool(Tool),
    Pick(Point),
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = CompassConfig::from_env()?;
    if cli.radius_file.is_some() {
        config.radius_file = cli.radius_file;
    }
    let mut core = EngineCore::with_config(config);

    let reader: Box<dyn BufRead> = if cli.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&cli.input)?))
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    replay(&mut core, reader, &mut out, !cli.elements_only)
}

/// Feed every script line to `core`, writing actions (when `print_actions`)
/// and then the final elements as JSON lines.
fn replay(core: &mut EngineCore, reader: impl BufRead, out: &mut impl Write, print_actions: bool) -> Result<(), CliError> {
    let mut steps = 0_usize;
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let step = parse_step(&line).map_err(|message| CliError::Parse { line: line_no, message })?;
        let Some(step) = step else {
            continue;
        };
        let actions = apply_step(core, step).map_err(|source| CliError::Arc { line: line_no, source })?;
        steps += 1;
        if print_actions {
            for action in actions.iter().filter(|a| !matches!(a, Action::RenderNeeded)) {
                writeln!(out, "{}", serde_json::to_string(&json!({ "line": line_no, "action": action }))?)?;
            }
        }
    }
    tracing::debug!(steps, elements = core.elements().len(), "replay finished");
    writeln!(out, "{}", serde_json::to_string(&json!({ "elements": core.elements() }))?)?;
    Ok(())
}

fn apply_step(core: &mut EngineCore, step: Step) -> Result<Vec<Action>, ArcError> {
    let none = Modifiers::default();
    match step {
        Step::Down { at, shift } => {
            let modifiers = if shift { Modifiers::shift() } else { none };
            core.on_pointer_down(at, Button::Primary, modifiers)
        }
        Step::Move(at) => core.on_pointer_move(at, none),
        Step::Up(at) => core.on_pointer_up(at, Button::Primary, none),
        Step::Key(name) => core.on_key_down(&Key::new(name), none),
        Step::Tool(tool) => Ok(core.set_tool(tool)),
        Step::Pick(at) => {
            let mut actions = core.set_tool(Tool::Select);
            actions.extend(core.on_pointer_down(at, Button::Primary, none)?);
            Ok(actions)
        }
    }
}

/// Parse a script line. Blank lines and `#` comments yield `None`.
fn parse_step(line: &str) -> Result<Option<Step>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let step = match (verb, args.as_slice()) {
        ("down", [x, y]) => Step::Down { at: parse_point(x, y)?, shift: false },
        ("down", [x, y, "shift"]) => Step::Down { at: parse_point(x, y)?, shift: true },
        ("move", [x, y]) => Step::Move(parse_point(x, y)?),
        ("up", [x, y]) => Step::Up(parse_point(x, y)?),
        ("pick", [x, y]) => Step::Pick(parse_point(x, y)?),
        ("key", [name]) => Step::Key((*name).to_owned()),
        ("tool", [name]) => Step::Tool(name.parse().map_err(|e: compass::input::UnknownTool| e.to_string())?),
        _ => return Err(format!("unrecognized command {line:?}")),
    };
    Ok(Some(step))
}

fn parse_point(x: &str, y: &str) -> Result<Point, String> {
    Ok(Point::new(parse_coord(x)?, parse_coord(y)?))
}

fn parse_coord(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("invalid coordinate {raw:?}")),
    }
}
