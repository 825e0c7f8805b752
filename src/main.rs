mod debug_report;

use chrono::{NaiveDateTime, TimeZone, Utc};
use clap::Parser;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use trigline::config::{ConfigError, TriggerConfig};
use trigline::{Clock, WallClock, parse_verbose};

/// Parse a trigger descriptor and check whether it would fire.
#[derive(Parser, Debug)]
#[command(name = "trigline", version, about)]
struct Cli {
    /// Descriptor to evaluate, e.g. "Motion:ValidTimeRange=23:00-01:00;Room=Hall".
    /// Read from stdin when omitted.
    descriptor: Option<String>,

    /// Runtime parameter as NAME=VALUE; a bare NAME passes no value. Repeatable.
    #[arg(short, long = "param", value_name = "NAME[=VALUE]")]
    params: Vec<String>,

    /// Evaluation time as YYYY-MM-DDTHH:MM:SS, or an English phrase such as "tomorrow 00:30".
    #[arg(long, value_name = "TIMESTAMP")]
    at: Option<String>,

    /// Wall clock the descriptor's HH:mm bounds are written in: utc, local or +HH:MM.
    #[arg(long, env = "TRIGLINE_CLOCK")]
    clock: Option<WallClock>,

    /// Trigger config file (TOML); use with --trigger.
    #[arg(long, value_name = "FILE", requires = "trigger")]
    config: Option<PathBuf>,

    /// Name of the trigger to evaluate from --config.
    #[arg(long, value_name = "NAME", requires = "config", conflicts_with = "descriptor")]
    trigger: Option<String>,

    /// Force ANSI color output.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no trigger named '{0}' in config")]
    UnknownTrigger(String),

    #[error("no descriptor provided (pass one as an argument, via stdin, or use --config/--trigger)")]
    MissingDescriptor,

    #[error("invalid --param '{0}' (expected NAME=VALUE or NAME)")]
    InvalidParam(String),

    #[error("invalid --at '{value}': {reason}")]
    InvalidTime { value: String, reason: String },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Config(_) | CliError::Stdin(_) => 1,
            _ => 2,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let (descriptor, config_clock) = match (&cli.config, &cli.trigger) {
        (Some(path), Some(name)) => {
            let config = TriggerConfig::load(path)?;
            let spec = config.get(name).ok_or_else(|| CliError::UnknownTrigger(name.clone()))?;
            (spec.descriptor.descriptor().unwrap_or_default().to_string(), Some(config.clock))
        }
        _ => (descriptor_from_args(cli.descriptor)?, None),
    };
    let clock = cli.clock.or(config_clock).unwrap_or_default();

    let params = cli.params.iter().map(|p| parse_param(p)).collect::<Result<Vec<_>, _>>()?;
    let now = match &cli.at {
        Some(value) => parse_at(value, &clock)?,
        None => clock.now(),
    };

    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stdout().is_terminal()
    };

    let res = parse_verbose(&descriptor);
    debug_report::print_run(&res, &debug_report::Evaluation { now, clock, params: &params }, color);
    Ok(())
}

fn descriptor_from_args(arg: Option<String>) -> Result<String, CliError> {
    if let Some(descriptor) = arg {
        return Ok(descriptor);
    }
    if io::stdin().is_terminal() {
        return Err(CliError::MissingDescriptor);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(CliError::Stdin)?;
    let descriptor = buffer.trim_end_matches(['\r', '\n']);
    if descriptor.is_empty() {
        return Err(CliError::MissingDescriptor);
    }
    Ok(descriptor.to_string())
}

fn parse_param(raw: &str) -> Result<(&str, Option<&str>), CliError> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (raw, None),
    };
    if name.is_empty() {
        return Err(CliError::InvalidParam(raw.to_string()));
    }
    Ok((name, value))
}

/// Exact timestamp first, then an English phrase relative to `clock`.
fn parse_at(value: &str, clock: &WallClock) -> Result<NaiveDateTime, CliError> {
    if let Ok(exact) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(exact);
    }

    // Wall-clock values are carried in a UTC container purely for the arithmetic.
    let base = Utc.from_utc_datetime(&clock.now());
    chrono_english::parse_date_string(value, base, chrono_english::Dialect::Uk)
        .map(|dt| dt.naive_utc())
        .map_err(|err| CliError::InvalidTime { value: value.to_string(), reason: err.to_string() })
}
