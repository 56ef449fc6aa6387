use anyhow::{bail, Context, Result};
use log::{error, info};
use sightfix::api::{JsonFormatter, ReportBuilder, TextFormatter};
use sightfix::processing::{FixSession, SightLog};
use sightfix::utils::ConfigurationManager;
use std::path::PathBuf;

const USAGE: &str = "Usage: sightfix <events.json> [--config <file>] [--json]";

#[derive(Debug, PartialEq)]
struct Options {
    events_path: PathBuf,
    config_path: Option<PathBuf>,
    json: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut events_path = None;
    let mut config_path = None;
    let mut json = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => match iter.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => bail!("--config needs a file argument\n{}", USAGE),
            },
            flag if flag.starts_with("--") => bail!("Unknown option {}\n{}", flag, USAGE),
            path if events_path.is_none() => events_path = Some(PathBuf::from(path)),
            extra => bail!("Unexpected argument {}\n{}", extra, USAGE),
        }
    }

    match events_path {
        Some(events_path) => Ok(Options {
            events_path,
            config_path,
            json,
        }),
        None => bail!("{}", USAGE),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args)?;

    let manager = match &options.config_path {
        Some(path) => ConfigurationManager::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => ConfigurationManager::new(),
    };

    let json_data = std::fs::read_to_string(&options.events_path)
        .with_context(|| format!("Failed to read {}", options.events_path.display()))?;
    let log = SightLog::from_json(&json_data)
        .with_context(|| format!("Failed to parse sight log {}", options.events_path.display()))?;
    info!("Loaded {} events from {}", log.events.len(), options.events_path.display());

    let mut session = FixSession::with_solver(manager.build_almanac(), manager.build_solver());
    let halted = session.process_all(&log.events).err();
    if let Some(halt) = &halted {
        error!("Processing stopped: {}", halt);
    }

    let fix = session.compute_fix();
    let report = ReportBuilder::new().build(session.config().dead_reckoning, session.lines(), &fix);

    if options.json {
        println!("{}", JsonFormatter::pretty().format_json(&report)?);
    } else {
        print!("{}", TextFormatter::new().format_text(&report));
    }

    match halted {
        Some(halt) => Err(halt).context("Sight log contains an invalid event"),
        None => Ok(()),
    }
}
