use anyhow::{Context, Result};
use std::io::Write;
use std::{env, path::PathBuf, process};
use suppression_harvest_config::Config;
use suppression_harvest_engine::{
    Deduplicator, ExistingFile, HarvestReport, LabelPattern, create_output, harvest, read_log,
    same_file, starting_offset,
};

const USAGE: &str = "<log-file> <suppression-file> [start-offset] [--existing <suppression-file>]";

/// How the run was requested on the command line.
#[derive(Debug, PartialEq)]
enum Invocation {
    /// `<log> <output> [start-offset] [--existing <file>]`
    Explicit(Config),
    /// No arguments: settings come from the config file.
    FromConfigFile,
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut existing = None;
    let mut positional = Vec::new();
    let mut rest = args.iter();
    while let Some(arg) = rest.next() {
        if arg == "--existing" {
            let path = rest
                .next()
                .ok_or_else(|| "--existing needs a suppression file path".to_string())?;
            existing = Some(PathBuf::from(path));
        } else {
            positional.push(arg);
        }
    }

    let mut config = match positional.as_slice() {
        [] if existing.is_none() => return Ok(Invocation::FromConfigFile),
        [log_path, output_path] | [log_path, output_path, _] => Config::new(
            PathBuf::from(log_path.as_str()),
            PathBuf::from(output_path.as_str()),
        ),
        [] | [_] => return Err("Missing log or suppression file path".to_string()),
        _ => return Err("Too many arguments".to_string()),
    };

    if let [_, _, offset] = positional.as_slice() {
        let offset = offset
            .parse::<u64>()
            .map_err(|e| format!("Invalid start offset '{offset}': {e}"))?;
        config.start_offset = Some(offset);
    }
    config.existing_path = existing;
    Ok(Invocation::Explicit(config))
}

/// Seed from the existing file (if any), then scan the log into the output.
///
/// The existing file is read before the output is truncated. When both are
/// the same file its contents are written back first, so committed
/// suppressions are kept and new blocks follow them.
fn run(config: &Config) -> Result<HarvestReport> {
    let labels = LabelPattern::new(&config.label_prefix)?;

    let existing = match &config.existing_path {
        Some(path) => ExistingFile::load(path, &labels).with_context(|| {
            format!("Failed to read existing suppressions '{}'", path.display())
        })?,
        None => ExistingFile::default(),
    };
    let in_place = config
        .existing_path
        .as_deref()
        .is_some_and(|path| same_file(path, &config.output_path));

    let start_offset = match config.start_offset {
        Some(offset) => offset,
        None => starting_offset(existing.blocks()),
    };
    log::info!(
        "Continuing after label {start_offset} with {} known suppressions",
        existing.blocks().len()
    );

    let mut dedup = Deduplicator::with_prefix(start_offset, config.label_prefix.clone());
    for suppression in existing.blocks() {
        if !dedup.seed(suppression.clone()) {
            log::warn!(
                "Existing suppression {} repeats an earlier rule",
                suppression.name()
            );
        }
    }

    let lines = read_log(&config.log_path)
        .with_context(|| format!("Failed to read log '{}'", config.log_path.display()))?;
    let mut out = create_output(&config.output_path).with_context(|| {
        format!(
            "Failed to create suppression file '{}'",
            config.output_path.display()
        )
    })?;
    if in_place {
        existing
            .write_to(&mut out)
            .context("Failed to carry existing suppressions forward")?;
    }

    let report = harvest(&lines, &mut dedup, &mut out)?;
    out.flush()?;
    Ok(report)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "suppression-harvest".to_string());
    let config_path = Config::config_path();

    let config = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(Invocation::Explicit(config)) => config,
        Ok(Invocation::FromConfigFile) => match Config::load() {
            Ok(Some(config)) => {
                log::info!("Using config file {}", config_path.display());
                config
            }
            Ok(None) => {
                eprintln!("Error: No log path provided and no config file found");
                eprintln!("Usage: {program} {USAGE}");
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {program} {USAGE}");
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: {program} {USAGE}");
            process::exit(1);
        }
    };

    let report = run(&config)?;
    log::info!("{report}");
    println!(
        "Wrote {} new suppressions to {}",
        report.accepted,
        config.output_path.display()
    );

    Ok(())
}
