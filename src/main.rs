use amalgamate::{AmalgamateConfig, Amalgamation, Result, build};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

const LONG_HELP: &str = r#"
Selection:
  Regular files in ROOT named ail*.h, sorted by name.
  Without --root, ROOT is the parent of the source directory this binary
  was built from. Pass --root when running an installed copy.
  ail_all.h (the output) and ail_gui.h (deprecated) are always skipped.

Each header becomes:
  ////////
  // From <file>
  ////////


  <contents, minus the first #include "ail*.h" line>

Blocks are separated by four blank lines and written to ROOT/ail_all.h.

Examples:
  # Regenerate ail_all.h in the parent of this tool's directory
  amalgamate
  # Regenerate another checkout
  amalgamate --root ../ail
  # Show the headers that would be included
  amalgamate --list
  # Show what each header loses
  amalgamate --list=detailed
  # Machine-readable plan
  amalgamate --list=json
  # Print instead of writing ail_all.h
  amalgamate --stdout
"#;

/// Single-header amalgamation for the ail library.
#[derive(Parser, Debug)]
#[command(
    name = "amalgamate",
    version,
    about = "Concatenate ail*.h headers into ail_all.h.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Directory holding the headers; ail_all.h is written here too.
    /// Defaults to the parent of the directory this binary was built from,
    /// not the directory it is installed in
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// List the headers that would be included (optionally with format: plain, detailed, json)
    #[arg(long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "plain", conflicts_with = "stdout")]
    list: Option<ListFormat>,

    /// Print the amalgamation to stdout instead of writing ail_all.h
    #[arg(long)]
    stdout: bool,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq)]
enum ListFormat {
    /// One header name per line
    Plain,
    /// Name, line count and stripped include of each header
    Detailed,
    /// JSON output for scripting
    Json,
}

#[derive(Serialize)]
struct HeaderInfo {
    filename: String,
    lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    stripped_include: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => LogLevel::Error,
        (false, 0) => LogLevel::Warn,
        (false, 1) => LogLevel::Info,
        (false, 2) => LogLevel::Debug,
        (false, _) => LogLevel::Trace,
    };

    let mut config = AmalgamateConfig::default();
    if let Some(root) = cli.root.clone() {
        config.root_dir = root;
    }

    let result = if let Some(list_format) = cli.list {
        list_headers(&config, list_format, log_level)
    } else {
        generate(&config, cli.stdout, log_level)
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn build_logged(config: &AmalgamateConfig, log_level: LogLevel) -> Result<Amalgamation> {
    log(
        log_level,
        LogLevel::Info,
        &format!("Scanning {}", config.root_dir.display()),
    );
    log(
        log_level,
        LogLevel::Trace,
        &format!(
            "Selecting {}*{} except {} and {:?}",
            config.prefix, config.suffix, config.output_filename, config.deprecated
        ),
    );

    let amalgamation = build(config)?;

    for entry in &amalgamation.entries {
        log(
            log_level,
            LogLevel::Debug,
            &format!("Including {}", entry.filename),
        );
        if let Some(line) = &entry.stripped_include {
            log(
                log_level,
                LogLevel::Debug,
                &format!("  stripped `{line}`"),
            );
        }
    }
    if amalgamation.entries.is_empty() {
        log(
            log_level,
            LogLevel::Warn,
            &format!(
                "No {}*{} headers found in {}",
                config.prefix,
                config.suffix,
                config.root_dir.display()
            ),
        );
    }

    Ok(amalgamation)
}

fn generate(config: &AmalgamateConfig, to_stdout: bool, log_level: LogLevel) -> Result<()> {
    let amalgamation = build_logged(config, log_level)?;

    if to_stdout {
        print!("{}", amalgamation.text);
        io::stdout().flush()?;
    } else {
        let output_path = config.output_path();
        log(
            log_level,
            LogLevel::Info,
            &format!(
                "Writing {} headers to {}",
                amalgamation.entries.len(),
                output_path.display()
            ),
        );
        amalgamation.write_to(&output_path)?;
    }

    log(log_level, LogLevel::Info, "Amalgamation complete!");
    Ok(())
}

fn list_headers(config: &AmalgamateConfig, format: ListFormat, log_level: LogLevel) -> Result<()> {
    log(log_level, LogLevel::Debug, "Listing selected headers...");

    let amalgamation = build_logged(config, log_level)?;

    match format {
        ListFormat::Plain => {
            for entry in &amalgamation.entries {
                println!("{}", entry.filename);
            }
        }
        ListFormat::Detailed => {
            for entry in &amalgamation.entries {
                println!("Header: {}", entry.filename);
                println!("  Lines: {}", entry.text.lines().count());
                match &entry.stripped_include {
                    Some(line) => println!("  Strips: {line}"),
                    None => println!("  Strips: nothing"),
                }
                println!();
            }
            println!(
                "Summary: {} headers -> {}",
                amalgamation.entries.len(),
                config.output_path().display()
            );
        }
        ListFormat::Json => {
            let infos: Vec<HeaderInfo> = amalgamation
                .entries
                .iter()
                .map(|entry| HeaderInfo {
                    filename: entry.filename.clone(),
                    lines: entry.text.lines().count(),
                    stripped_include: entry.stripped_include.clone(),
                })
                .collect();

            let json = serde_json::to_string_pretty(&infos)?;
            println!("{json}");
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

fn log(current_level: LogLevel, message_level: LogLevel, message: &str) {
    if message_level >= current_level {
        eprintln!(
            "[{}] {}",
            match message_level {
                LogLevel::Trace => "TRACE",
                LogLevel::Debug => "DEBUG",
                LogLevel::Info => "INFO",
                LogLevel::Warn => "WARN",
                LogLevel::Error => "ERROR",
            },
            message
        );
    }
}
