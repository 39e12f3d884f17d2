//! Sheetjoin CLI.

use clap::{ColorChoice, Parser};
use sheetjoin_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_denylist, run_join, run_summary};
use crate::summary::{print_join, print_summary, print_summary_json};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = cli.config.as_deref();
    let outcome = match &cli.command {
        Command::Join(args) => run_join(config, args).and_then(|result| print_join(&result)),
        Command::Summary(args) => run_summary(config, args).and_then(|result| {
            if args.json {
                print_summary_json(&result)
            } else {
                print_summary(&result);
                Ok(())
            }
        }),
        Command::Denylist(args) => run_denylist(config, args),
    };
    // Unreadable files are warnings and do not change the exit code.
    let exit_code = match outcome {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Logging configuration from global flags.
///
/// `--log-level` beats `-v`/`-q`, and either one disables `RUST_LOG`.
/// File logs carry timestamps and never ANSI codes.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let to_file = cli.log_file.is_some();
    let ansi = match cli.color.color {
        ColorChoice::Always => !to_file,
        ColorChoice::Never => false,
        ColorChoice::Auto => !to_file && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level(level)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_format(format)
        .with_timestamps(to_file)
        .with_ansi(ansi)
        .with_log_file(cli.log_file.clone())
}
