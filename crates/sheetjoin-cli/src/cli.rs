//! CLI argument definitions for sheetjoin.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sheetjoin_core::DEFAULT_SHEET_NAME;
use sheetjoin_cli::filters::{parse_any_of, parse_date_range, parse_on_date, parse_where};
use sheetjoin_model::FilterSpec;

#[derive(Parser)]
#[command(
    name = "sheetjoin",
    version,
    about = "Consolidate, filter and export batches of spreadsheets",
    long_about = "Consolidate a batch of .xlsx/.xls files into one table.\n\n\
                  Drops denylisted columns, unifies columns across files, reads date\n\
                  columns, applies filters and writes CSV or XLSX exports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// JSON file with pipeline options; flags override its values.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Consolidate files, apply filters and write exports.
    Join(JoinArgs),

    /// Consolidate files, apply filters and print summary metrics.
    Summary(SummaryArgs),

    /// Print the effective column denylist.
    Denylist(DenylistArgs),
}

/// Where to read spreadsheets from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Workbook files (.xlsx or .xls).
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Folder locator (directory path or file:// URL) to fetch workbooks from.
    #[arg(long = "folder", value_name = "LOCATOR", conflicts_with = "files")]
    pub folder: Option<String>,
}

/// Row filters, combined with AND.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep rows whose date equals the given day (COLUMN=YYYY-MM-DD).
    #[arg(long = "on-date", value_name = "COLUMN=DATE", value_parser = parse_on_date)]
    pub on_date: Vec<FilterSpec>,

    /// Keep rows whose date is in an inclusive range (COLUMN=START..END).
    #[arg(long = "date-range", value_name = "COLUMN=START..END", value_parser = parse_date_range)]
    pub date_range: Vec<FilterSpec>,

    /// Keep rows whose value equals VALUE (COLUMN=VALUE).
    #[arg(long = "where", value_name = "COLUMN=VALUE", value_parser = parse_where)]
    pub category: Vec<FilterSpec>,

    /// Keep rows whose value is one of the listed values (COLUMN=V1,V2,...).
    #[arg(long = "any-of", value_name = "COLUMN=VALUES", value_parser = parse_any_of)]
    pub any_of: Vec<FilterSpec>,
}

impl FilterArgs {
    /// All filters in flag-kind order.
    pub fn specs(&self) -> Vec<FilterSpec> {
        self.on_date
            .iter()
            .chain(&self.date_range)
            .chain(&self.category)
            .chain(&self.any_of)
            .cloned()
            .collect()
    }
}

/// Column handling shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ColumnArgs {
    /// Also drop the extended denylist columns.
    #[arg(long = "extended-denylist")]
    pub extended_denylist: bool,

    /// Drop an additional column (repeatable).
    #[arg(long = "drop-column", value_name = "NAME")]
    pub drop_column: Vec<String>,

    /// Column to read as dates (repeatable; replaces the configured list).
    #[arg(long = "date-column", value_name = "NAME")]
    pub date_column: Vec<String>,

    /// Read ambiguous numeric dates as day/month/year.
    #[arg(long = "day-first")]
    pub day_first: bool,
}

/// Columns used for summary metrics.
#[derive(Args, Debug, Clone, Default)]
pub struct SummaryColumnArgs {
    /// Numeric column to total.
    #[arg(long = "amount-column", value_name = "NAME")]
    pub amount_column: Option<String>,

    /// Column to group totals and counts by.
    #[arg(long = "category-column", value_name = "NAME")]
    pub category_column: Option<String>,

    /// Column to count distinct values of (repeatable).
    #[arg(long = "distinct", value_name = "NAME")]
    pub distinct: Vec<String>,

    /// Date column used for the monthly series.
    #[arg(long = "summary-date-column", value_name = "NAME")]
    pub summary_date_column: Option<String>,
}

#[derive(Args)]
pub struct JoinArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Directory for exported files (default: current directory).
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Export format to write.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: OutputFormatArg,

    /// Worksheet name for XLSX exports.
    #[arg(long = "sheet-name", value_name = "NAME", default_value = DEFAULT_SHEET_NAME)]
    pub sheet_name: String,

    /// File name stem; a timestamp and extension are appended.
    #[arg(long = "stem", value_name = "NAME", default_value = "combined")]
    pub stem: String,

    /// Number of rows to preview.
    #[arg(long = "preview", value_name = "N", default_value_t = 10)]
    pub preview: usize,

    /// Report and preview without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub columns: ColumnArgs,

    #[command(flatten)]
    pub summary: SummaryColumnArgs,

    /// Print the summary as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct DenylistArgs {
    #[command(flatten)]
    pub columns: ColumnArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Xlsx,
    Both,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
