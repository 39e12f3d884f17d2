use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use sheetjoin_cli::config::load_options;
use sheetjoin_core::{
    AnalysisSession, ExportFormat, IngestReport, LocalFolderFetcher, SourceFile,
    timestamped_file_name,
};
use sheetjoin_model::{DateOrder, EXTENDED_DENYLIST_ADDITIONS, PipelineOptions};
use tracing::{debug, info, info_span};

use crate::cli::{
    ColumnArgs, DenylistArgs, FilterArgs, InputArgs, JoinArgs, OutputFormatArg, SummaryArgs,
    SummaryColumnArgs,
};
use crate::summary::apply_table_style;
use crate::types::{JoinResult, SummaryResult};

pub fn run_join(config: Option<&Path>, args: &JoinArgs) -> Result<JoinResult> {
    let options = resolve_options(load_options(config)?, &args.columns, &args.filters);
    let mut session = AnalysisSession::new(options);
    let report = ingest_input(&mut session, &args.input)?;

    let outcome = session.filter_default().context("filter unified table")?;
    let mut exports = Vec::new();
    if args.dry_run {
        info!("dry run, skipping exports");
    } else if outcome.data.height() == 0 {
        info!("filtered view is empty, skipping exports");
    } else {
        let out_dir = args.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("create output directory {}", out_dir.display()))?;
        let stamp = chrono::Local::now().naive_local();
        for format in export_formats(args.format) {
            let span = info_span!("export", %format);
            let _guard = span.enter();
            let bytes = session
                .export(&outcome.data, format, &args.sheet_name)
                .with_context(|| format!("export {format}"))?;
            let path = out_dir.join(timestamped_file_name(&args.stem, format, stamp));
            std::fs::write(&path, &bytes)
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), bytes = bytes.len(), "wrote export");
            exports.push(path);
        }
    }

    Ok(JoinResult {
        report,
        outcome,
        exports,
        preview_rows: args.preview,
    })
}

pub fn run_summary(config: Option<&Path>, args: &SummaryArgs) -> Result<SummaryResult> {
    let options = resolve_options(load_options(config)?, &args.columns, &args.filters);
    let options = apply_summary_columns(options, &args.summary);
    let mut session = AnalysisSession::new(options);
    let report = ingest_input(&mut session, &args.input)?;
    let outcome = session.filter_default().context("filter unified table")?;
    let aggregate = session
        .summarize(&outcome.data)
        .context("summarize filtered view")?;
    Ok(SummaryResult {
        report,
        outcome,
        aggregate,
    })
}

pub fn run_denylist(config: Option<&Path>, args: &DenylistArgs) -> Result<()> {
    let options = resolve_options(load_options(config)?, &args.columns, &FilterArgs::default());
    let mut table = Table::new();
    table.set_header(vec!["#", "Dropped column"]);
    apply_table_style(&mut table);
    for (index, column) in options.denylist.columns().iter().enumerate() {
        table.add_row(vec![(index + 1).to_string(), column.clone()]);
    }
    println!("{table}");
    Ok(())
}

fn ingest_input(session: &mut AnalysisSession, input: &InputArgs) -> Result<IngestReport> {
    let started = Instant::now();
    let report = if let Some(locator) = &input.folder {
        session
            .ingest_folder(&LocalFolderFetcher, locator)
            .with_context(|| format!("ingest folder {locator}"))?
    } else if input.files.is_empty() {
        bail!("no input: pass workbook files or --folder");
    } else {
        let sources: Vec<SourceFile> = input.files.iter().map(SourceFile::path).collect();
        session.ingest(&sources).context("ingest files")?
    };
    debug!(
        duration_ms = started.elapsed().as_millis() as u64,
        "input ingested"
    );
    Ok(report)
}

/// Layers command-line flags over configured options.
///
/// Flag filters are appended after configured filters. Date columns given on
/// the command line replace the configured list.
fn resolve_options(
    mut options: PipelineOptions,
    columns: &ColumnArgs,
    filters: &FilterArgs,
) -> PipelineOptions {
    let mut denylist = options.denylist.clone();
    if columns.extended_denylist {
        denylist = denylist.with_columns(EXTENDED_DENYLIST_ADDITIONS.iter().copied());
    }
    options.denylist = denylist.with_columns(columns.drop_column.iter().cloned());
    if !columns.date_column.is_empty() {
        options.date_columns = columns.date_column.clone();
    }
    if columns.day_first {
        options.date_order = DateOrder::DayFirst;
    }
    options.filters.extend(filters.specs());
    options
}

fn apply_summary_columns(mut options: PipelineOptions, args: &SummaryColumnArgs) -> PipelineOptions {
    let summary = &mut options.summary;
    if let Some(column) = &args.amount_column {
        summary.amount_column = Some(column.clone());
    }
    if let Some(column) = &args.category_column {
        summary.category_column = Some(column.clone());
    }
    if let Some(column) = &args.summary_date_column {
        summary.date_column = Some(column.clone());
    }
    if !args.distinct.is_empty() {
        summary.distinct_columns = args.distinct.clone();
    }
    options
}

fn export_formats(arg: OutputFormatArg) -> Vec<ExportFormat> {
    match arg {
        OutputFormatArg::Csv => vec![ExportFormat::Csv],
        OutputFormatArg::Xlsx => vec![ExportFormat::Xlsx],
        OutputFormatArg::Both => vec![ExportFormat::Csv, ExportFormat::Xlsx],
    }
}
