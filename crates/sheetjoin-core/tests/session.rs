//! End-to-end runs of the analysis session over real workbooks.

use std::fs;

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use sheetjoin_common::{column_names, column_values};
use sheetjoin_core::{
    AnalysisSession, CoreError, ExportFormat, FetchFailure, IngestWarning, LocalFolderFetcher,
    SourceFile,
};
use sheetjoin_model::{FilterSpec, PipelineOptions, SummaryOptions, Value};
use tempfile::TempDir;

enum Cell {
    Text(&'static str),
    Number(f64),
    Date(i32, u32, u32),
    Blank,
}

fn workbook(headers: &[&str], rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let sheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                Cell::Text(text) => {
                    sheet.write_string(r, c, *text).unwrap();
                }
                Cell::Number(number) => {
                    sheet.write_number(r, c, *number).unwrap();
                }
                Cell::Date(y, m, d) => {
                    let date = NaiveDate::from_ymd_opt(*y, *m, *d).unwrap();
                    sheet
                        .write_datetime_with_format(r, c, &date, &date_format)
                        .unwrap();
                }
                Cell::Blank => {}
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

fn january() -> Vec<u8> {
    workbook(
        &["Employee", "Department", "Check In", "Amount", "Currency"],
        &[
            vec![Cell::Text("Ana"), Cell::Text("Finance"), Cell::Date(2024, 1, 5), Cell::Number(100.0), Cell::Text("IDR")],
            vec![Cell::Text("Budi"), Cell::Text("HR"), Cell::Text("2024-01-20"), Cell::Number(50.0), Cell::Text("IDR")],
            vec![Cell::Text("Citra"), Cell::Text("Finance"), Cell::Text("not-a-date"), Cell::Number(25.0), Cell::Text("IDR")],
        ],
    )
}

fn february() -> Vec<u8> {
    workbook(
        &["Employee", "Department", "Check In", "Amount", "Cost Center"],
        &[
            vec![Cell::Text("Dewi"), Cell::Text("Ops"), Cell::Date(2024, 2, 2), Cell::Number(75.0), Cell::Text("CC-1")],
            vec![Cell::Text("Eka"), Cell::Text("Finance"), Cell::Date(2024, 2, 14), Cell::Blank, Cell::Text("CC-2")],
        ],
    )
}

fn options() -> PipelineOptions {
    PipelineOptions::default().with_summary(
        SummaryOptions::new()
            .with_amount_column("Amount")
            .with_distinct_columns(["Employee", "Department"]),
    )
}

#[test]
fn uploads_are_consolidated_and_coerced() {
    let mut session = AnalysisSession::new(options());
    let report = session
        .ingest(&[
            SourceFile::upload("january.xlsx", january()),
            SourceFile::upload("february.xlsx", february()),
        ])
        .unwrap();

    assert_eq!(report.rows, 5);
    assert!(report.failures.is_empty());
    assert_eq!(report.files.len(), 2);

    let unified = session.unified();
    assert_eq!(
        column_names(unified),
        vec!["Employee", "Department", "Check In", "Amount", "Cost Center"]
    );
    let check_in = column_values(unified.column("Check In").unwrap()).unwrap();
    assert_eq!(check_in[1], Value::Date(NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()));
    assert_eq!(check_in[2], Value::Absent);

    assert_eq!(
        report.warnings(),
        vec![IngestWarning::DatesSkipped {
            column: "Check In".to_string(),
            skipped: 1,
        }]
    );
}

#[test]
fn bad_files_are_skipped_with_warnings() {
    let mut session = AnalysisSession::new(options());
    let report = session
        .ingest(&[
            SourceFile::upload("january.xlsx", january()),
            SourceFile::upload("broken.xlsx", b"not a workbook".to_vec()),
            SourceFile::upload("notes.csv", b"a,b\n1,2\n".to_vec()),
        ])
        .unwrap();

    assert_eq!(report.rows, 3);
    let failed: Vec<_> = report.failures.iter().map(|f| f.file.as_str()).collect();
    assert_eq!(failed, vec!["broken.xlsx", "notes.csv"]);
}

#[test]
fn filter_summarize_and_export_a_view() {
    let mut session = AnalysisSession::new(options());
    session
        .ingest(&[
            SourceFile::upload("january.xlsx", january()),
            SourceFile::upload("february.xlsx", february()),
        ])
        .unwrap();

    let outcome = session
        .filter(&[
            FilterSpec::category("Department", "Finance"),
            FilterSpec::category("Site (PSA)", "Jakarta"),
        ])
        .unwrap();
    assert_eq!(outcome.data.height(), 3);
    assert_eq!(outcome.skipped.len(), 1);

    let summary = session.summarize(&outcome.data).unwrap();
    assert_eq!(summary.row_count, 3);
    assert_eq!(summary.amount_total, 125.0);
    assert_eq!(summary.distinct("Department"), Some(1));
    assert_eq!(summary.undated_rows, 1);

    let csv = session.export(&outcome.data, ExportFormat::Csv, "unused").unwrap();
    let text = String::from_utf8(csv).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(text.starts_with("Employee,Department,Check In,Amount,Cost Center\n"));

    let xlsx = session.export(&outcome.data, ExportFormat::Xlsx, "Finance").unwrap();
    assert!(xlsx.starts_with(b"PK"));

    let err = session.export(&outcome.data, ExportFormat::Xlsx, "bad[name]").unwrap_err();
    assert!(matches!(err, CoreError::Export(_)));
}

#[test]
fn folder_ingest_uses_a_scoped_working_dir() {
    let folder = TempDir::new().unwrap();
    fs::write(folder.path().join("b_february.xlsx"), february()).unwrap();
    fs::write(folder.path().join("a_january.xlsx"), january()).unwrap();
    fs::write(folder.path().join("readme.txt"), b"ignored").unwrap();

    let mut session = AnalysisSession::new(options());
    let locator = format!("file://{}", folder.path().display());
    let report = session.ingest_folder(&LocalFolderFetcher, &locator).unwrap();

    assert_eq!(report.rows, 5);
    assert!(report.files[0].name.ends_with("a_january.xlsx"));
    assert!(report.files[1].name.ends_with("b_february.xlsx"));
    // Fetched copies live only for the duration of the run.
    assert!(!std::path::Path::new(&report.files[0].name).exists());
}

#[test]
fn unreachable_folder_stops_ingestion() {
    let mut session = AnalysisSession::new(options());
    session
        .ingest(&[SourceFile::upload("january.xlsx", january())])
        .unwrap();

    let err = session
        .ingest_folder(&LocalFolderFetcher, "https://example.com/shared/folder")
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Fetch(FetchFailure::UnsupportedLocator { .. })
    ));
    assert_eq!(session.unified().height(), 3);
}

#[test]
fn empty_input_yields_empty_table_and_zero_summary() {
    let mut session = AnalysisSession::new(options());
    let report = session.ingest(&[]).unwrap();
    assert_eq!(report.rows, 0);
    assert_eq!(report.warnings(), vec![IngestWarning::EmptyBatch]);

    let outcome = session.filter(&[FilterSpec::category("Department", "HR")]).unwrap();
    assert_eq!(outcome.data.height(), 0);

    let summary = session.summarize(&outcome.data).unwrap();
    assert_eq!(summary.row_count, 0);
    assert_eq!(summary.amount_total, 0.0);

    let csv = session.export(&outcome.data, ExportFormat::Csv, "unused").unwrap();
    assert!(csv.is_empty());
}
