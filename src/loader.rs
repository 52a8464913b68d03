use crate::error::{DashboardError, DashboardResult};
use crate::evaluation::{EvaluationTable, RawCell, RawTable};
use std::io::Cursor;
use std::path::Path;

/// Load an evaluation table from CSV bytes
///
/// The first record is the header row. Cells are trimmed and rows may have
/// fewer fields than the header (missing trailing cells read as empty).
///
/// # Arguments
/// * `source` - Name of the uploaded file, kept for display
/// * `bytes` - Raw file content
///
/// # Returns
/// * `DashboardResult<EvaluationTable>` - The parsed table or a parse error
///
/// # Examples
/// ```
/// use student_dashboard::loader::from_csv;
///
/// let data = "Track,Student Name,Soft Skills,Technical Skills,Total Score,Rank\n\
///             AI,Avery Lee,8.5,9.0,8.75,1\n";
/// let table = from_csv("scores.csv", data.as_bytes()).unwrap();
/// assert_eq!(table.tracks(), vec!["AI"]);
/// ```
pub fn from_csv(source: &str, bytes: &[u8]) -> DashboardResult<EvaluationTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| csv_error(&e))?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(&e))?;
        rows.push(record.iter().map(RawCell::text).collect());
    }

    EvaluationTable::from_raw(source, RawTable { headers, rows })
}

/// Load an evaluation table from XLSX bytes
///
/// Only the first worksheet is read; its first row holds the headers.
///
/// # Arguments
/// * `source` - Name of the uploaded file, kept for display
/// * `bytes` - Raw workbook content
///
/// # Returns
/// * `DashboardResult<EvaluationTable>` - The parsed table or a parse error
pub fn from_excel(source: &str, bytes: &[u8]) -> DashboardResult<EvaluationTable> {
    use calamine::{Reader, Xlsx};

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(|e| excel_error(&e))?;

    // Get the first worksheet
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| DashboardError::Parse {
            format: "xlsx",
            message: "No sheets found in Excel file".to_string(),
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| excel_error(&e))?;

    let mut sheet_rows = range.rows();
    let headers = match sheet_rows.next() {
        Some(row) => row
            .iter()
            .map(|cell| excel_cell(cell).as_text().unwrap_or_default())
            .collect(),
        None => {
            return Err(DashboardError::Parse {
                format: "xlsx",
                message: "Excel sheet is empty".to_string(),
            });
        }
    };

    let rows = sheet_rows
        .map(|row| row.iter().map(excel_cell).collect())
        .collect();

    EvaluationTable::from_raw(source, RawTable { headers, rows })
}

fn excel_cell(cell: &calamine::Data) -> RawCell {
    use calamine::Data;

    match cell {
        Data::Empty => RawCell::Empty,
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::String(s) => RawCell::text(s),
        // Dates, booleans and error cells keep their text form
        other => RawCell::text(&other.to_string()),
    }
}

fn csv_error(err: &csv::Error) -> DashboardError {
    DashboardError::Parse {
        format: "csv",
        message: err.to_string(),
    }
}

fn excel_error(err: &dyn std::fmt::Display) -> DashboardError {
    DashboardError::Parse {
        format: "xlsx",
        message: err.to_string(),
    }
}

/// Detect file type from the upload's file name and parse it
///
/// This function examines the file extension and calls the appropriate loader
/// for CSV or Excel content.
///
/// # Arguments
/// * `file_name` - Client-supplied file name
/// * `bytes` - Raw file content
///
/// # Returns
/// * `DashboardResult<EvaluationTable>` - The loaded table or an error
pub fn parse_upload(file_name: &str, bytes: &[u8]) -> DashboardResult<EvaluationTable> {
    if bytes.is_empty() {
        return Err(DashboardError::EmptyUpload);
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("csv") => from_csv(file_name, bytes),
        Some("xlsx") => from_excel(file_name, bytes),
        Some(ext) => Err(DashboardError::UnsupportedFormat(format!(".{}", ext))),
        None => Err(DashboardError::UnsupportedFormat(file_name.to_string())),
    }
}
