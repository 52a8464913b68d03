use crate::error::DashboardResult;
use crate::screens::TrackView;

/// Convert a track ranking to CSV format
///
/// The export carries exactly what the track screen shows: same columns,
/// same rank order, scores with two decimals.
///
/// # Arguments
/// * `view` - The ranking to export
///
/// # Returns
/// * `DashboardResult<Vec<u8>>` - CSV content or an error
pub fn track_csv(view: &TrackView) -> DashboardResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&view.columns)?;

    for row in &view.rows {
        let mut record = vec![
            row.rank.to_string(),
            row.student_name.clone(),
            row.soft_skills.to_string(),
            row.technical_skills.to_string(),
            row.total_score.to_string(),
        ];
        record.extend(row.extra.iter().cloned());
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()).into())
}

/// Convert a track ranking to XLSX format
///
/// Rank and scores are written as numbers so they stay sortable in Excel;
/// extra columns are written as text.
///
/// # Arguments
/// * `view` - The ranking to export
///
/// # Returns
/// * `DashboardResult<Vec<u8>>` - XLSX file content as bytes or an error
pub fn track_xlsx(view: &TrackView) -> DashboardResult<Vec<u8>> {
    use rust_xlsxwriter::Workbook;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(&view.track))?;

    for (c, column) in view.columns.iter().enumerate() {
        worksheet.write_string(0, c as u16, column.as_str())?;
    }

    for (i, row) in view.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_number(r, 0, row.rank as f64)?;
        worksheet.write_string(r, 1, row.student_name.as_str())?;
        worksheet.write_number(r, 2, row.soft_skills.value())?;
        worksheet.write_number(r, 3, row.technical_skills.value())?;
        worksheet.write_number(r, 4, row.total_score.value())?;
        for (j, value) in row.extra.iter().enumerate() {
            worksheet.write_string(r, (5 + j) as u16, value.as_str())?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Worksheet names are limited to 31 characters and may not contain []:*?/\
fn sheet_name(track: &str) -> String {
    let cleaned: String = track
        .chars()
        .map(|c| if "[]:*?/\\".contains(c) { '_' } else { c })
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "Ranking".to_string()
    } else {
        cleaned
    }
}

/// File name offered to the browser, e.g. `AI-ranking.csv`
pub fn download_name(track: &str, extension: &str) -> String {
    let stem: String = track
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{}-ranking.{}", stem, extension)
}
