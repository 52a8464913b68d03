use serde::Serialize;

use crate::error::{DashboardError, DashboardResult};

pub const TRACK: &str = "Track";
pub const STUDENT_NAME: &str = "Student Name";
pub const SOFT_SKILLS: &str = "Soft Skills";
pub const TECHNICAL_SKILLS: &str = "Technical Skills";
pub const TOTAL_SCORE: &str = "Total Score";
pub const RANK: &str = "Rank";
pub const CV: &str = "CV";
pub const CODE_FILES: &str = "Code Files";
pub const COMMENTS_1: &str = "Interviewer Comments 1";
pub const COMMENTS_2: &str = "Interviewer Comments 2";

const KNOWN_COLUMNS: [&str; 10] = [
    TRACK,
    STUDENT_NAME,
    SOFT_SKILLS,
    TECHNICAL_SKILLS,
    TOTAL_SCORE,
    RANK,
    CV,
    CODE_FILES,
    COMMENTS_1,
    COMMENTS_2,
];

/// One student's evaluation within one track (a row of the upload)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationRecord {
    pub track: String,
    pub student_name: String,
    pub soft_skills: f64,
    pub technical_skills: f64,
    pub total_score: f64,
    pub rank: i64,
    pub cv: Option<String>,
    pub code_files: Option<String>,
    pub interviewer_comments_1: Option<String>,
    pub interviewer_comments_2: Option<String>,
    /// Values of the table's extra columns, aligned with `EvaluationTable::extra_columns`
    pub extra: Vec<String>,
}

/// A single cell as produced by the CSV or XLSX reader
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Number(f64),
    Text(String),
}

impl RawCell {
    pub fn text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }

    /// Text form of the cell; integral numbers print without a fraction.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawCell::Empty => None,
            RawCell::Text(s) => Some(s.clone()),
            RawCell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            RawCell::Number(n) => Some(n.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawCell::Empty => None,
            RawCell::Number(n) => Some(*n),
            RawCell::Text(s) => s.parse::<f64>().ok(),
        }
    }
}

/// Header row plus data rows, before any column interpretation
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

/// The uploaded table, immutable once built
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationTable {
    /// Name of the uploaded file
    pub source: String,
    pub records: Vec<EvaluationRecord>,
    /// Headers of columns the dashboard doesn't interpret, in file order
    pub extra_columns: Vec<String>,
    pub has_cv: bool,
    pub has_code_files: bool,
    /// True only when both interviewer comment columns are present
    pub has_comments: bool,
}

struct ColumnIndex<'a> {
    headers: &'a [String],
}

impl<'a> ColumnIndex<'a> {
    fn find(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    fn require(&self, name: &str) -> DashboardResult<usize> {
        self.find(name)
            .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
    }
}

fn cell(row: &[RawCell], index: usize) -> &RawCell {
    row.get(index).unwrap_or(&RawCell::Empty)
}

fn required_text(row: &[RawCell], index: usize, column: &str, line: usize) -> DashboardResult<String> {
    cell(row, index)
        .as_text()
        .ok_or_else(|| DashboardError::InvalidValue {
            column: column.to_string(),
            row: line,
            value: String::new(),
        })
}

fn required_number(row: &[RawCell], index: usize, column: &str, line: usize) -> DashboardResult<f64> {
    let raw = cell(row, index);
    raw.as_number().ok_or_else(|| DashboardError::InvalidValue {
        column: column.to_string(),
        row: line,
        value: raw.as_text().unwrap_or_default(),
    })
}

fn required_rank(row: &[RawCell], index: usize, line: usize) -> DashboardResult<i64> {
    let number = required_number(row, index, RANK, line)?;
    if number.fract() != 0.0 || !number.is_finite() {
        return Err(DashboardError::InvalidValue {
            column: RANK.to_string(),
            row: line,
            value: number.to_string(),
        });
    }
    Ok(number as i64)
}

fn optional_text(row: &[RawCell], index: Option<usize>) -> Option<String> {
    index.and_then(|i| cell(row, i).as_text())
}

impl EvaluationTable {
    /// Interpret a raw table by header names.
    ///
    /// Fully blank rows are skipped. Row numbers in errors are 1-based data rows.
    pub fn from_raw(source: impl Into<String>, raw: RawTable) -> DashboardResult<Self> {
        let columns = ColumnIndex {
            headers: &raw.headers,
        };

        let track = columns.require(TRACK)?;
        let student_name = columns.require(STUDENT_NAME)?;
        let soft_skills = columns.require(SOFT_SKILLS)?;
        let technical_skills = columns.require(TECHNICAL_SKILLS)?;
        let total_score = columns.require(TOTAL_SCORE)?;
        let rank = columns.require(RANK)?;
        let cv = columns.find(CV);
        let code_files = columns.find(CODE_FILES);
        let comments = match (columns.find(COMMENTS_1), columns.find(COMMENTS_2)) {
            (Some(first), Some(second)) => Some((first, second)),
            _ => None,
        };

        let extra_indices: Vec<usize> = raw
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !KNOWN_COLUMNS.contains(&h.trim()))
            .map(|(i, _)| i)
            .collect();
        let extra_columns = extra_indices
            .iter()
            .map(|&i| raw.headers[i].trim().to_string())
            .collect();

        let mut records = Vec::with_capacity(raw.rows.len());
        for (i, row) in raw.rows.iter().enumerate() {
            if row.iter().all(RawCell::is_empty) {
                continue;
            }
            let line = i + 1;

            records.push(EvaluationRecord {
                track: required_text(row, track, TRACK, line)?,
                student_name: required_text(row, student_name, STUDENT_NAME, line)?,
                soft_skills: required_number(row, soft_skills, SOFT_SKILLS, line)?,
                technical_skills: required_number(row, technical_skills, TECHNICAL_SKILLS, line)?,
                total_score: required_number(row, total_score, TOTAL_SCORE, line)?,
                rank: required_rank(row, rank, line)?,
                cv: optional_text(row, cv),
                code_files: optional_text(row, code_files),
                interviewer_comments_1: optional_text(row, comments.map(|(first, _)| first)),
                interviewer_comments_2: optional_text(row, comments.map(|(_, second)| second)),
                extra: extra_indices
                    .iter()
                    .map(|&i| cell(row, i).as_text().unwrap_or_default())
                    .collect(),
            });
        }

        Ok(EvaluationTable {
            source: source.into(),
            records,
            extra_columns,
            has_cv: cv.is_some(),
            has_code_files: code_files.is_some(),
            has_comments: comments.is_some(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct tracks in first-seen order
    pub fn tracks(&self) -> Vec<&str> {
        let mut tracks: Vec<&str> = Vec::new();
        for record in &self.records {
            if !tracks.contains(&record.track.as_str()) {
                tracks.push(&record.track);
            }
        }
        tracks
    }

    pub fn has_track(&self, track: &str) -> bool {
        self.records.iter().any(|r| r.track == track)
    }

    /// All records of one track, in table order
    pub fn in_track<'a>(&'a self, track: &str) -> impl Iterator<Item = &'a EvaluationRecord> {
        self.records.iter().filter(move |r| r.track == track)
    }

    /// Distinct student names of one track in first-seen order
    pub fn students_in(&self, track: &str) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in self.in_track(track) {
            if !names.contains(&record.student_name.as_str()) {
                names.push(&record.student_name);
            }
        }
        names
    }

    /// First record matching `(track, student)`
    pub fn find_student(&self, track: &str, student: &str) -> Option<&EvaluationRecord> {
        self.in_track(track).find(|r| r.student_name == student)
    }
}
