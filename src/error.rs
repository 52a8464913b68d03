//! Dashboard error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to parse {format} upload: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("Unsupported file type: {0} (expected .csv or .xlsx)")]
    UnsupportedFormat(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid value {value:?} in column {column} at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("No file data received")]
    EmptyUpload,

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Track {0} has no students")]
    EmptyTrack(String),

    #[error("No evaluation for {student} in track {track}")]
    StudentNotFound { track: String, student: String },

    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::Parse { .. }
            | DashboardError::UnsupportedFormat(_)
            | DashboardError::MissingColumn(_)
            | DashboardError::InvalidValue { .. }
            | DashboardError::EmptyUpload
            | DashboardError::Upload(_) => StatusCode::BAD_REQUEST,
            DashboardError::EmptyTrack(_) | DashboardError::StudentNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            DashboardError::Template(_)
            | DashboardError::Render(_)
            | DashboardError::Export(_)
            | DashboardError::Csv(_)
            | DashboardError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }
        (status, self.to_string()).into_response()
    }
}
