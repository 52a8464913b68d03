use serde::Serialize;

use crate::error::{DashboardError, DashboardResult};
use crate::evaluation::EvaluationTable;
use crate::scoring::{Recommendation, Rounded};

#[derive(Debug, Clone, Serialize)]
pub struct StudentOption {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewComments {
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentView {
    pub track: String,
    pub students: Vec<StudentOption>,
    pub student_name: String,
    pub soft_skills: Rounded,
    pub technical_skills: Rounded,
    pub total_score: Rounded,
    pub rank: i64,
    pub badge_label: &'static str,
    pub badge_class: &'static str,
    pub cv: Option<String>,
    pub code_files: Option<String>,
    /// `None` when the table lacks either comment column
    pub comments: Option<InterviewComments>,
    /// Message from the last rejected chooser value
    pub notice: Option<String>,
}

/// A document link worth rendering: non-blank and plain http(s).
fn present(link: &Option<String>) -> Option<String> {
    link.as_ref()
        .map(|s| s.trim())
        .filter(|s| is_web_link(s))
        .map(str::to_string)
}

fn is_web_link(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

impl StudentView {
    /// Detail of one student in `track`.
    ///
    /// `selected` is the student picked in the chooser; without one the
    /// first student of the track is shown.
    pub fn build(
        table: &EvaluationTable,
        track: &str,
        selected: Option<&str>,
    ) -> DashboardResult<Self> {
        let names = table.students_in(track);
        let student = match selected.or_else(|| names.first().copied()) {
            Some(name) => name,
            None => return Err(DashboardError::EmptyTrack(track.to_string())),
        };

        let record = table
            .find_student(track, student)
            .ok_or_else(|| DashboardError::StudentNotFound {
                track: track.to_string(),
                student: student.to_string(),
            })?;

        let total_score = Rounded::new(record.total_score);
        let band = Recommendation::from_score(total_score.value());

        let comments = if table.has_comments {
            Some(InterviewComments {
                first: record.interviewer_comments_1.clone().unwrap_or_default(),
                second: record.interviewer_comments_2.clone().unwrap_or_default(),
            })
        } else {
            None
        };

        Ok(StudentView {
            track: track.to_string(),
            students: names
                .iter()
                .map(|name| StudentOption {
                    name: name.to_string(),
                    selected: *name == record.student_name,
                })
                .collect(),
            student_name: record.student_name.clone(),
            soft_skills: Rounded::new(record.soft_skills),
            technical_skills: Rounded::new(record.technical_skills),
            total_score,
            rank: record.rank,
            badge_label: band.label(),
            badge_class: band.css_class(),
            cv: present(&record.cv),
            code_files: present(&record.code_files),
            comments,
            notice: None,
        })
    }
}
