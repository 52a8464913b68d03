use serde::Serialize;

use crate::evaluation::{
    EvaluationRecord, EvaluationTable, RANK, SOFT_SKILLS, STUDENT_NAME, TECHNICAL_SKILLS,
    TOTAL_SCORE,
};
use crate::scoring::{Recommendation, Rounded};

/// One ranking row. Link and comment columns never appear here.
#[derive(Debug, Clone, Serialize)]
pub struct TrackRow {
    pub rank: i64,
    pub student_name: String,
    pub soft_skills: Rounded,
    pub technical_skills: Rounded,
    pub total_score: Rounded,
    pub band_class: &'static str,
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub class: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackView {
    pub track: String,
    pub columns: Vec<String>,
    pub rows: Vec<TrackRow>,
    pub legend: Vec<LegendEntry>,
}

impl TrackRow {
    fn from_record(record: &EvaluationRecord) -> Self {
        let total_score = Rounded::new(record.total_score);
        TrackRow {
            rank: record.rank,
            student_name: record.student_name.clone(),
            soft_skills: Rounded::new(record.soft_skills),
            technical_skills: Rounded::new(record.technical_skills),
            total_score,
            // Band follows the displayed (rounded) score
            band_class: Recommendation::from_score(total_score.value()).css_class(),
            extra: record.extra.clone(),
        }
    }
}

pub fn legend() -> Vec<LegendEntry> {
    Recommendation::ALL
        .iter()
        .map(|band| LegendEntry {
            label: band.legend_label(),
            class: band.css_class(),
        })
        .collect()
}

impl TrackView {
    /// Ranking of one track: only that track's rows, sorted by rank (ties keep table order)
    pub fn build(table: &EvaluationTable, track: &str) -> Self {
        let mut rows: Vec<TrackRow> = table.in_track(track).map(TrackRow::from_record).collect();
        rows.sort_by_key(|row| row.rank);

        let mut columns: Vec<String> = [RANK, STUDENT_NAME, SOFT_SKILLS, TECHNICAL_SKILLS, TOTAL_SCORE]
            .iter()
            .map(|c| c.to_string())
            .collect();
        columns.extend(table.extra_columns.iter().cloned());

        TrackView {
            track: track.to_string(),
            columns,
            rows,
            legend: legend(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::tests::sample_table;

    #[test]
    fn only_selected_track_rows_are_shown() {
        let view = TrackView::build(&sample_table(), "AI");
        assert_eq!(view.rows.len(), 2);
        let names: Vec<_> = view.rows.iter().map(|r| r.student_name.as_str()).collect();
        assert_eq!(names, vec!["Avery Lee", "Kiara Patel"]);
    }

    #[test]
    fn rows_are_sorted_by_rank() {
        let view = TrackView::build(&sample_table(), "Web");
        let ranks: Vec<_> = view.rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
        assert_eq!(view.rows[0].student_name, "Sam Ortiz");
    }

    #[test]
    fn scores_are_rounded_and_banded() {
        let view = TrackView::build(&sample_table(), "AI");
        let avery = &view.rows[0];
        assert_eq!(avery.soft_skills.to_string(), "8.46");
        assert_eq!(avery.total_score.to_string(), "8.80");
        assert_eq!(avery.band_class, "band-highly-recommended");
        assert_eq!(view.rows[1].band_class, "band-recommended");

        let web = TrackView::build(&sample_table(), "Web");
        assert_eq!(web.rows[1].band_class, "band-not-recommended");
        assert_eq!(web.rows[0].band_class, "band-highly-recommended");
    }

    #[test]
    fn columns_exclude_links_and_comments() {
        let view = TrackView::build(&sample_table(), "AI");
        assert_eq!(
            view.columns,
            vec!["Rank", "Student Name", "Soft Skills", "Technical Skills", "Total Score"]
        );
        assert_eq!(view.legend.len(), 3);
        assert_eq!(view.legend[0].label, "HIGHLY RECOMMENDED");
    }

    #[test]
    fn unknown_track_is_empty() {
        let view = TrackView::build(&sample_table(), "Data");
        assert!(view.rows.is_empty());
    }
}
