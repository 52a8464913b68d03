use serde::Serialize;

use crate::session::SessionState;

#[derive(Debug, Clone, Serialize)]
pub struct LandingView {
    pub notice: Option<String>,
    pub source: Option<String>,
    pub record_count: usize,
    /// One button per track, first-seen order
    pub tracks: Vec<String>,
}

impl LandingView {
    pub fn build(state: &SessionState) -> Self {
        let table = state.table.as_deref();
        LandingView {
            notice: state.notice.clone(),
            source: table.map(|t| t.source.clone()),
            record_count: table.map_or(0, |t| t.len()),
            tracks: table
                .map(|t| t.tracks().into_iter().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }

    pub fn has_table(&self) -> bool {
        self.source.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::tests::sample_table;
    use std::sync::Arc;

    #[test]
    fn empty_session_has_no_tracks() {
        let view = LandingView::build(&SessionState::default());
        assert!(!view.has_table());
        assert!(view.tracks.is_empty());
    }

    #[test]
    fn lists_tracks_in_first_seen_order() {
        let state = SessionState {
            table: Some(Arc::new(sample_table())),
            notice: Some("previous upload failed".to_string()),
            ..SessionState::default()
        };
        let view = LandingView::build(&state);
        assert_eq!(view.tracks, vec!["AI", "Web"]);
        assert_eq!(view.record_count, 4);
        assert_eq!(view.notice.as_deref(), Some("previous upload failed"));
    }
}
