//! Screen state machine
//!
//! Every user action is an [`Action`]; [`transition`] maps the old session
//! state and the action to the new state, and [`render`] maps a state to
//! HTML. Neither touches the session store.
//!
//! ```text
//! landing --(track selected)--> track_detail
//! track_detail --(details)--> student_detail
//! track_detail --(back)--> landing
//! student_detail --(back)--> track_detail
//! any screen without its table/track --(guard)--> landing
//! ```

use std::sync::Arc;

use crate::error::DashboardResult;
use crate::evaluation::EvaluationTable;
use crate::render::Renderer;
use crate::screens::{LandingView, StudentView, TrackView};
use crate::session::{Screen, SessionState};

#[derive(Debug, Clone)]
pub enum Action {
    /// A file parsed successfully
    Upload(EvaluationTable),
    /// A file could not be used; the message is shown on landing
    UploadFailed(String),
    SelectTrack(String),
    ViewDetails,
    /// Pick a student in the student screen's chooser
    ChooseStudent(String),
    Back,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Upload(_) => "upload",
            Action::UploadFailed(_) => "upload_failed",
            Action::SelectTrack(_) => "select_track",
            Action::ViewDetails => "view_details",
            Action::ChooseStudent(_) => "choose_student",
            Action::Back => "back",
        }
    }
}

/// Fall back to landing when the current screen lacks a table or a track.
pub fn guard(mut state: SessionState) -> SessionState {
    if state.current_screen.needs_track()
        && (state.table.is_none() || state.selected_track.is_none())
    {
        log::debug!(
            "guard: {:?} without table/track, back to landing",
            state.current_screen
        );
        state.current_screen = Screen::Landing;
        state.selected_student = None;
    }
    state
}

/// Apply one user action.
pub fn transition(state: SessionState, action: Action) -> SessionState {
    let mut next = guard(state);
    let from = next.current_screen;
    next.notice = None;

    match action {
        Action::Upload(table) => {
            next.table = Some(Arc::new(table));
            next.selected_track = None;
            next.selected_student = None;
            next.current_screen = Screen::Landing;
        }
        Action::UploadFailed(message) => {
            next.notice = Some(message);
        }
        // Track buttons only exist on landing
        Action::SelectTrack(track) if from == Screen::Landing => {
            if next.table.as_ref().is_some_and(|t| t.has_track(&track)) {
                next.selected_track = Some(track);
                next.selected_student = None;
                next.current_screen = Screen::TrackDetail;
            } else {
                next.notice = Some(format!("Unknown track: {}", track));
            }
        }
        Action::SelectTrack(_) => {}
        Action::ViewDetails => {
            if from == Screen::TrackDetail {
                next.selected_student = None;
                next.current_screen = Screen::StudentDetail;
            }
        }
        Action::ChooseStudent(student) if from == Screen::StudentDetail => {
            let known = next
                .table
                .as_deref()
                .zip(next.selected_track.as_deref())
                .is_some_and(|(table, track)| table.find_student(track, &student).is_some());
            if known {
                next.selected_student = Some(student);
            } else {
                next.notice = Some(format!("Unknown student: {}", student));
            }
        }
        Action::ChooseStudent(_) => {}
        Action::Back => match from {
            Screen::TrackDetail => {
                next.current_screen = Screen::Landing;
            }
            Screen::StudentDetail => {
                next.selected_student = None;
                next.current_screen = Screen::TrackDetail;
            }
            Screen::Landing => {}
        },
    }

    let next = guard(next);
    if next.current_screen != from {
        log::info!("{:?} -> {:?}", from, next.current_screen);
    }
    next
}

/// Render the current screen. Exactly one screen handler runs per call.
pub fn render(state: &SessionState, renderer: &Renderer) -> DashboardResult<String> {
    let selection = state
        .table
        .as_deref()
        .zip(state.selected_track.as_deref());

    match (state.current_screen, selection) {
        (Screen::TrackDetail, Some((table, track))) => {
            renderer.render("track", &TrackView::build(table, track))
        }
        (Screen::StudentDetail, Some((table, track))) => {
            let mut view = StudentView::build(table, track, state.selected_student.as_deref())?;
            view.notice = state.notice.clone();
            renderer.render("student", &view)
        }
        _ => renderer.render("landing", &LandingView::build(state)),
    }
}
