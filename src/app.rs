use axum::{
    Form, Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::downloader;
use crate::error::{DashboardError, DashboardResult};
use crate::evaluation::EvaluationTable;
use crate::loader;
use crate::navigator::{self, Action};
use crate::render::Renderer;
use crate::screens::TrackView;
use crate::session::{SESSION_COOKIE, SessionState, SessionStore};

/// Multipart field carrying the uploaded file
const UPLOAD_FIELD: &str = "file";

pub struct AppState {
    pub sessions: SessionStore,
    pub renderer: Renderer,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> DashboardResult<Self> {
        Ok(AppState {
            sessions: SessionStore::new(config.session_ttl()),
            renderer: Renderer::new()?,
            config,
        })
    }
}

#[derive(Deserialize)]
struct TrackForm {
    track: String,
}

#[derive(Deserialize)]
struct StudentForm {
    student: String,
}

#[derive(Deserialize)]
struct ExportQuery {
    format: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_bytes();
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/", get(show_dashboard))
        .route("/upload", post(upload_file))
        .route("/track", post(select_track))
        .route("/details", post(view_details))
        .route("/student", post(choose_student))
        .route("/back", post(go_back))
        .route("/export", get(export_track))
        .route("/api/state", get(get_state))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.addr()?;
    let app_state = Arc::new(AppState::new(config)?);
    let app = router(app_state);

    // Start server
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Reuse the caller's live session or start a new one.
fn session_id(jar: CookieJar, sessions: &SessionStore) -> (CookieJar, String) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if sessions.is_live(cookie.value()) {
            let id = cookie.value().to_string();
            return (jar, id);
        }
    }

    let id = sessions.create();
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .build();
    (jar.add(cookie), id)
}

/// Apply one action to the caller's session and send the browser back to `/`.
fn dispatch(state: &AppState, jar: CookieJar, action: Action) -> (CookieJar, Redirect) {
    let (jar, id) = session_id(jar, &state.sessions);
    log::debug!("session {}: {}", id, action.name());
    state
        .sessions
        .update(&id, |current| navigator::transition(current, action));
    (jar, Redirect::to("/"))
}

/// Current session, with the landing fallback applied and stored.
fn current_session(state: &AppState, jar: CookieJar) -> (CookieJar, SessionState) {
    let (jar, id) = session_id(jar, &state.sessions);
    let session = state.sessions.update(&id, navigator::guard);
    (jar, session)
}

async fn show_dashboard(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), DashboardError> {
    let (jar, id) = session_id(jar, &state.sessions);
    let session = state.sessions.update(&id, navigator::guard);
    let html = navigator::render(&session, &state.renderer)?;

    // A notice is shown on one page view only
    if let Some(shown) = session.notice {
        state.sessions.update(&id, |mut current| {
            if current.notice.as_ref() == Some(&shown) {
                current.notice = None;
            }
            current
        });
    }
    Ok((jar, Html(html)))
}

async fn upload_file(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    multipart: Multipart,
) -> impl IntoResponse {
    let action = match read_upload(multipart).await {
        Ok(table) => {
            log::info!(
                "loaded {} ({} evaluations, {} tracks)",
                table.source,
                table.len(),
                table.tracks().len()
            );
            Action::Upload(table)
        }
        Err(e) => {
            log::warn!("upload rejected: {}", e);
            Action::UploadFailed(e.to_string())
        }
    };

    dispatch(&state, jar, action)
}

async fn read_upload(mut multipart: Multipart) -> DashboardResult<EvaluationTable> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DashboardError::Upload(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| DashboardError::Upload(e.to_string()))?;

        return loader::parse_upload(&file_name, &bytes);
    }

    Err(DashboardError::EmptyUpload)
}

async fn select_track(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<TrackForm>,
) -> impl IntoResponse {
    dispatch(&state, jar, Action::SelectTrack(form.track))
}

async fn view_details(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    dispatch(&state, jar, Action::ViewDetails)
}

async fn choose_student(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<StudentForm>,
) -> impl IntoResponse {
    dispatch(&state, jar, Action::ChooseStudent(form.student))
}

async fn go_back(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    dispatch(&state, jar, Action::Back)
}

async fn export_track(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<ExportQuery>,
) -> Result<Response, DashboardError> {
    let (jar, session) = current_session(&state, jar);

    let (table, track) = match (session.table.as_deref(), session.selected_track.as_deref()) {
        (Some(table), Some(track)) if session.current_screen.needs_track() => (table, track),
        _ => return Ok((jar, Redirect::to("/")).into_response()),
    };
    let view = TrackView::build(table, track);

    let (body, content_type, extension) = match params.format.as_deref().unwrap_or("csv") {
        "xlsx" => (
            downloader::track_xlsx(&view)?,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "xlsx",
        ),
        "csv" => (downloader::track_csv(&view)?, "text/csv; charset=utf-8", "csv"),
        other => {
            return Ok((
                StatusCode::BAD_REQUEST,
                format!("Unsupported export format: {}", other),
            )
                .into_response());
        }
    };

    let disposition = format!(
        "attachment; filename=\"{}\"",
        downloader::download_name(track, extension)
    );
    log::info!("exported {} ranking as {}", track, extension);

    Ok((
        jar,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

async fn get_state(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let (jar, session) = current_session(&state, jar);
    (jar, Json(session.snapshot()))
}
