//! End-to-end flows through the HTTP router, in process

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use std::sync::Arc;
use tower::ServiceExt;

use student_dashboard::Config;
use student_dashboard::app::{AppState, router};

const BOUNDARY: &str = "dashboard-test-boundary";

const SCORES: &str = "\
Track,Student Name,Soft Skills,Technical Skills,Total Score,Rank,CV,Code Files,Interviewer Comments 1,Interviewer Comments 2
AI,Avery Lee,8.456,9.1,8.8,1,https://cv.example.com/avery.pdf,https://git.example.com/avery,Clear communicator,Strong fundamentals
Web,Jules Moreno,6.5,7.25,6.9,2,,https://git.example.com/jules,Nervous,Needs practice
AI,Kiara Patel,7,7.5,7.2,2,,,Curious,Solid
Web,Sam Ortiz,8,8,8,1,https://cv.example.com/sam.pdf,,Confident,Great portfolio
";

/// A browser: one app, one session cookie
struct Browser {
    app: Router,
    cookie: Option<String>,
}

impl Browser {
    fn new() -> Self {
        let state = AppState::new(Config::default()).expect("templates compile");
        Browser {
            app: router(Arc::new(state)),
            cookie: None,
        }
    }

    async fn send(&mut self, builder: axum::http::request::Builder, body: Body) -> Response<Body> {
        let builder = match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        };
        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }

    async fn get(&mut self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri), Body::empty()).await
    }

    async fn page(&mut self) -> String {
        let response = self.get("/").await;
        assert_eq!(response.status(), StatusCode::OK);
        body_text(response).await
    }

    async fn post_form(&mut self, uri: &str, form: &str) -> Response<Body> {
        let builder = Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        let response = self.send(builder, Body::from(form.to_string())).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        response
    }

    async fn upload(&mut self, file_name: &str, content: &[u8]) -> Response<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
                file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        let builder = Request::post("/upload").header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
        let response = self.send(builder, Body::from(body)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        response
    }

    async fn state(&mut self) -> serde_json::Value {
        let response = self.get("/api/state").await;
        assert_eq!(response.status(), StatusCode::OK);
        serde_json::from_str(&body_text(response).await).unwrap()
    }
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn first_visit_shows_upload_form_and_sets_cookie() {
    let mut browser = Browser::new();
    let html = browser.page().await;

    assert!(html.contains("Student Performance Dashboard"));
    assert!(html.contains("Upload a CSV or Excel file to get started:"));
    assert!(!html.contains("Select below the track"));
    assert!(browser.cookie.as_deref().unwrap().starts_with("session="));
}

#[tokio::test]
async fn upload_lists_tracks_in_first_seen_order() {
    let mut browser = Browser::new();
    browser.upload("scores.csv", SCORES.as_bytes()).await;

    let html = browser.page().await;
    assert!(html.contains("Select below the track you would like to view:"));
    let ai = html.find(">AI</button>").unwrap();
    let web = html.find(">Web</button>").unwrap();
    assert!(ai < web);

    let state = browser.state().await;
    assert_eq!(state["screen"], "landing");
    assert_eq!(state["record_count"], 4);
    assert_eq!(state["source"], "scores.csv");
}

#[tokio::test]
async fn track_screen_shows_only_selected_track() {
    let mut browser = Browser::new();
    browser.upload("scores.csv", SCORES.as_bytes()).await;
    browser.post_form("/track", "track=AI").await;

    let html = browser.page().await;
    assert!(html.contains("AI Ranking"));
    assert!(html.contains("Avery Lee"));
    assert!(html.contains("Kiara Patel"));
    assert!(!html.contains("Jules Moreno"));
    assert!(!html.contains("Sam Ortiz"));
    assert!(html.contains("8.46"));
    assert!(html.contains("class=\"band-highly-recommended\">8.80"));
    assert!(html.contains("class=\"band-recommended\">7.20"));
    assert!(html.contains("HIGHLY RECOMMENDED"));
    assert!(!html.contains("Clear communicator"));
    assert!(!html.contains("cv.example.com"));
}

#[tokio::test]
async fn details_then_back_returns_to_same_track() {
    let mut browser = Browser::new();
    browser.upload("scores.csv", SCORES.as_bytes()).await;
    browser.post_form("/track", "track=AI").await;
    browser.post_form("/details", "").await;

    let html = browser.page().await;
    assert!(html.contains("Evaluations for Avery Lee"));
    assert!(html.contains("View CV"));
    assert!(html.contains("View Code Files"));
    assert!(html.contains("Highly Recommended"));
    assert!(html.contains("Interviewer 1"));
    assert!(html.contains("Clear communicator"));

    browser.post_form("/student", "student=Kiara+Patel").await;
    let html = browser.page().await;
    assert!(html.contains("Evaluations for Kiara Patel"));
    assert!(html.contains("No CV Available"));
    assert!(html.contains("No Code Files Available"));
    assert!(html.contains("Total Score: 7.20"));

    browser.post_form("/back", "").await;
    let html = browser.page().await;
    assert!(html.contains("AI Ranking"));
    let state = browser.state().await;
    assert_eq!(state["screen"], "track_detail");
    assert_eq!(state["selected_track"], "AI");

    browser.post_form("/back", "").await;
    assert_eq!(browser.state().await["screen"], "landing");
}

#[tokio::test]
async fn new_upload_resets_selection() {
    let mut browser = Browser::new();
    browser.upload("scores.csv", SCORES.as_bytes()).await;
    browser.post_form("/track", "track=Web").await;
    browser.post_form("/details", "").await;
    browser.post_form("/student", "student=Sam+Ortiz").await;

    browser.upload("again.csv", SCORES.as_bytes()).await;
    let state = browser.state().await;
    assert_eq!(state["screen"], "landing");
    assert!(state["selected_track"].is_null());
    assert!(state["selected_student"].is_null());
    assert_eq!(state["source"], "again.csv");
}

#[tokio::test]
async fn bad_upload_keeps_previous_table() {
    let mut browser = Browser::new();
    browser.upload("scores.csv", SCORES.as_bytes()).await;
    browser.upload("notes.txt", b"hello").await;

    let html = browser.page().await;
    assert!(html.contains("Unsupported file type: .txt"));
    assert!(html.contains("scores.csv"));

    browser.upload("broken.csv", b"Student Name,Rank\nAvery,1\n").await;
    let state = browser.state().await;
    assert_eq!(state["notice"], "Missing required column: Track");
    assert_eq!(state["source"], "scores.csv");
}

#[tokio::test]
async fn screens_without_track_fall_back_to_landing() {
    let mut browser = Browser::new();
    browser.post_form("/details", "").await;
    browser.post_form("/track", "track=AI").await;

    let html = browser.page().await;
    assert!(html.contains("Upload a CSV or Excel file to get started:"));
    assert_eq!(browser.state().await["screen"], "landing");
}

#[tokio::test]
async fn sessions_do_not_share_state() {
    let mut alice = Browser::new();
    alice.upload("scores.csv", SCORES.as_bytes()).await;

    let mut bob = Browser {
        app: alice.app.clone(),
        cookie: None,
    };
    let state = bob.state().await;
    assert_eq!(state["record_count"], 0);
    assert_eq!(alice.state().await["record_count"], 4);
}

#[tokio::test]
async fn export_downloads_current_ranking() {
    let mut browser = Browser::new();
    browser.upload("scores.csv", SCORES.as_bytes()).await;
    browser.post_form("/track", "track=Web").await;

    let response = browser.get("/export?format=csv").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Web-ranking.csv\""
    );
    let csv = body_text(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[1], "1,Sam Ortiz,8.00,8.00,8.00");
    assert_eq!(lines[2], "2,Jules Moreno,6.50,7.25,6.90");

    let response = browser.get("/export?format=xlsx").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = browser.get("/export?format=pdf").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn export_without_track_redirects_home() {
    let mut browser = Browser::new();
    let response = browser.get("/export?format=csv").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn unknown_student_keeps_student_screen() {
    let mut browser = Browser::new();
    browser.upload("scores.csv", SCORES.as_bytes()).await;
    browser.post_form("/track", "track=AI").await;
    browser.post_form("/details", "").await;
    browser.post_form("/student", "student=Kiara+Patel").await;
    browser.post_form("/student", "student=Nobody").await;

    let html = browser.page().await;
    assert!(html.contains("Evaluations for Kiara Patel"));
    assert!(html.contains("Unknown student: Nobody"));
    assert!(html.contains("action=\"/back\""));

    let state = browser.state().await;
    assert_eq!(state["screen"], "student_detail");
    assert_eq!(state["selected_student"], "Kiara Patel");

    browser.post_form("/back", "").await;
    assert!(browser.page().await.contains("AI Ranking"));
}

#[tokio::test]
async fn notice_is_shown_once() {
    let mut browser = Browser::new();
    browser.upload("notes.txt", b"hello").await;

    assert!(browser.page().await.contains("Unsupported file type: .txt"));
    assert!(!browser.page().await.contains("Unsupported file type"));
}

#[tokio::test]
async fn stylesheet_is_served() {
    let mut browser = Browser::new();
    let response = browser.get("/static/dashboard.css").await;
    assert_eq!(response.status(), StatusCode::OK);
}
