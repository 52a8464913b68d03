/*!
# Student Performance Dashboard

A browser-based dashboard for reviewing student evaluation spreadsheets, built in Rust.

## Overview

A reviewer uploads a CSV or Excel file of evaluation records, picks a track
(cohort) to see its ranking with colour-coded total scores, and drills into a
single student's scores, rank, recommendation badge, document links and
interviewer comments.

## Architecture

### Session Layer
- Each browser gets a session cookie; its state (current screen, uploaded
  table, selected track and student) lives in the server's session store.

### Navigation Layer
- Every button is one action. An action is applied by a pure transition
  function (old state × action → new state), then the browser is redirected
  to `/`, which renders the current screen from state alone.
- Screens that need a table and a track fall back to the landing screen
  when either is missing.

### Screens
- **Landing** - file upload and one button per track
- **Track** - ranking table sorted by rank, score bands and legend
- **Student** - skill cards, rank tile, badge, CV/code links, comments

## Score bands

| Total score | Band |
|-------------|------|
| `>= 8` | Highly Recommended |
| `7 <= s < 8` | Recommended |
| `< 7` | Not Recommended |

Scores are shown rounded to two decimals on every screen.

## Modules

- **evaluation**: record and table model, column interpretation
- **loader**: CSV/XLSX upload parsing
- **scoring**: bands and rounding
- **session**: per-browser state and its store
- **navigator**: actions, transitions, screen dispatch
- **screens**: view models for landing, track and student screens
- **render**: HTML templates
- **downloader**: CSV/XLSX export of a track ranking
- **app**: routing and handlers
- **config**: command line flags and logging

## Routes

- `GET /` - Current screen
- `POST /upload` - Upload a CSV/XLSX file (`file` field)
- `POST /track` - Open a track's ranking
- `POST /details` - Open the student detail screen
- `POST /student` - Pick the student shown on the detail screen
- `POST /back` - Go back one screen
- `GET /export?format=csv|xlsx` - Download the current ranking
- `GET /api/state` - JSON snapshot of the session
*/

pub mod app;
pub mod config;
pub mod downloader;
pub mod error;
pub mod evaluation;
pub mod loader;
pub mod navigator;
pub mod render;
pub mod scoring;
pub mod screens;
pub mod session;

pub use config::Config;
pub use error::{DashboardError, DashboardResult};
pub use evaluation::{EvaluationRecord, EvaluationTable};
pub use navigator::Action;
pub use scoring::Recommendation;
pub use session::{Screen, SessionState, SessionStore};
