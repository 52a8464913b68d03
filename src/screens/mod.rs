//! View models for the three screens
//!
//! Each screen turns the session's table into a plain serializable struct;
//! the `render` module turns that struct into HTML.

pub mod landing;
pub mod student;
pub mod track;

pub use landing::LandingView;
pub use student::StudentView;
pub use track::TrackView;
