use serde::{Serialize, Serializer};
use std::fmt;

/// Lower bound (inclusive) of the top band.
pub const HIGHLY_RECOMMENDED_MIN: f64 = 8.0;

/// Lower bound (inclusive) of the middle band.
pub const RECOMMENDED_MIN: f64 = 7.0;

/// Recommendation band derived from a total score
///
/// Bands are left-closed/right-open: `[8, inf)`, `[7, 8)` and `(-inf, 7)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    HighlyRecommended,
    Recommended,
    NotRecommended,
}

impl Recommendation {
    /// All bands, top first. This is also the legend order.
    pub const ALL: [Recommendation; 3] = [
        Recommendation::HighlyRecommended,
        Recommendation::Recommended,
        Recommendation::NotRecommended,
    ];

    pub fn from_score(score: f64) -> Self {
        if score >= HIGHLY_RECOMMENDED_MIN {
            Recommendation::HighlyRecommended
        } else if score >= RECOMMENDED_MIN {
            Recommendation::Recommended
        } else {
            // NaN lands here as well
            Recommendation::NotRecommended
        }
    }

    /// Badge text on the student screen
    pub fn label(self) -> &'static str {
        match self {
            Recommendation::HighlyRecommended => "Highly Recommended",
            Recommendation::Recommended => "Recommended",
            Recommendation::NotRecommended => "Not Recommended",
        }
    }

    /// Legend text on the track screen
    pub fn legend_label(self) -> &'static str {
        match self {
            Recommendation::HighlyRecommended => "HIGHLY RECOMMENDED",
            Recommendation::Recommended => "RECOMMENDED",
            Recommendation::NotRecommended => "NOT RECOMMENDED",
        }
    }

    /// CSS class carrying the band colour (see `static/dashboard.css`)
    pub fn css_class(self) -> &'static str {
        match self {
            Recommendation::HighlyRecommended => "band-highly-recommended",
            Recommendation::Recommended => "band-recommended",
            Recommendation::NotRecommended => "band-not-recommended",
        }
    }
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A score already rounded to two decimals.
///
/// Displays and serializes with exactly two decimals ("8.50"), which is what
/// the templates and the CSV export print.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rounded(f64);

impl Rounded {
    pub fn new(value: f64) -> Self {
        Rounded(round2(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Rounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Rounded {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
