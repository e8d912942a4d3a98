use chrono::NaiveDate;
use thiserror::Error;

/// Interpretation bias for a guessed name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Movie,
    Episode,
}

/// How to read the three two-digit groups of a short DD.DD.DD date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// yy.mm.dd
    YearFirst,
    /// dd.mm.yy
    DayFirst,
    /// mm.dd.yy
    MonthFirst,
}

/// Caller-supplied options for `guess_media_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessOptions {
    pub media_type: Option<MediaType>,
    pub date_order: Option<DateOrder>,
}

/// Structured fields guessed from a release-style name.
///
/// Only the title is guaranteed; every other field is present only when a
/// matching token was found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub episode: Option<u32>,
    pub episode_title: Option<String>,
    pub alternative_title: Option<String>,
    pub screen_size: Option<String>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GuessError {
    #[error("no title could be extracted from {0:?}")]
    MissingTitle(String),

    #[error("ambiguous short date {found:?} in {name:?}: specify a date order")]
    AmbiguousShortDate { name: String, found: String },
}
