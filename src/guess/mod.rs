mod types;

pub use types::*;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

// Full release date: 2020.01.02 or 2020-01-02
static FULL_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})[.\-](\d{2})[.\-](\d{2})\b").unwrap());

// Short date with a two-digit year somewhere: 20.01.02
static SHORT_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{2})\.(\d{2})\.(\d{2})\b").unwrap());

// Episode tokens, most specific first: S01E03, 1x03, E03 / Ep03 / Episode 3
static SEASON_EPISODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bS(\d{1,2})[ ._]?E(\d{1,3})\b").unwrap());
static CROSS_EPISODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2})x(\d{2,3})\b").unwrap());
static BARE_EPISODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bE(?:p(?:isode)?)?[ ._]?(\d{1,3})\b").unwrap());

// Season without an episode ("Show.S01.2020") marks the end of the title
// but contributes no field.
static SEASON_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bS\d{1,2}\b").unwrap());

static SCREEN_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(\d{3,4})([pi])\b").unwrap());
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").unwrap());
static STANDALONE_NUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,3})\b").unwrap());
static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]*)\)").unwrap());

const KNOWN_HEIGHTS: [u32; 6] = [480, 576, 720, 1080, 2160, 4320];

/// Return the first short DD.DD.DD date token in `name`, if any.
///
/// Callers that have no date-order hint should treat a hit as fatal before
/// guessing, since the three groups cannot be assigned safely.
pub fn find_short_date(name: &str) -> Option<&str> {
    SHORT_DATE.find(name).map(|m| m.as_str())
}

/// Parse a release-style string into structured media fields.
///
/// The title is everything before the first recognized token (date, episode,
/// season, year, screen size, or parenthesized alternative title), with
/// dot/underscore separators normalized to spaces. An empty title is an
/// error; all other fields are optional.
pub fn guess_media_name(name: &str, options: &GuessOptions) -> Result<Guess, GuessError> {
    let full_date = FULL_DATE.captures(name);
    let short_date = SHORT_DATE.captures(name);

    let season_episode = SEASON_EPISODE.captures(name);
    let cross_episode = CROSS_EPISODE.captures(name);
    let bare_episode = BARE_EPISODE.captures(name);

    let screen = SCREEN_SIZE
        .captures_iter(name)
        .find(|c| matches!(c[1].parse::<u32>(), Ok(h) if KNOWN_HEIGHTS.contains(&h)));

    let alt = PARENTHESIZED
        .captures_iter(name)
        .find(|c| !c[1].chars().all(|ch| ch.is_ascii_digit()));

    // Byte spans of every recognized token; each one terminates the title.
    let mut spans: Vec<(usize, usize)> = Vec::new();
    for c in [
        full_date.as_ref(),
        short_date.as_ref(),
        season_episode.as_ref(),
        cross_episode.as_ref(),
        bare_episode.as_ref(),
        screen.as_ref(),
        alt.as_ref(),
    ]
    .into_iter()
    .flatten()
    {
        if let Some(m) = c.get(0) {
            spans.push((m.start(), m.end()));
        }
    }
    if let Some(m) = SEASON_ONLY.find(name) {
        spans.push((m.start(), m.end()));
    }
    if let Some(m) = YEAR.find(name) {
        spans.push((m.start(), m.end()));
    }

    // Most specific episode form wins.
    let mut episode_span = season_episode
        .as_ref()
        .and_then(|c| c.get(2))
        .or_else(|| cross_episode.as_ref().and_then(|c| c.get(2)))
        .or_else(|| bare_episode.as_ref().and_then(|c| c.get(1)))
        .map(|m| (m.start(), m.end()));

    // Episode-typed guesses may read a leftover bare number ("Show.03") as
    // an episode; movie-typed guesses never do.
    if episode_span.is_none() && options.media_type == Some(MediaType::Episode) {
        episode_span = STANDALONE_NUM
            .find_iter(name)
            .find(|m| !spans.iter().any(|&(s, e)| m.start() >= s && m.start() < e))
            .map(|m| (m.start(), m.end()));
        if let Some(span) = episode_span {
            spans.push(span);
        }
    }

    let title_end = spans.iter().map(|&(s, _)| s).min().unwrap_or(name.len());
    let title = clean(&name[..title_end]);
    if title.is_empty() {
        return Err(GuessError::MissingTitle(name.to_string()));
    }

    let date = resolve_date(name, full_date.as_ref(), short_date.as_ref(), options)?;

    let episode = episode_span.and_then(|(s, e)| name[s..e].parse::<u32>().ok());

    let episode_title = episode_span.and_then(|(_, end)| {
        let stop = spans
            .iter()
            .map(|&(s, _)| s)
            .filter(|&s| s > end)
            .min()
            .unwrap_or(name.len());
        let text = clean(&name[end..stop]);
        (!text.is_empty()).then_some(text)
    });

    let alternative_title = alt.as_ref().map(|c| clean(&c[1])).filter(|t| !t.is_empty());

    let screen_size = screen
        .as_ref()
        .map(|c| format!("{}{}", &c[1], c[2].to_ascii_lowercase()));

    Ok(Guess {
        title,
        date,
        episode,
        episode_title,
        alternative_title,
        screen_size,
    })
}

fn resolve_date(
    name: &str,
    full: Option<&regex::Captures<'_>>,
    short: Option<&regex::Captures<'_>>,
    options: &GuessOptions,
) -> Result<Option<NaiveDate>, GuessError> {
    if let Some(c) = full {
        let (y, m, d) = (parse_num(&c[1]), parse_num(&c[2]), parse_num(&c[3]));
        // An implausible group combination is just not a date.
        return Ok(NaiveDate::from_ymd_opt(y as i32, m, d));
    }

    let Some(c) = short else { return Ok(None) };

    let order = match options.date_order {
        Some(order) => order,
        None => {
            return Err(GuessError::AmbiguousShortDate {
                name: name.to_string(),
                found: c[0].to_string(),
            })
        }
    };

    let (a, b, z) = (parse_num(&c[1]), parse_num(&c[2]), parse_num(&c[3]));
    let (y, m, d) = match order {
        DateOrder::YearFirst => (a, b, z),
        DateOrder::DayFirst => (z, b, a),
        DateOrder::MonthFirst => (z, a, b),
    };
    Ok(NaiveDate::from_ymd_opt(2000 + y as i32, m, d))
}

fn parse_num(s: &str) -> u32 {
    s.parse().unwrap_or(0)
}

/// Normalize a name segment: dots and underscores become spaces, runs of
/// whitespace collapse, stray dashes, brackets and spaces at the edges are
/// dropped.
fn clean(segment: &str) -> String {
    segment
        .replace(['.', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c| matches!(c, '-' | ' ' | '(' | ')' | '[' | ']'))
        .to_string()
}
