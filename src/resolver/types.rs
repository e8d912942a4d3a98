use thiserror::Error;

/// Canonical field set for one resolved name.
///
/// Fields other than the title are already formatted for filename use
/// (date as YYYY.MM.DD, episode as "E<n>").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub title: String,
    pub date: Option<String>,
    pub episode: Option<String>,
    pub episode_title: Option<String>,
    pub screen_size: Option<String>,
}

impl ResolvedName {
    /// A name carrying nothing but a title (non-video inputs).
    pub fn title_only(title: &str) -> Self {
        Self {
            title: title.to_string(),
            date: None,
            episode: None,
            episode_title: None,
            screen_size: None,
        }
    }

    /// Synthesize the new base filename: present fields joined with `-` in
    /// the fixed order title, date, episode, episode title, screen size.
    pub fn new_name(&self) -> String {
        let mut parts = vec![self.title.as_str()];
        for field in [
            &self.date,
            &self.episode,
            &self.episode_title,
            &self.screen_size,
        ]
        .into_iter()
        .flatten()
        {
            parts.push(field.as_str());
        }
        parts.join("-")
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("resolver options must not set a media type; it is fixed internally")]
    DisallowedOption,

    #[error("ambiguous short date in {name:?}: pass --date-order to disambiguate")]
    AmbiguousDate { name: String },

    #[error("could not resolve a title from {name:?}")]
    MissingTitle { name: String },

    #[error(transparent)]
    Probe(#[from] crate::probe::ProbeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_name_all_fields() {
        let resolved = ResolvedName {
            title: "Show".to_string(),
            date: Some("2020.01.02".to_string()),
            episode: Some("E3".to_string()),
            episode_title: None,
            screen_size: None,
        };
        assert_eq!(resolved.new_name(), "Show-2020.01.02-E3");
    }

    #[test]
    fn test_new_name_title_only() {
        let resolved = ResolvedName::title_only("Movie");
        assert_eq!(resolved.new_name(), "Movie");
    }

    #[test]
    fn test_new_name_skips_absent_fields() {
        let resolved = ResolvedName {
            title: "Show".to_string(),
            date: None,
            episode: Some("E12".to_string()),
            episode_title: Some("Pilot".to_string()),
            screen_size: Some("1080p".to_string()),
        };
        assert_eq!(resolved.new_name(), "Show-E12-Pilot-1080p");
    }
}
