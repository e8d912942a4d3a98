mod types;

pub use types::*;

use crate::guess::{self, GuessError, GuessOptions, MediaType};
use crate::probe;
use crate::scanner;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, trace};

/// Resolves a suggested name (typically a directory name) plus a file path
/// into a canonical field set for filename synthesis.
///
/// The resolver owns the movie-type constraint on the guessing engine and a
/// memoization map scoped to its own lifetime (one run), so sibling files
/// in the same directory trigger one guess.
pub struct Resolver {
    options: GuessOptions,
    cache: HashMap<String, ResolvedName>,
}

impl Resolver {
    /// Fails if the caller tries to smuggle a media type into the guess
    /// options; the resolver needs to set that itself.
    pub fn new(options: GuessOptions) -> Result<Self, ResolveError> {
        if options.media_type.is_some() {
            return Err(ResolveError::DisallowedOption);
        }
        Ok(Self {
            options,
            cache: HashMap::new(),
        })
    }

    pub fn resolve(
        &mut self,
        suggested_name: &str,
        file_path: &Path,
    ) -> Result<ResolvedName, ResolveError> {
        if !scanner::is_video(file_path) {
            trace!(file = ?file_path, "Not a video type, keeping suggested name");
            return Ok(ResolvedName::title_only(suggested_name));
        }

        if let Some(hit) = self.cache.get(suggested_name) {
            trace!(name = suggested_name, "Resolver cache hit");
            return Ok(hit.clone());
        }

        let resolved = self.resolve_video(suggested_name, file_path)?;
        self.cache
            .insert(suggested_name.to_string(), resolved.clone());
        Ok(resolved)
    }

    fn resolve_video(
        &self,
        suggested_name: &str,
        file_path: &Path,
    ) -> Result<ResolvedName, ResolveError> {
        // Refuse to guess a DD.DD.DD date blind; the wrong order would be
        // silently baked into every new filename.
        if self.options.date_order.is_none() && guess::find_short_date(suggested_name).is_some() {
            return Err(ResolveError::AmbiguousDate {
                name: suggested_name.to_string(),
            });
        }

        let options = GuessOptions {
            media_type: Some(MediaType::Movie),
            date_order: self.options.date_order,
        };
        let guessed = guess::guess_media_name(suggested_name, &options).map_err(|e| match e {
            GuessError::MissingTitle(name) => ResolveError::MissingTitle { name },
            GuessError::AmbiguousShortDate { name, .. } => ResolveError::AmbiguousDate { name },
        })?;

        debug!(name = suggested_name, guess = ?guessed, "Guessed media name");

        let screen_size = match guessed.screen_size {
            Some(size) => Some(size),
            None => probe::probe_video_height(file_path)?.map(|h| format!("{h}p")),
        };

        Ok(ResolvedName {
            title: guessed.title,
            date: guessed.date.map(|d| d.format("%Y.%m.%d").to_string()),
            episode: guessed.episode.map(|e| format!("E{e}")),
            episode_title: guessed.episode_title.or(guessed.alternative_title),
            screen_size,
        })
    }

    #[cfg(test)]
    fn cached(&self, suggested_name: &str) -> bool {
        self.cache.contains_key(suggested_name)
    }
}
