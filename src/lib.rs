pub mod cli;
pub mod error;
pub mod guess;
pub mod logging;
pub mod organizer;
pub mod output;
pub mod probe;
pub mod resolver;
pub mod scanner;

pub use error::{AppError, ExitCode};
pub use guess::{
    find_short_date, guess_media_name, DateOrder, Guess, GuessError, GuessOptions, MediaType,
};
pub use organizer::{
    registry, run_organizer, Action, OrganizeError, OrganizeReport, Organizer, RunOptions,
};
pub use probe::{probe_video_height, ProbeError};
pub use resolver::{ResolveError, ResolvedName, Resolver};
pub use scanner::{collect_dirs, collect_files, mime_matches, ScanError};
