use serde::Deserialize;
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to run ffprobe (is it installed?): {0}")]
    Spawn(#[from] std::io::Error),

    #[error("ffprobe failed on {path}: {stderr}")]
    Failed { path: String, stderr: String },

    #[error("could not parse ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    codec_type: Option<String>,
    #[serde(default)]
    height: Option<u32>,
}

/// Pixel height of the first video stream in `path`, via ffprobe.
///
/// Returns `Ok(None)` when the file has no video stream or the stream
/// carries no height.
pub fn probe_video_height(path: &Path) -> Result<Option<u32>, ProbeError> {
    debug!(path = ?path, "Probing video stream");

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_streams",
            "-print_format",
            "json",
        ])
        .arg(path)
        .output()?;

    if !output.status.success() {
        return Err(ProbeError::Failed {
            path: path.display().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let parsed: ProbeOutput = serde_json::from_slice(&output.stdout)?;
    let height = first_video_height(&parsed);

    trace!(height = ?height, "Probe complete");
    Ok(height)
}

fn first_video_height(output: &ProbeOutput) -> Option<u32> {
    output
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .and_then(|s| s.height)
}
