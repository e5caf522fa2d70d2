//! Speakers command implementation.

use super::read_transcript;
use crate::chunking::extract_speakers;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the speakers command.
pub fn run_speakers(transcript: Option<&str>, settings: Settings) -> Result<()> {
    let text = read_transcript(&settings, transcript)?;
    let speakers = extract_speakers(&text);

    if speakers.is_empty() {
        Output::warning("No speakers found in the transcript.");
        return Ok(());
    }

    Output::success(&format!("Found {} speakers", speakers.len()));
    for speaker in &speakers {
        Output::list_item(speaker);
    }

    Ok(())
}
