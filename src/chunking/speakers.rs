//! Speaker extraction from dialogue transcripts.

use regex::Regex;
use std::collections::BTreeSet;

/// Extract the distinct speaker names from a transcript.
///
/// A line contributes a speaker when, after trimming, its prefix up to the
/// first colon consists only of letters and spaces, and the trimmed label
/// is longer than one character. The result is deduplicated and sorted.
///
/// This is a best-effort heuristic: stage directions or multi-word
/// non-name prefixes that happen to match the pattern are captured too.
pub fn extract_speakers(transcript: &str) -> Vec<String> {
    let label = Regex::new(r"^([A-Za-z\s]+):").expect("valid regex");

    let mut speakers = BTreeSet::new();
    for line in transcript.lines() {
        if let Some(captures) = label.captures(line.trim()) {
            let name = captures[1].trim();
            if name.chars().count() > 1 {
                speakers.insert(name.to_string());
            }
        }
    }

    speakers.into_iter().collect()
}
