//! Argo profile file name parsing
//!
//! Profile files follow `[type]<mode><float>_<cycle>[D].<ext>`, for example
//! `SD5904855_122.nc` (synthetic, delayed mode) or `R6901474_010D.nc`
//! (core, real-time, descending).

use crate::app::models::{RawCandidate, SubmissionMode};
use crate::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static FILE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<prefix>[A-Z]*?)(?P<mode>[A-Z])(?P<float>\d{5,7})_(?P<cycle>\d{1,4})(?P<desc>D)?\.[A-Za-z0-9]+$",
    )
    .expect("file name pattern is valid")
});

/// Parse a path-like identifier into a [`RawCandidate`]
///
/// Only the final path component is inspected.
pub fn parse_candidate(identifier: &str) -> Result<RawCandidate> {
    let file_name = Path::new(identifier)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::identifier_parse(identifier))?;

    let captures = FILE_NAME_PATTERN
        .captures(file_name)
        .ok_or_else(|| Error::identifier_parse(identifier))?;

    let mode_marker = captures["mode"]
        .chars()
        .next()
        .ok_or_else(|| Error::identifier_parse(identifier))?;
    let cycle: u32 = captures["cycle"]
        .parse()
        .map_err(|_| Error::identifier_parse(identifier))?;

    Ok(RawCandidate {
        identifier: identifier.to_string(),
        data_type: captures["prefix"].to_string(),
        mode: SubmissionMode::from_marker(mode_marker),
        float_id: captures["float"].to_string(),
        cycle,
        descending: captures.name("desc").is_some(),
    })
}
