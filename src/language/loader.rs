use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

/// Split comma separated word list text into trimmed, lowercased words.
/// Empty tokens are dropped; file order is kept and duplicates are not removed.
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Load a comma separated word list from disk.
pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::missing(path),
        _ => Error::Io(err),
    })?;

    let words = parse_words(&text);
    tracing::debug!(path = %path.display(), count = words.len(), "loaded word list");
    Ok(words)
}
