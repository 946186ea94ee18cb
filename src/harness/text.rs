//! Word extraction from plain text.

use std::path::Path;

use crate::error::{ArboraError, Result};

/// Lowercased words of `text`, split on anything that is not alphanumeric.
///
/// Letters outside ASCII count as word characters, so "árvore" stays whole.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Read `path` as UTF-8 and [`tokenize`] it
pub fn read_words<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| {
        ArboraError::invalid_data(format!(
            "{} is not valid UTF-8 (byte {})",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })?;
    let words = tokenize(&text);
    log::debug!("read {} words from {}", words.len(), path.display());
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("The cat, the HAT... and 2 dogs!"),
            vec!["the", "cat", "the", "hat", "and", "2", "dogs"]
        );
        assert!(tokenize("  ,;  ").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_accented_words() {
        assert_eq!(tokenize("Árvore, função; código"), vec!["árvore", "função", "código"]);
    }

    #[test]
    fn test_read_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "alpha beta\nAlpha").unwrap();
        assert_eq!(read_words(&path).unwrap(), vec!["alpha", "beta", "alpha"]);
    }

    #[test]
    fn test_read_words_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert_eq!(read_words(&missing).unwrap_err().category(), "io");

        let binary = dir.path().join("binary.bin");
        std::fs::write(&binary, [0x66, 0xff, 0xfe]).unwrap();
        assert_eq!(read_words(&binary).unwrap_err().category(), "data");
    }
}
