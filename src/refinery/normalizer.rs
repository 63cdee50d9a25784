// * Text Normalizer
// * Lowercases, strips everything outside [a-z0-9] and whitespace, collapses runs of whitespace.
// * Stored documents and query text must both pass through here before signing.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());

static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalizes raw document text into the canonical form used for shingling
///
/// Total function: any input yields a (possibly empty) string.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = DISALLOWED_CHARS.replace_all(&lowered, "");
    let collapsed = WHITESPACE_RUNS.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Counts whitespace-separated words of already normalized text
pub fn word_count(normalized: &str) -> usize {
    normalized.split_whitespace().count()
}

/// Distinct words of already normalized text
pub fn word_set(normalized: &str) -> HashSet<String> {
    normalized.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(normalize("  Hello,   WORLD!  How are YOU?  "), "hello world how are you");
    }

    #[test]
    fn test_collapses_tabs_and_newlines() {
        assert_eq!(normalize("one\t\ttwo\n\nthree"), "one two three");
    }

    #[test]
    fn test_non_ascii_letters_removed() {
        // * Accented letters fall outside [a-z0-9]
        assert_eq!(normalize("Café naïve"), "caf nave");
    }

    #[test]
    fn test_hyphen_joins_words() {
        assert_eq!(normalize("MAN-FLU"), "manflu");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!! ??? ..."), "");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("The Quick, Brown FOX -- jumps!");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("the cat sat"), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_word_set_drops_repeats() {
        let words = word_set("the cat saw the dog");
        assert_eq!(words.len(), 4);
        assert!(words.contains("the"));
        assert!(word_set("").is_empty());
    }
}
