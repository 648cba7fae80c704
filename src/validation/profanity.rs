//! Profanity filter
//!
//! Replaces a small fixed set of obfuscation-tolerant word patterns with a
//! placeholder token. A match never rejects the submission; it only marks
//! the outcome so callers can log or count filtered content.
//!
//! The interface is intentionally a single `text -> outcome` call so a real
//! detection engine can replace this implementation later.

use regex::Regex;

/// Token substituted for every matched word.
const PLACEHOLDER: &str = "[filtered]";

/// Result of running the filter over one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Text with every match replaced by the placeholder.
    pub text: String,
    /// True if anything was replaced.
    pub flagged: bool,
}

/// Pattern-based profanity filter.
///
/// Patterns tolerate `*` substitutions inside the word, are matched
/// case-insensitively and are anchored on word boundaries.
#[derive(Debug)]
pub struct ProfanityFilter {
    pattern: Regex,
}

impl ProfanityFilter {
    /// Compile the filter patterns.
    pub fn new() -> Self {
        // The pattern set is fixed and known-good, so compilation cannot
        // fail at runtime.
        let pattern = Regex::new(
            r"(?i)\b(f[u*]+ck|sh[i*]+t|d[a*]+mn|b[i*]+tch|a[s*]+shole)\b",
        )
        .expect("profanity pattern is valid");

        Self { pattern }
    }

    /// Replace matches in `text` with the placeholder token.
    pub fn apply(&self, text: &str) -> FilterOutcome {
        if !self.pattern.is_match(text) {
            return FilterOutcome {
                text: text.to_string(),
                flagged: false,
            };
        }

        FilterOutcome {
            text: self.pattern.replace_all(text, PLACEHOLDER).into_owned(),
            flagged: true,
        }
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_word_filtered() {
        let filter = ProfanityFilter::new();
        let outcome = filter.apply("well damn that broke");
        assert!(outcome.flagged);
        assert_eq!(outcome.text, "well [filtered] that broke");
    }

    #[test]
    fn test_obfuscated_word_filtered() {
        let filter = ProfanityFilter::new();
        let outcome = filter.apply("sh*t happens I guess");
        assert!(outcome.flagged);
        assert_eq!(outcome.text, "[filtered] happens I guess");
    }

    #[test]
    fn test_case_insensitive() {
        let filter = ProfanityFilter::new();
        let outcome = filter.apply("DAMN this is slow");
        assert!(outcome.flagged);
        assert_eq!(outcome.text, "[filtered] this is slow");
    }

    #[test]
    fn test_word_boundaries_respected() {
        let filter = ProfanityFilter::new();
        // Substrings inside larger words are left alone.
        let outcome = filter.apply("the dammit dam is damp");
        assert!(!outcome.flagged);
        assert_eq!(outcome.text, "the dammit dam is damp");
    }

    #[test]
    fn test_multiple_matches() {
        let filter = ProfanityFilter::new();
        let outcome = filter.apply("damn it and damn it again");
        assert!(outcome.flagged);
        assert_eq!(outcome.text, "[filtered] it and [filtered] it again");
    }

    #[test]
    fn test_clean_text_untouched() {
        let filter = ProfanityFilter::new();
        let outcome = filter.apply("a perfectly polite remark");
        assert!(!outcome.flagged);
        assert_eq!(outcome.text, "a perfectly polite remark");
    }
}
