//! Feedback content validation
//!
//! This module implements the intake pipeline for submitted feedback:
//! presence and length checks, HTML escaping, category normalization and
//! the heuristic spam/profanity filters.
//!
//! # Module Structure
//!
//! ```text
//! validation/
//! ├── mod.rs       - Validator orchestration and escaping
//! ├── spam.rs      - Spam heuristics
//! └── profanity.rs - Profanity filter
//! ```
//!
//! # Pipeline
//!
//! The checks run in a fixed order and stop at the first failure:
//!
//! 1. Content must be present and non-empty
//! 2. Trim surrounding whitespace
//! 3. Length bounds on the trimmed text
//! 4. Escape markup-significant characters
//! 5. Category must normalize to a configured tag
//! 6. Spam heuristics on the escaped text
//! 7. Profanity filtering (replaces matches, never rejects)
//!
//! The escaped, profanity-filtered text is the canonical stored content.
//! Validation is pure: no I/O, and the same input always produces the same
//! outcome.

pub mod profanity;
pub mod spam;

use thiserror::Error;

use crate::config::FeedbackLimits;
use profanity::ProfanityFilter;
use spam::{SpamDetector, SpamReason};

/// Why a submission was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No content was supplied.
    #[error("Content is required")]
    MissingContent,

    /// Trimmed content is shorter than the configured minimum.
    #[error("Feedback must be at least {min} characters")]
    TooShort {
        /// Configured minimum length.
        min: usize,
    },

    /// Trimmed content is longer than the configured maximum.
    #[error("Feedback must not exceed {max} characters")]
    TooLong {
        /// Configured maximum length.
        max: usize,
    },

    /// Category missing or not on the configured list.
    #[error("{message}")]
    InvalidCategory {
        /// Human-readable rejection message.
        message: String,
    },

    /// Content tripped a spam heuristic.
    #[error("Spam detected: {reason}")]
    SpamDetected {
        /// Which heuristic fired.
        reason: SpamReason,
    },
}

/// Successful validation outcome.
///
/// `content` is the escaped, profanity-filtered text that gets persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFeedback {
    /// Canonical stored content.
    pub content: String,
    /// Normalized category tag.
    pub category: String,
    /// True if the profanity filter replaced anything.
    pub has_profanity: bool,
}

/// Validates raw submissions against the configured constraints.
///
/// Built once at startup; the heuristic filters are compiled in the
/// constructor so per-request validation allocates only for the text
/// transforms themselves.
#[derive(Debug)]
pub struct ContentValidator {
    limits: FeedbackLimits,
    spam: SpamDetector,
    profanity: ProfanityFilter,
}

impl ContentValidator {
    /// Create a validator for the given constraints.
    pub fn new(limits: FeedbackLimits) -> Self {
        Self {
            limits,
            spam: SpamDetector::new(),
            profanity: ProfanityFilter::new(),
        }
    }

    /// Run the full validation pipeline.
    ///
    /// # Arguments
    ///
    /// * `content` - Raw submitted text, if any
    /// * `category` - Raw submitted category tag, if any
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`ValidationError`]. A failed
    /// validation has no side effects; nothing is persisted by this type.
    pub fn validate(
        &self,
        content: Option<&str>,
        category: Option<&str>,
    ) -> Result<ValidatedFeedback, ValidationError> {
        let content = content.unwrap_or_default();
        if content.is_empty() {
            return Err(ValidationError::MissingContent);
        }

        let trimmed = content.trim();
        let length = trimmed.chars().count();
        if length < self.limits.min_length {
            return Err(ValidationError::TooShort {
                min: self.limits.min_length,
            });
        }
        if length > self.limits.max_length {
            return Err(ValidationError::TooLong {
                max: self.limits.max_length,
            });
        }

        let escaped = escape_html(trimmed);

        let category = self.validate_category(category)?;

        // Spam heuristics run on the escaped text, which is what would be
        // stored if the submission passes.
        if let Some(reason) = self.spam.scan(&escaped) {
            return Err(ValidationError::SpamDetected { reason });
        }

        let filtered = self.profanity.apply(&escaped);

        Ok(ValidatedFeedback {
            content: filtered.text,
            category,
            has_profanity: filtered.flagged,
        })
    }

    /// Normalize and check the category tag.
    fn validate_category(&self, category: Option<&str>) -> Result<String, ValidationError> {
        let category = category.unwrap_or_default();
        if category.is_empty() {
            return Err(ValidationError::InvalidCategory {
                message: "Category is required".to_string(),
            });
        }

        let normalized = category.trim().to_lowercase();
        if !self.limits.is_valid_category(&normalized) {
            return Err(ValidationError::InvalidCategory {
                message: format!(
                    "Invalid category. Must be one of: {}",
                    self.limits.categories_joined()
                ),
            });
        }

        Ok(normalized)
    }
}

/// Escape markup-significant characters so stored content is inert in any
/// HTML rendering surface.
///
/// The ampersand is handled by the same single pass as everything else, so
/// already-escaped input is escaped again rather than double-interpreted.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            other => escaped.push(other),
        }
    }
    escaped
}
