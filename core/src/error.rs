//! Error types for documentation parsing.
//!
//! Every variant describes a structurally degenerate documentation string.
//! These are programming-time errors: they surface while a command tree is
//! being configured, never while user input is being parsed.

use thiserror::Error;

/// Errors that can occur while parsing a documentation string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocError {
    /// The documentation is empty or contains only whitespace.
    #[error("documentation is empty")]
    Empty,

    /// The documentation opens with a section keyword, so there is no headline.
    #[error("documentation starts with section keyword `{keyword}` before any headline")]
    MissingHeadline {
        /// The keyword found on the first line.
        keyword: String,
    },

    /// The first line of the documentation is blank.
    #[error("documentation headline (first line) is blank")]
    BlankHeadline,
}

/// Convenience alias for results with [`DocError`].
pub type Result<T> = std::result::Result<T, DocError>;
