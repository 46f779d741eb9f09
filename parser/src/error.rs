//! Error types for the parser adapter.
//!
//! [`ConfigurationError`] covers mistakes made while building a command tree
//! and is raised before any command-line input is read. [`ArgumentError`] is
//! returned to handlers looking up parsed values. [`RunError`] is what the
//! non-exiting dispatch entry point reports.

use docargs_core::DocError;
use thiserror::Error;

/// Errors raised while registering commands.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The handler was registered without documentation.
    #[error("no documentation given for command `{command}`")]
    MissingDoc {
        /// Name (or type name) of the offending handler.
        command: String,
    },

    /// The documentation could not be parsed.
    #[error("invalid documentation for `{command}`: {source}")]
    InvalidDoc {
        /// Command or program the documentation belongs to.
        command: String,
        /// Underlying parse failure.
        #[source]
        source: DocError,
    },

    /// No command name was supplied and none could be derived from the handler.
    #[error("cannot derive a command name from handler `{type_name}`; supply one explicitly")]
    UnnamedHandler {
        /// Type name of the handler.
        type_name: String,
    },

    /// A command with the same name already exists in this scope.
    #[error("command `{command}` is already registered")]
    DuplicateCommand {
        /// The duplicated name.
        command: String,
    },
}

/// Errors returned when a handler reads a parsed value.
#[derive(Debug, Error)]
pub enum ArgumentError {
    /// The argument was not given and has no default.
    #[error("missing value for argument `{name}`")]
    Missing {
        /// Argument id.
        name: String,
    },

    /// The stored value has a different type than requested.
    #[error("cannot read argument `{name}`: {source}")]
    Mismatch {
        /// Argument id.
        name: String,
        /// clap's lookup failure.
        #[source]
        source: clap::parser::MatchesError,
    },
}

/// Errors returned by
/// [`ArgumentParser::try_parse_and_run_from`](crate::ArgumentParser::try_parse_and_run_from).
#[derive(Debug, Error)]
pub enum RunError<E> {
    /// Command-line input was rejected by clap (including `--help` and
    /// `--version` requests).
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// No handler is bound on the matched command path.
    #[error("no command selected")]
    NoCommand,

    /// The selected handler failed.
    #[error("{0}")]
    Handler(E),
}
