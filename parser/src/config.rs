//! Top-level parser configuration.
//!
//! [`ParserConfig`] collects the program-level metadata that is not derived
//! from a single command: the program name, version, an explicit description
//! or the program's own documentation, and the help layout. It is
//! serde-serializable so a program can keep this metadata next to its other
//! settings.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "name": "greeter",
//!   "version": "1.2.0",
//!   "program_doc": "Sample command.\n\nThis text is the program description.",
//!   "formatter": "raw"
//! }
//! ```

use std::collections::BTreeMap;

use clap::Command;
use serde::{Deserialize, Serialize};

/// Layout used when rendering help text.
///
/// The layout is a property of the whole command tree: clap hands the root's
/// terminal width down to every subcommand when the tree is built.
///
/// # Examples
///
/// ```
/// use docargs::HelpFormatter;
///
/// assert_eq!(HelpFormatter::default(), HelpFormatter::Raw);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HelpFormatter {
    /// Render documentation line breaks verbatim (the default).
    #[default]
    Raw,
    /// Re-wrap help text at the given column.
    Wrapped {
        /// Column to wrap at.
        width: usize,
    },
}

impl HelpFormatter {
    /// Applies this layout to `command`.
    pub(crate) fn apply(self, command: Command) -> Command {
        match self {
            HelpFormatter::Raw => command.term_width(0),
            HelpFormatter::Wrapped { width } => command.term_width(width),
        }
    }
}

/// Configuration for constructing an [`ArgumentParser`](crate::ArgumentParser).
///
/// # Examples
///
/// ```
/// use docargs::{HelpFormatter, ParserConfig};
///
/// let config = ParserConfig::new("greeter")
///     .with_version("1.0.0")
///     .with_program_doc("Sample command.\n\nGreets people.")
///     .with_formatter(HelpFormatter::Wrapped { width: 80 });
/// assert_eq!(config.name, "greeter");
/// assert!(config.description.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Program name shown in usage lines.
    pub name: String,
    /// Program version, enabling `--version` when set.
    pub version: Option<String>,
    /// Explicit program description. Takes precedence over `program_doc`.
    pub description: Option<String>,
    /// Documentation of the program as a whole, used as the description when
    /// no explicit one is given.
    pub program_doc: Option<String>,
    /// Help layout of the program and all of its subcommands.
    pub formatter: HelpFormatter,
    /// Help texts for root-level arguments, keyed by argument name.
    pub argmap: BTreeMap<String, String>,
}

impl ParserConfig {
    /// Creates a configuration for program `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the program version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets an explicit program description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the program documentation.
    pub fn with_program_doc(mut self, doc: impl Into<String>) -> Self {
        self.program_doc = Some(doc.into());
        self
    }

    /// Sets the help layout.
    pub fn with_formatter(mut self, formatter: HelpFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Adds a help text for a root-level argument.
    pub fn with_arg_help(mut self, name: impl Into<String>, help: impl Into<String>) -> Self {
        self.argmap.insert(name.into(), help.into());
        self
    }

    /// Returns the explicit description when it is set and non-empty.
    pub(crate) fn explicit_description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}
