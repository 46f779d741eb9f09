//! Documentation string parsing.
//!
//! A documentation string is read as a headline, an optional descriptive body
//! and a set of sections introduced by keywords. Only the `Args:` section is
//! interpreted; the other sections merely terminate it.
//!
//! ```text
//! Print a greeting message.            <- headline
//!                                      <- separator
//! This command prints "Good morning".  <- description body
//!
//! Args:                                <- args section
//!   title: title of the person.
//!   name: name of the person.
//!
//! Returns:                             <- terminates args
//!   exit status.
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dedent::dedent;
use crate::error::{DocError, Result};

/// Keywords that open the argument section.
pub const ARGS_KEYWORDS: &[&str] = &["Args:"];

/// Keywords that open any other section and therefore close the argument
/// section.
pub const OTHER_KEYWORDS: &[&str] = &["Returns:", "Raises:", "Yields:"];

/// Every recognized section keyword. The descriptive body ends at the first
/// line containing one of these.
pub const SECTION_KEYWORDS: &[&str] = &["Args:", "Returns:", "Raises:", "Yields:"];

/// Structured content extracted from one documentation string.
///
/// # Examples
///
/// ```
/// use docargs_core::DocRecord;
///
/// let record: DocRecord = "Print a goodbye message.\n\nArgs:\n  name: who to greet.\n"
///     .parse()
///     .unwrap();
/// assert_eq!(record.headline, "Print a goodbye message.");
/// assert_eq!(record.description, record.headline);
/// assert_eq!(record.arg_help("name"), Some("who to greet."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRecord {
    /// First line of the documentation, trimmed. Used as short help.
    pub headline: String,
    /// Headline plus the dedented descriptive body. Used as long help.
    pub description: String,
    /// Parameter name to help text, taken from the `Args:` section.
    pub args: BTreeMap<String, String>,
}

impl DocRecord {
    /// Returns the documented help text for parameter `name`.
    pub fn arg_help(&self, name: &str) -> Option<&str> {
        self.args.get(name).map(String::as_str)
    }

    /// Returns `true` when the description carries more than the headline.
    pub fn has_body(&self) -> bool {
        self.description != self.headline
    }
}

impl FromStr for DocRecord {
    type Err = DocError;

    fn from_str(doc: &str) -> Result<Self> {
        parse_doc(doc)
    }
}

/// Parses a documentation string into a [`DocRecord`].
///
/// The descriptive body is every line before the first line that contains a
/// [section keyword](SECTION_KEYWORDS). When that body has at least three
/// lines, the description is the headline, a blank line, and the body from its
/// third line on with the common indentation removed; the second line is the
/// conventional separator and is dropped. Shorter bodies yield the headline
/// alone.
///
/// Argument entries are the lines after the `Args:` marker up to the next
/// other section keyword. Each entry is split on its first colon; the remainder
/// of the line, further colons included, is the help text. Lines without a
/// colon or with an empty name are skipped.
///
/// # Errors
///
/// - [`DocError::Empty`] if `doc` is empty or whitespace.
/// - [`DocError::MissingHeadline`] if the first line already holds a section
///   keyword.
/// - [`DocError::BlankHeadline`] if the first line is blank.
///
/// # Examples
///
/// ```
/// use docargs_core::parse_doc;
///
/// let doc = "\
/// Print a greeting message.
///
///     This command prints a greeting.
///
///     Args:
///       title: title of the person.
///       timeout: seconds to wait: default 5
/// ";
/// let record = parse_doc(doc).unwrap();
/// assert_eq!(record.headline, "Print a greeting message.");
/// assert_eq!(
///     record.description,
///     "Print a greeting message.\n\nThis command prints a greeting.\n"
/// );
/// assert_eq!(record.arg_help("timeout"), Some("seconds to wait: default 5"));
/// ```
pub fn parse_doc(doc: &str) -> Result<DocRecord> {
    if doc.trim().is_empty() {
        return Err(DocError::Empty);
    }

    let lines = split_lines(doc);
    let descriptions: Vec<&str> = lines
        .iter()
        .copied()
        .take_while(|line| find_keyword(line, SECTION_KEYWORDS).is_none())
        .collect();

    let Some(first) = descriptions.first() else {
        let keyword = find_keyword(lines[0], SECTION_KEYWORDS).unwrap_or_default();
        return Err(DocError::MissingHeadline {
            keyword: keyword.to_string(),
        });
    };
    let headline = first.trim();
    if headline.is_empty() {
        return Err(DocError::BlankHeadline);
    }

    let description = if descriptions.len() < 3 {
        headline.to_string()
    } else {
        format!("{headline}\n\n{}", dedent(&descriptions[2..].join("\n")))
    };

    Ok(DocRecord {
        headline: headline.to_string(),
        description,
        args: parse_args_section(&lines),
    })
}

/// Returns the prose of a documentation string: every line before the first
/// [section keyword](SECTION_KEYWORDS), with the first line trimmed, the
/// following lines dedented and surrounding blank lines removed.
///
/// Unlike [`DocRecord::description`], short bodies are kept whole, so this
/// suits documentation of a program as a whole.
///
/// # Examples
///
/// ```
/// use docargs_core::clean_doc;
///
/// let doc = "Greeter tool.\n    Says hello to people.\n\n    Args:\n      name: who.\n";
/// assert_eq!(clean_doc(doc), "Greeter tool.\nSays hello to people.");
/// ```
pub fn clean_doc(doc: &str) -> String {
    let lines = split_lines(doc);
    let prose: Vec<&str> = lines
        .iter()
        .copied()
        .take_while(|line| find_keyword(line, SECTION_KEYWORDS).is_none())
        .collect();
    let Some((first, rest)) = prose.split_first() else {
        return String::new();
    };
    let text = format!("{}\n{}", first.trim(), dedent(&rest.join("\n")));
    text.trim().to_string()
}

fn parse_args_section(lines: &[&str]) -> BTreeMap<String, String> {
    let mut args = BTreeMap::new();
    let section = lines
        .iter()
        .skip_while(|line| find_keyword(line, ARGS_KEYWORDS).is_none())
        .take_while(|line| find_keyword(line, OTHER_KEYWORDS).is_none())
        .skip(1);

    for line in section {
        let Some((name, text)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        args.insert(name.to_string(), text.trim().to_string());
    }
    args
}

fn split_lines(doc: &str) -> Vec<&str> {
    doc.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

fn find_keyword(line: &str, keywords: &[&'static str]) -> Option<&'static str> {
    keywords
        .iter()
        .copied()
        .find(|keyword| line.contains(keyword))
}
