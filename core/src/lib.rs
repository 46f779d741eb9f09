//! Docstring parsing primitives for documentation-driven CLI help.
//!
//! This crate turns a free-form documentation string into the pieces a
//! command-line parser needs:
//!
//! - [`DocRecord::headline`] — the first line, used as short help.
//! - [`DocRecord::description`] — headline plus the dedented body, used as
//!   long help.
//! - [`DocRecord::args`] — parameter help texts from the `Args:` section.
//!
//! Parsing is pure and never touches I/O. Degenerate input (empty text, or a
//! section keyword before any headline) is rejected with a [`DocError`].
//!
//! # Example
//!
//! ```
//! use docargs_core::parse_doc;
//!
//! let doc = "\
//! Print a greeting message.
//!
//! This command prints \"Good morning, <title> <name>.\".
//!
//! Args:
//!   title: title of the person say greetings to.
//!   name: name of the person say greetings to.
//! ";
//!
//! let record = parse_doc(doc).unwrap();
//! assert_eq!(record.headline, "Print a greeting message.");
//! assert!(record.description.starts_with("Print a greeting message.\n\nThis command"));
//! assert_eq!(record.arg_help("name"), Some("name of the person say greetings to."));
//! assert_eq!(record.args.len(), 2);
//! ```

mod dedent;
mod doc;
mod error;

pub use dedent::dedent;
pub use doc::{
    ARGS_KEYWORDS, DocRecord, OTHER_KEYWORDS, SECTION_KEYWORDS, clean_doc, parse_doc,
};
pub use error::{DocError, Result};
