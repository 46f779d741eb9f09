//! Documentation-driven help for clap command trees.
//!
//! Command handlers carry their documentation as a plain string. When a
//! handler is registered, its documentation is parsed with
//! [`docargs_core::parse_doc`] and the result fills in what the caller left
//! unset:
//!
//! - the command name, from the handler's function name;
//! - the short help shown in command lists, from the headline;
//! - the long description shown by `--help`, from headline and body;
//! - argument help texts, from the `Args:` section, when arguments are added
//!   to the command's [`SubParser`].
//!
//! Parsing of the command line itself is left to [`clap`], which is
//! re-exported. [`ArgumentParser::parse_and_run`] dispatches to the handler of
//! the matched subcommand with the parsed values as [`Kwargs`].
//!
//! # Example
//!
//! ```
//! use docargs::clap::Arg;
//! use docargs::{ArgumentParser, CommandBinding, Kwargs, ParserConfig};
//!
//! const GREETING_DOC: &str = "\
//! Print a greeting message.
//!
//! This command prints \"Good morning, <title> <name>.\".
//!
//! Args:
//!   title: title of the person say greetings to.
//!   name: name of the person say greetings to.
//! ";
//!
//! fn greeting(kwargs: &Kwargs<'_>) -> anyhow::Result<String> {
//!     let title: String = kwargs.required("title")?;
//!     let name: String = kwargs.required("name")?;
//!     Ok(format!("Good morning, {title} {name}."))
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut parser = ArgumentParser::new(
//!     ParserConfig::new("sample").with_program_doc("Sample command.\n\nGreets people."),
//! )?;
//! parser
//!     .add_subcommand(CommandBinding::new(greeting, GREETING_DOC))?
//!     .add_argument(Arg::new("title"))
//!     .add_argument(Arg::new("name"));
//!
//! let message = parser.parse_and_run_from(["sample", "greeting", "Dr.", "Ada"])?;
//! assert_eq!(message, "Good morning, Dr. Ada.");
//!
//! let command = parser.build_command();
//! let sub = command.find_subcommand("greeting").unwrap();
//! assert_eq!(sub.get_about().unwrap().to_string(), "Print a greeting message.");
//! # Ok(())
//! # }
//! ```

mod binding;
mod config;
mod error;
mod kwargs;
mod parser;
mod scope;

pub use clap;
pub use docargs_core::{DocError, DocRecord, clean_doc, dedent, parse_doc};

pub use binding::{CommandBinding, Handler};
pub use config::{HelpFormatter, ParserConfig};
pub use error::{ArgumentError, ConfigurationError, RunError};
pub use kwargs::Kwargs;
pub use parser::ArgumentParser;
pub use scope::SubParser;
