//! The documented top-level parser and command dispatch.

use std::collections::BTreeMap;
use std::ffi::OsString;

use clap::Command;
use clap::error::ErrorKind;
use docargs_core::{clean_doc, parse_doc};
use tracing::debug;

use crate::binding::CommandBinding;
use crate::config::ParserConfig;
use crate::error::{ConfigurationError, RunError};
use crate::kwargs::Kwargs;
use crate::scope::SubParser;

/// A clap command tree whose help text comes from handler documentation.
///
/// Build one from a [`ParserConfig`], register documented handlers with
/// [`add_subcommand`](Self::add_subcommand), add arguments to the returned
/// scopes, then call [`parse_and_run`](Self::parse_and_run).
///
/// `T` is what handlers return and `E` their error type.
pub struct ArgumentParser<T = (), E = anyhow::Error> {
    root: SubParser<T, E>,
}

impl<T, E> ArgumentParser<T, E> {
    /// Creates a parser for the program described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidDoc`] if `config.program_doc` is
    /// set but degenerate.
    pub fn new(config: ParserConfig) -> Result<Self, ConfigurationError> {
        Self::from_command(Command::new(config.name.clone()), config)
    }

    /// Creates a parser from a preconfigured clap command.
    ///
    /// Settings on `command` are kept. An `about` already set on it counts as
    /// an explicit program description, as does `config.description`; only
    /// without either is the description taken from the program
    /// documentation, up to its first section. The `Args:` section of the
    /// program documentation seeds the help texts of root-level arguments, with
    /// entries in `config.argmap` taking precedence.
    ///
    /// `config.formatter` is applied to the root and, through clap, to every
    /// subcommand.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidDoc`] if `config.program_doc` is
    /// set but degenerate.
    pub fn from_command(command: Command, config: ParserConfig) -> Result<Self, ConfigurationError> {
        let mut command = command;
        if !config.name.is_empty() {
            command = command.name(config.name.clone());
        }
        if let Some(version) = &config.version {
            command = command.version(version.clone());
        }

        let mut description = config
            .explicit_description()
            .map(str::to_string)
            .or_else(|| {
                command
                    .get_about()
                    .map(ToString::to_string)
                    .filter(|about| !about.is_empty())
            });
        let mut argmap = BTreeMap::new();

        if let Some(doc) = config.program_doc.as_deref().filter(|d| !d.trim().is_empty()) {
            let info = parse_doc(doc).map_err(|source| ConfigurationError::InvalidDoc {
                command: command.get_name().to_string(),
                source,
            })?;
            if description.is_none() {
                description = Some(clean_doc(doc)).filter(|text| !text.is_empty());
            }
            argmap = info.args;
        }
        argmap.extend(config.argmap);

        if let Some(description) = description {
            command = command.about(description);
        }
        command = config.formatter.apply(command);

        debug!(program = %command.get_name(), args = argmap.len(), "Configured program parser");

        Ok(Self {
            root: SubParser::new(command, argmap),
        })
    }

    /// The root scope.
    pub fn root(&self) -> &SubParser<T, E> {
        &self.root
    }

    /// Adds a root-level argument, filling its help from the program
    /// documentation as [`SubParser::add_argument`] does.
    pub fn add_argument(&mut self, arg: clap::Arg) -> &mut Self {
        self.root.add_argument(arg);
        self
    }

    /// Registers a documented top-level subcommand and returns its scope.
    ///
    /// # Errors
    ///
    /// See [`SubParser::add_subcommand`].
    pub fn add_subcommand(
        &mut self,
        binding: CommandBinding<T, E>,
    ) -> Result<&mut SubParser<T, E>, ConfigurationError> {
        self.root.add_subcommand(binding)
    }

    /// Sets the heading under which subcommands are listed in help output.
    pub fn subcommand_heading(&mut self, heading: impl Into<String>) -> &mut Self {
        let command = std::mem::take(self.root.command_mut());
        *self.root.command_mut() = command.subcommand_help_heading(heading.into());
        self
    }

    /// Assembles the full clap command tree.
    pub fn build_command(&self) -> Command {
        self.root.build()
    }

    /// Renders the long help of the program, or of the subcommand at `path`.
    ///
    /// Returns `None` when `path` names an unknown subcommand.
    pub fn render_help(&self, path: &[&str]) -> Option<String> {
        let mut command = self.build_command();
        command.build();
        let mut target = &mut command;
        for name in path {
            target = target.find_subcommand_mut(name)?;
        }
        Some(target.render_long_help().to_string())
    }

    /// Parses the process arguments and runs the selected handler.
    ///
    /// Invalid input, `--help` and `--version` are handled by clap, which
    /// prints a message and exits the process. The handler's result is
    /// returned unmodified.
    pub fn parse_and_run(&self) -> Result<T, E> {
        self.parse_and_run_from(std::env::args_os())
    }

    /// Like [`parse_and_run`](Self::parse_and_run) with explicit tokens; the
    /// first token is the program name.
    pub fn parse_and_run_from<I, S>(&self, argv: I) -> Result<T, E>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        match self.try_parse_and_run_from(argv) {
            Ok(value) => Ok(value),
            Err(RunError::Handler(err)) => Err(err),
            Err(RunError::Cli(err)) => err.exit(),
            Err(RunError::NoCommand) => self
                .build_command()
                .error(ErrorKind::MissingSubcommand, "no command selected")
                .exit(),
        }
    }

    /// Parses `argv` and runs the selected handler without exiting the
    /// process on invalid input.
    ///
    /// # Errors
    ///
    /// - [`RunError::Cli`] when clap rejects the input or a help/version
    ///   display was requested.
    /// - [`RunError::NoCommand`] when no handler is bound on the matched path.
    /// - [`RunError::Handler`] when the handler fails.
    pub fn try_parse_and_run_from<I, S>(&self, argv: I) -> Result<T, RunError<E>>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        let matches = self.build_command().try_get_matches_from(argv)?;

        let mut scope = &self.root;
        let mut path = Vec::new();
        let mut scopes = vec![&matches];
        let mut current = &matches;
        while let Some((name, sub)) = current.subcommand() {
            let Some(child) = scope.find_subcommand(name) else {
                break;
            };
            scope = child;
            path.push(name);
            scopes.push(sub);
            current = sub;
        }

        let Some(handler) = scope.handler() else {
            return Err(RunError::NoCommand);
        };
        debug!(command = ?path, "Dispatching to handler");
        handler(&Kwargs::new(path, scopes)).map_err(RunError::Handler)
    }
}

impl<T, E> std::fmt::Debug for ArgumentParser<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentParser")
            .field("root", &self.root)
            .finish()
    }
}
