//! Sub-parser scopes: one node of the documented command tree.

use std::collections::BTreeMap;

use clap::{Arg, Command};
use docargs_core::parse_doc;
use tracing::debug;

use crate::binding::{CommandBinding, Handler};
use crate::error::ConfigurationError;

/// One level of the command tree.
///
/// A scope owns the clap command for its level (without children), the
/// argument help texts documented by its handler, the handler itself and its
/// child scopes. The clap tree is assembled from scopes on demand by
/// [`ArgumentParser::build_command`](crate::ArgumentParser::build_command).
pub struct SubParser<T = (), E = anyhow::Error> {
    command: Command,
    argmap: BTreeMap<String, String>,
    handler: Option<Handler<T, E>>,
    children: Vec<SubParser<T, E>>,
}

impl<T, E> SubParser<T, E> {
    pub(crate) fn new(command: Command, argmap: BTreeMap<String, String>) -> Self {
        Self {
            command,
            argmap,
            handler: None,
            children: Vec::new(),
        }
    }

    /// Name of this scope's command.
    pub fn name(&self) -> &str {
        self.command.get_name()
    }

    /// Argument help texts available to [`add_argument`](Self::add_argument).
    pub fn argmap(&self) -> &BTreeMap<String, String> {
        &self.argmap
    }

    /// The clap command configured for this level, without child commands.
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Child scopes in registration order.
    pub fn subcommands(&self) -> impl Iterator<Item = &SubParser<T, E>> {
        self.children.iter()
    }

    /// Returns the child scope registered under `name`.
    pub fn find_subcommand(&self, name: &str) -> Option<&SubParser<T, E>> {
        self.children.iter().find(|child| child.name() == name)
    }

    /// Returns `true` when a handler is bound to this scope.
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    pub(crate) fn handler(&self) -> Option<&Handler<T, E>> {
        self.handler.as_ref()
    }

    pub(crate) fn command_mut(&mut self) -> &mut Command {
        &mut self.command
    }

    /// Adds an argument to this scope.
    ///
    /// When `arg` has no help text, its spellings are looked up in this
    /// scope's documented arguments: the short flag, the long flag, the
    /// aliases, then the id, each with leading dashes removed. The first hit
    /// becomes the help text. If no spelling matches as written, the lookup is
    /// repeated with dashes inside the name replaced by underscores.
    pub fn add_argument(&mut self, arg: Arg) -> &mut Self {
        let arg = if arg.get_help().is_some() {
            arg
        } else {
            match self.documented_help(&arg).map(str::to_string) {
                Some(help) => {
                    debug!(command = %self.name(), arg = %arg.get_id(), "Filled argument help from documentation");
                    arg.help(help)
                }
                None => arg,
            }
        };
        let command = std::mem::take(&mut self.command);
        self.command = command.arg(arg);
        self
    }

    /// Registers a documented subcommand below this scope and returns its
    /// scope.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::MissingDoc`] if the documentation is blank.
    /// - [`ConfigurationError::InvalidDoc`] if it cannot be parsed.
    /// - [`ConfigurationError::UnnamedHandler`] if no name is given and the
    ///   handler is a closure.
    /// - [`ConfigurationError::DuplicateCommand`] if the name is taken.
    ///
    /// The tree is left unchanged on error.
    pub fn add_subcommand(
        &mut self,
        binding: CommandBinding<T, E>,
    ) -> Result<&mut SubParser<T, E>, ConfigurationError> {
        let label = binding
            .resolved_name()
            .unwrap_or_else(|| binding.handler_type.to_string());
        if binding.doc.trim().is_empty() {
            return Err(ConfigurationError::MissingDoc { command: label });
        }
        let info = parse_doc(&binding.doc).map_err(|source| ConfigurationError::InvalidDoc {
            command: label,
            source,
        })?;
        let Some(name) = binding.resolved_name() else {
            return Err(ConfigurationError::UnnamedHandler {
                type_name: binding.handler_type.to_string(),
            });
        };
        if self.find_subcommand(&name).is_some() {
            return Err(ConfigurationError::DuplicateCommand { command: name });
        }

        let CommandBinding {
            handler,
            help,
            description,
            command,
            ..
        } = binding;
        let mut command = command.unwrap_or_default().name(name.clone());

        let help = non_empty(help).or_else(|| explicit_text(command.get_about()));
        command = command.about(help.unwrap_or_else(|| info.headline.clone()));
        let description =
            non_empty(description).or_else(|| explicit_text(command.get_long_about()));
        command = command.long_about(description.unwrap_or_else(|| info.description.clone()));

        debug!(command = %name, args = info.args.len(), "Registered subcommand");

        let mut scope = SubParser::new(command, info.args);
        scope.handler = Some(handler);
        self.children.push(scope);
        let index = self.children.len() - 1;
        Ok(&mut self.children[index])
    }

    /// Assembles this scope and its descendants into a clap command.
    pub(crate) fn build(&self) -> Command {
        let mut command = self.command.clone();
        if self.handler.is_none() && !self.children.is_empty() {
            command = command.subcommand_required(true);
        }
        for child in &self.children {
            command = command.subcommand(child.build());
        }
        command
    }

    fn documented_help(&self, arg: &Arg) -> Option<&str> {
        let spellings = arg_spellings(arg);
        spellings
            .iter()
            .find_map(|name| self.argmap.get(name.as_str()))
            .or_else(|| {
                spellings
                    .iter()
                    .find_map(|name| self.argmap.get(name.replace('-', "_").as_str()))
            })
            .map(String::as_str)
    }
}

impl<T, E> std::fmt::Debug for SubParser<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubParser")
            .field("name", &self.name())
            .field("argmap", &self.argmap)
            .field("has_handler", &self.handler.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// Spellings of `arg` in lookup order, with leading dashes removed.
fn arg_spellings(arg: &Arg) -> Vec<String> {
    let mut names = Vec::new();
    if let Some(short) = arg.get_short() {
        names.push(short.to_string());
    }
    if let Some(long) = arg.get_long() {
        names.push(long.to_string());
    }
    if let Some(aliases) = arg.get_all_aliases() {
        names.extend(aliases.into_iter().map(str::to_string));
    }
    names.push(arg.get_id().as_str().to_string());

    let mut spellings: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let stripped = name.trim_start_matches('-').to_string();
        if !stripped.is_empty() && !spellings.contains(&stripped) {
            spellings.push(stripped);
        }
    }
    spellings
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

fn explicit_text(text: Option<&clap::builder::StyledStr>) -> Option<String> {
    non_empty(text.map(ToString::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kwargs::Kwargs;

    type Scope = SubParser<i32, anyhow::Error>;

    fn root() -> Scope {
        SubParser::new(Command::new("prog"), BTreeMap::new())
    }

    fn greeting(_: &Kwargs<'_>) -> anyhow::Result<i32> {
        Ok(0)
    }

    const GREETING_DOC: &str = "Print a greeting message.

    This command print \"Good morning, <title> <name>.\".

    Args:
      title: title of the person say greetings to.
      name: name of the person say greetings to.
      dry_run: only print what would be said.
    ";

    fn help_of(scope: &Scope, id: &str) -> Option<String> {
        scope
            .command()
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .and_then(|arg| arg.get_help())
            .map(ToString::to_string)
    }

    #[test]
    fn test_subcommand_derives_help_and_description() {
        let mut root = root();
        let scope = root
            .add_subcommand(CommandBinding::new(greeting, GREETING_DOC))
            .unwrap();
        assert_eq!(scope.name(), "greeting");
        assert_eq!(
            scope.command().get_about().map(ToString::to_string).as_deref(),
            Some("Print a greeting message.")
        );
        assert_eq!(
            scope.command().get_long_about().map(ToString::to_string).as_deref(),
            Some("Print a greeting message.\n\nThis command print \"Good morning, <title> <name>.\".\n")
        );
        assert_eq!(scope.argmap().len(), 3);
        assert!(scope.has_handler());
    }

    #[test]
    fn test_explicit_values_win() {
        let mut root = root();
        let scope = root
            .add_subcommand(
                CommandBinding::new(greeting, GREETING_DOC)
                    .name("hello")
                    .help("Say hello.")
                    .description("Long hello."),
            )
            .unwrap();
        assert_eq!(scope.name(), "hello");
        assert_eq!(
            scope.command().get_about().map(ToString::to_string).as_deref(),
            Some("Say hello.")
        );
        assert_eq!(
            scope.command().get_long_about().map(ToString::to_string).as_deref(),
            Some("Long hello.")
        );
    }

    #[test]
    fn test_empty_explicit_help_is_replaced() {
        let mut root = root();
        let scope = root
            .add_subcommand(CommandBinding::new(greeting, GREETING_DOC).help(""))
            .unwrap();
        assert_eq!(
            scope.command().get_about().map(ToString::to_string).as_deref(),
            Some("Print a greeting message.")
        );
    }

    #[test]
    fn test_whitespace_help_counts_as_explicit() {
        let mut root = root();
        let scope = root
            .add_subcommand(
                CommandBinding::new(greeting, GREETING_DOC)
                    .help(" ")
                    .description("  "),
            )
            .unwrap();
        assert_eq!(
            scope.command().get_about().map(ToString::to_string).as_deref(),
            Some(" ")
        );
        assert_eq!(
            scope.command().get_long_about().map(ToString::to_string).as_deref(),
            Some("  ")
        );
    }

    #[test]
    fn test_template_about_counts_as_explicit() {
        let mut root = root();
        let scope = root
            .add_subcommand(
                CommandBinding::new(greeting, GREETING_DOC)
                    .command(Command::new("ignored").about("Template about.").alias("hi")),
            )
            .unwrap();
        assert_eq!(scope.name(), "greeting");
        assert_eq!(
            scope.command().get_about().map(ToString::to_string).as_deref(),
            Some("Template about.")
        );
        assert!(scope.command().get_all_aliases().any(|a| a == "hi"));
    }

    #[test]
    fn test_missing_doc_leaves_tree_unchanged() {
        let mut root = root();
        let err = root
            .add_subcommand(CommandBinding::new(greeting, "  \n"))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingDoc { ref command } if command == "greeting"));
        assert_eq!(root.subcommands().count(), 0);
    }

    #[test]
    fn test_degenerate_doc_is_rejected() {
        let mut root = root();
        let err = root
            .add_subcommand(CommandBinding::new(greeting, "Args:\n  x: y"))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidDoc { .. }));
        assert_eq!(root.subcommands().count(), 0);
    }

    #[test]
    fn test_closure_requires_name() {
        let mut root = root();
        let err = root
            .add_subcommand(CommandBinding::new(|_| Ok(1), "Doc."))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnnamedHandler { .. }));
        assert!(
            root.add_subcommand(CommandBinding::new(|_| Ok(1), "Doc.").name("closure"))
                .is_ok()
        );
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut root = root();
        root.add_subcommand(CommandBinding::new(greeting, GREETING_DOC))
            .unwrap();
        let err = root
            .add_subcommand(CommandBinding::new(greeting, GREETING_DOC))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateCommand { ref command } if command == "greeting"));
        assert_eq!(root.subcommands().count(), 1);
    }

    #[test]
    fn test_argument_help_from_documentation() {
        let mut root = root();
        let scope = root
            .add_subcommand(CommandBinding::new(greeting, GREETING_DOC))
            .unwrap();
        scope
            .add_argument(Arg::new("title"))
            .add_argument(Arg::new("person").short('n').long("name"))
            .add_argument(Arg::new("dry-run").long("dry-run"))
            .add_argument(Arg::new("other").long("other"));
        assert_eq!(
            help_of(scope, "title").as_deref(),
            Some("title of the person say greetings to.")
        );
        assert_eq!(
            help_of(scope, "person").as_deref(),
            Some("name of the person say greetings to.")
        );
        assert_eq!(
            help_of(scope, "dry-run").as_deref(),
            Some("only print what would be said.")
        );
        assert_eq!(help_of(scope, "other"), None);
    }

    #[test]
    fn test_explicit_argument_help_is_kept() {
        let mut root = root();
        let scope = root
            .add_subcommand(CommandBinding::new(greeting, GREETING_DOC))
            .unwrap();
        scope.add_argument(Arg::new("name").help("Explicit."));
        assert_eq!(help_of(scope, "name").as_deref(), Some("Explicit."));
    }

    #[test]
    fn test_first_matching_spelling_wins() {
        let mut argmap = BTreeMap::new();
        argmap.insert("v".to_string(), "short entry.".to_string());
        argmap.insert("verbose".to_string(), "long entry.".to_string());
        let mut scope: Scope = SubParser::new(Command::new("prog"), argmap);
        scope.add_argument(Arg::new("verbose").short('v').long("verbose"));
        assert_eq!(help_of(&scope, "verbose").as_deref(), Some("short entry."));
    }

    #[test]
    fn test_build_marks_dispatch_only_scopes() {
        let mut root = root();
        root.add_subcommand(CommandBinding::new(greeting, GREETING_DOC))
            .unwrap();
        let command = root.build();
        assert!(command.is_subcommand_required_set());
        assert!(command.find_subcommand("greeting").is_some());
    }

    #[test]
    fn test_arg_spellings_order() {
        let arg = Arg::new("dry_run")
            .short('d')
            .long("dry-run")
            .alias("simulate");
        assert_eq!(arg_spellings(&arg), vec!["d", "dry-run", "simulate", "dry_run"]);
    }
}
