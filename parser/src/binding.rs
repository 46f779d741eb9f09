//! Registration records for documented command handlers.

use clap::Command;

use crate::kwargs::Kwargs;

/// A command implementation: receives the parsed values of the matched
/// command path and returns the command's result.
pub type Handler<T, E> = Box<dyn Fn(&Kwargs<'_>) -> Result<T, E>>;

/// A handler together with its mandatory documentation and the settings the
/// caller chose explicitly.
///
/// Every setting left unset is derived from the documentation when the
/// binding is registered with
/// [`add_subcommand`](crate::SubParser::add_subcommand):
///
/// | Setting         | Derived from                     |
/// |-----------------|----------------------------------|
/// | `name`          | the handler's function name      |
/// | `help`          | [`DocRecord::headline`]          |
/// | `description`   | [`DocRecord::description`]       |
///
/// [`DocRecord::headline`]: docargs_core::DocRecord::headline
/// [`DocRecord::description`]: docargs_core::DocRecord::description
///
/// The help layout is not set per command; it is chosen for the whole tree
/// with [`ParserConfig::formatter`](crate::ParserConfig::formatter).
///
/// # Examples
///
/// ```
/// use docargs::{CommandBinding, Kwargs};
///
/// fn goodbye(kwargs: &Kwargs<'_>) -> anyhow::Result<i32> {
///     let name: String = kwargs.required("name")?;
///     println!("Goodbye, {name}");
///     Ok(0)
/// }
///
/// let binding = CommandBinding::new(goodbye, "Print a goodbye message.")
///     .help("Say goodbye.");
/// assert_eq!(binding.derived_name(), Some("goodbye"));
/// ```
pub struct CommandBinding<T = (), E = anyhow::Error> {
    pub(crate) handler: Handler<T, E>,
    pub(crate) handler_type: &'static str,
    pub(crate) doc: String,
    pub(crate) name: Option<String>,
    pub(crate) help: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) command: Option<Command>,
}

impl<T, E> CommandBinding<T, E> {
    /// Binds `handler` to its documentation.
    pub fn new<F>(handler: F, doc: impl Into<String>) -> Self
    where
        F: Fn(&Kwargs<'_>) -> Result<T, E> + 'static,
    {
        Self {
            handler: Box::new(handler),
            handler_type: std::any::type_name::<F>(),
            doc: doc.into(),
            name: None,
            help: None,
            description: None,
            command: None,
        }
    }

    /// Sets the command name instead of deriving it from the handler.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the short help shown in the parent's command list.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Sets the long description shown by `--help`.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Starts from a preconfigured clap command (aliases, headings, settings).
    ///
    /// An `about` or `long_about` already set on `command` counts as explicit
    /// help or description. Its name is replaced by the binding's name.
    pub fn command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    /// The name derived from the handler's type, if it has a usable one.
    ///
    /// Function items yield their own name; closures have none.
    pub fn derived_name(&self) -> Option<&'static str> {
        handler_name(self.handler_type)
    }

    /// The command name this binding registers under.
    pub(crate) fn resolved_name(&self) -> Option<String> {
        match self.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => Some(name.to_string()),
            None => self.derived_name().map(str::to_string),
        }
    }
}

impl<T, E> std::fmt::Debug for CommandBinding<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandBinding")
            .field("handler", &self.handler_type)
            .field("name", &self.name)
            .field("help", &self.help)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Extracts a function name from a `std::any::type_name` string such as
/// `my_crate::commands::greeting` or `my_crate::run::<u8>`.
fn handler_name(type_name: &'static str) -> Option<&'static str> {
    if type_name.contains("{{closure}}") || type_name.starts_with('&') {
        return None;
    }
    let path = type_name.split('<').next().unwrap_or(type_name);
    let path = path.trim_end_matches("::");
    let name = path.rsplit("::").next().unwrap_or(path);
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '-');
    valid.then_some(name)
}
