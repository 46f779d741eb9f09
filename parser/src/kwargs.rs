//! Named access to parsed command-line values.

use std::any::Any;

use clap::ArgMatches;
use clap::parser::MatchesError;

use crate::error::ArgumentError;

/// Parsed values of every command level on the matched path, passed to the
/// selected handler.
///
/// Values are looked up by argument id. The most specific level (the selected
/// subcommand) is searched first, then its parents up to the program root, so
/// a handler sees root-level options alongside its own arguments.
#[derive(Debug, Clone)]
pub struct Kwargs<'a> {
    path: Vec<&'a str>,
    scopes: Vec<&'a ArgMatches>,
}

impl<'a> Kwargs<'a> {
    /// `scopes` runs from the program root to the selected command; `path`
    /// holds the subcommand names below the root.
    pub(crate) fn new(path: Vec<&'a str>, scopes: Vec<&'a ArgMatches>) -> Self {
        Self { path, scopes }
    }

    /// Names of the subcommands selected below the program root.
    pub fn command_path(&self) -> &[&'a str] {
        &self.path
    }

    /// Name of the selected command, if any subcommand matched.
    pub fn command(&self) -> Option<&'a str> {
        self.path.last().copied()
    }

    /// Returns the value of argument `name`, or `None` when it was not given
    /// and has no default.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Mismatch`] when the stored value is not a `T`.
    pub fn get<T>(&self, name: &str) -> Result<Option<T>, ArgumentError>
    where
        T: Any + Clone + Send + Sync + 'static,
    {
        for matches in self.scopes.iter().rev() {
            match matches.try_get_one::<T>(name) {
                Ok(Some(value)) => return Ok(Some(value.clone())),
                Ok(None) | Err(MatchesError::UnknownArgument { .. }) => {}
                Err(source) => {
                    return Err(ArgumentError::Mismatch {
                        name: name.to_string(),
                        source,
                    });
                }
            }
        }
        Ok(None)
    }

    /// Returns the value of argument `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when no value is present, or
    /// [`ArgumentError::Mismatch`] when the stored value is not a `T`.
    pub fn required<T>(&self, name: &str) -> Result<T, ArgumentError>
    where
        T: Any + Clone + Send + Sync + 'static,
    {
        self.get(name)?.ok_or_else(|| ArgumentError::Missing {
            name: name.to_string(),
        })
    }

    /// Returns every value of a multi-valued argument, or an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Mismatch`] when the stored values are not `T`s.
    pub fn many<T>(&self, name: &str) -> Result<Vec<T>, ArgumentError>
    where
        T: Any + Clone + Send + Sync + 'static,
    {
        for matches in self.scopes.iter().rev() {
            match matches.try_get_many::<T>(name) {
                Ok(Some(values)) => return Ok(values.cloned().collect()),
                Ok(None) | Err(MatchesError::UnknownArgument { .. }) => {}
                Err(source) => {
                    return Err(ArgumentError::Mismatch {
                        name: name.to_string(),
                        source,
                    });
                }
            }
        }
        Ok(Vec::new())
    }

    /// Returns `true` when boolean flag `name` is set at any level.
    ///
    /// Unlike [`get`](Self::get), an unset flag on an inner level does not
    /// hide the same flag set on a parent, since clap stores `false` for
    /// every unset `SetTrue` flag.
    pub fn flag(&self, name: &str) -> bool {
        self.scopes
            .iter()
            .any(|level| matches!(level.try_get_one::<bool>(name), Ok(Some(true))))
    }

    /// Returns `true` when argument `name` has a value at any level.
    pub fn contains(&self, name: &str) -> bool {
        self.scopes
            .iter()
            .any(|matches| matches.try_contains_id(name).unwrap_or(false))
    }

    /// Ids of all arguments known on the matched path, innermost first.
    pub fn names(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = Vec::new();
        for matches in self.scopes.iter().rev().copied() {
            for id in matches.ids() {
                let name = id.as_str();
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}
