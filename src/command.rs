use crate::value::Value;
use std::collections::BTreeMap;
use std::io::Write;

/// Signature of a user command.
///
/// A callback gets the arguments that followed the command name and the
/// interpreter's output sink. Errors it returns (including conversion errors
/// propagated with `?`) are caught by the dispatch loop.
pub type Callback<'a> = Box<dyn FnMut(&[Value], &mut dyn Write) -> anyhow::Result<()> + 'a>;

/// What runs when a command is dispatched.
pub enum Handler<'a> {
    /// The built-in `help`, which needs to read the registry itself.
    Help,
    /// A registered user callback.
    Callback(Callback<'a>),
}

impl<'a> Handler<'a> {
    /// Box a closure as a user callback.
    pub fn callback<F>(callback: F) -> Self
    where
        F: FnMut(&[Value], &mut dyn Write) -> anyhow::Result<()> + 'a,
    {
        Handler::Callback(Box::new(callback))
    }
}

/// A registered command: its handler and a one-line description.
///
/// An empty `help` means no description was given.
pub struct Entry<'a> {
    pub handler: Handler<'a>,
    pub help: String,
}

/// Lookup failures of the [`CommandRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// Mapping from command names to their entries.
///
/// Names are matched exactly. Entries are kept sorted by name so listings are stable.
pub struct CommandRegistry<'a> {
    commands: BTreeMap<String, Entry<'a>>,
}

impl<'a> CommandRegistry<'a> {
    /// A registry holding only the built-in `help`.
    pub fn new() -> Self {
        let mut registry = Self {
            commands: BTreeMap::new(),
        };
        registry.insert("help", Handler::Help, "this help message");
        registry
    }

    /// Register `handler` under `name`, replacing any previous entry with that name.
    pub fn insert(&mut self, name: impl Into<String>, handler: Handler<'a>, help: impl Into<String>) {
        self.commands.insert(
            name.into(),
            Entry {
                handler,
                help: help.into(),
            },
        );
    }

    /// Look up the entry registered under `name`.
    pub fn resolve(&mut self, name: &str) -> Result<&mut Entry<'a>, LookupError> {
        self.commands
            .get_mut(name)
            .ok_or_else(|| LookupError::UnknownCommand(name.to_owned()))
    }

    /// Help text of `name`, `None` when no such command is registered.
    pub fn help_text(&self, name: &str) -> Option<&str> {
        self.commands.get(name).map(|entry| entry.help.as_str())
    }

    /// Whether a command is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// `(name, help)` pairs sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.commands
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.help.as_str()))
    }
}

impl Default for CommandRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}
