//! Command trait and registry for the shell.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::db::AccountDb;
use crate::record::Record;
use crate::search::SearchCursor;

/// Result of executing a command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Command executed successfully with optional message.
    Success(Option<String>),
    /// Command failed with error message.
    Error(String),
    /// Signal to exit the shell.
    Exit,
}

impl CommandResult {
    pub fn success(msg: impl Into<String>) -> Self {
        CommandResult::Success(Some(msg.into()))
    }

    pub fn ok() -> Self {
        CommandResult::Success(None)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        CommandResult::Error(msg.into())
    }
}

/// Browsing state that outlives a single command: the selected record and
/// the search session, if one is open.
#[derive(Debug, Default)]
pub struct BrowseState {
    pub selection: Option<usize>,
    pub search: Option<SearchCursor>,
}

/// Context available to commands during execution.
pub struct ShellContext<'a> {
    pub db: &'a mut AccountDb,
    pub state: &'a mut BrowseState,
    /// Reference to the command registry for the help command.
    pub registry: Option<&'a CommandRegistry>,
}

impl<'a> ShellContext<'a> {
    pub fn new(db: &'a mut AccountDb, state: &'a mut BrowseState) -> Self {
        Self {
            db,
            state,
            registry: None,
        }
    }

    pub fn with_registry(mut self, registry: &'a CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Resolves an optional 1-based record number from the user, falling
    /// back to the current selection.
    pub fn target(&self, arg: Option<&str>) -> Result<usize, String> {
        let pos = match arg {
            Some(n) => n
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| format!("'{}' is not a record number", n))?,
            None => self
                .state
                .selection
                .ok_or_else(|| "No record selected".to_string())?,
        };
        if pos < self.db.records().len() {
            Ok(pos)
        } else {
            Err(format!("No record number {}", pos + 1))
        }
    }

    /// The record at `pos`, cloned for editing.
    pub fn record_at(&self, pos: usize) -> Option<Record> {
        self.db.records().get(pos).cloned()
    }

    /// Refuses the command when the database cannot be changed.
    pub fn ensure_writable(&self) -> Result<(), String> {
        if self.db.is_read_only() {
            Err(format!("'{}' is open read-only", self.db.path().display()))
        } else {
            Ok(())
        }
    }
}

/// A command that can be executed in the shell.
pub trait Command: Send + Sync {
    fn name(&self) -> &str;

    fn aliases(&self) -> &[&str] {
        &[]
    }

    fn description(&self) -> &str;

    /// Usage line, e.g. "set <field> <value>".
    fn usage(&self) -> &str;

    fn help(&self) -> &str {
        self.description()
    }

    /// Executes the command. Argument counts have already been checked
    /// against [`Command::min_args`] and [`Command::max_args`].
    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult;

    /// Candidates for argument `arg_index` starting with `partial`.
    fn completions(&self, _arg_index: usize, _partial: &str) -> Vec<String> {
        vec![]
    }

    fn min_args(&self) -> usize {
        0
    }

    /// Maximum number of arguments (None = unlimited).
    fn max_args(&self) -> Option<usize> {
        None
    }

    /// Number of leading words split on whitespace before the rest of the
    /// line is passed through unchanged as one final argument. `None` splits
    /// every argument on whitespace.
    fn verbatim_after(&self) -> Option<usize> {
        None
    }
}

/// Splits `line` into its first word and the rest. Exactly one separator
/// character is consumed after the word, so the rest keeps any further
/// whitespace.
pub fn split_word(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((end, sep)) => (&line[..end], &line[end + sep.len_utf8()..]),
        None => (line, ""),
    }
}

/// Splits command arguments for `command`, keeping the verbatim tail as
/// typed.
pub fn split_args<'l>(command: &dyn Command, rest: &'l str) -> Vec<&'l str> {
    let Some(words) = command.verbatim_after() else {
        return rest.split_whitespace().collect();
    };

    let mut args = Vec::new();
    let mut rest = rest;
    for _ in 0..words {
        if rest.trim().is_empty() {
            return args;
        }
        let (word, tail) = split_word(rest);
        args.push(word);
        rest = tail;
    }
    if !rest.trim().is_empty() {
        args.push(rest);
    }
    args
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("description", &self.description())
            .finish()
    }
}

/// Registry of all available commands.
pub struct CommandRegistry {
    /// Commands indexed by their primary name.
    commands: HashMap<String, Arc<dyn Command>>,
    /// Alias to primary name mapping.
    aliases: HashMap<String, String>,
    /// Every name and alias, sorted for prefix completion.
    names: BTreeSet<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
            names: BTreeSet::new(),
        }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        self.names.insert(name.clone());
        for alias in command.aliases() {
            self.aliases.insert(alias.to_string(), name.clone());
            self.names.insert(alias.to_string());
        }
        self.commands.insert(name, command);
    }

    /// Looks up a command by name or alias.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        if let Some(cmd) = self.commands.get(name) {
            return Some(Arc::clone(cmd));
        }
        self.aliases
            .get(name)
            .and_then(|primary| self.commands.get(primary))
            .map(Arc::clone)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }

    /// Names and aliases starting with `prefix`, in sorted order.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.names
            .range(prefix.to_string()..)
            .take_while(|name| name.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
