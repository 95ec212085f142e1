//! Shell module - rustyline-based interactive shell.
//!
//! Reads command lines, dispatches them through the [`CommandRegistry`] and
//! keeps the browse state (selection and search session) between commands.
//! Tab completion covers command names, help topics and field names.

pub mod command;
pub mod commands;
pub mod completer;
pub mod history;

use anyhow::{Context as _, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::sync::Arc;

use crate::db::AccountDb;

use command::{BrowseState, CommandRegistry, CommandResult, ShellContext, split_args, split_word};
use commands::register_all;
use completer::ShellCompleter;
use history::HistoryConfig;

const PROMPT: &str = "pwshell> ";
const PROMPT_READ_ONLY: &str = "pwshell (read-only)> ";

/// Helper for rustyline. Only completion is customised.
pub struct ShellHelper {
    completer: ShellCompleter,
}

impl ShellHelper {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self {
            completer: ShellCompleter::new(registry),
        }
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

/// Configuration for the shell.
pub struct ShellConfig {
    pub history: HistoryConfig,
    /// Whether to show the welcome message.
    pub show_welcome: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            show_welcome: true,
        }
    }
}

/// The interactive shell.
pub struct Shell {
    registry: Arc<CommandRegistry>,
    config: ShellConfig,
}

impl Shell {
    /// Creates a shell with default configuration.
    pub fn new() -> Self {
        Self::with_config(ShellConfig::default())
    }

    pub fn with_config(config: ShellConfig) -> Self {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);

        Self {
            registry: Arc::new(registry),
            config,
        }
    }

    fn prompt(db: &AccountDb, state: &BrowseState) -> String {
        let base = if db.is_read_only() { PROMPT_READ_ONLY } else { PROMPT };
        match &state.search {
            Some(cursor) => format!("[find '{}'] {}", cursor.query(), base),
            None => base.to_string(),
        }
    }

    /// Runs the read-eval-print loop until the user quits.
    ///
    /// Pending changes are written on the way out unless the database is
    /// read-only.
    pub fn run(&self, db: &mut AccountDb) -> Result<()> {
        let mut editor: Editor<ShellHelper, FileHistory> = Editor::new()?;
        editor.set_helper(Some(ShellHelper::new(Arc::clone(&self.registry))));
        self.config.history.apply(&mut editor)?;

        if self.config.show_welcome {
            println!(
                "Opened {} ({} records). Type 'help' for available commands.",
                db.path().display(),
                db.records().len()
            );
        }
        log::info!("Shell started");

        let mut state = BrowseState::default();
        loop {
            match editor.readline(&Self::prompt(db, &state)) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(line.as_str());

                    match self.execute_line(&line, db, &mut state) {
                        CommandResult::Success(Some(msg)) => println!("{}", msg),
                        CommandResult::Success(None) => {}
                        CommandResult::Error(msg) => eprintln!("Error: {}", msg),
                        CommandResult::Exit => break,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    log::debug!("Interrupted (Ctrl-C)");
                }
                Err(ReadlineError::Eof) => {
                    println!("exit");
                    log::info!("EOF received (Ctrl-D)");
                    break;
                }
                Err(err) => {
                    log::error!("Readline error: {}", err);
                    eprintln!("Error: {}", err);
                    break;
                }
            }
        }

        if let Err(e) = self.config.history.save(&mut editor) {
            log::warn!("Failed to save history: {}", e);
        }

        if db.is_dirty() && !db.is_read_only() {
            db.write()
                .with_context(|| format!("Failed to save {}", db.path().display()))?;
            log::info!("Saved {} records on exit", db.records().len());
        } else if db.is_dirty() {
            log::warn!("Discarding changes to read-only database");
        }

        log::info!("Shell exited");
        Ok(())
    }

    /// Parses and executes one command line against `db`.
    pub fn execute_line(&self, line: &str, db: &mut AccountDb, state: &mut BrowseState) -> CommandResult {
        let (cmd_name, rest) = split_word(line);
        if cmd_name.is_empty() {
            return CommandResult::ok();
        }

        let Some(cmd) = self.registry.get(cmd_name) else {
            return CommandResult::error(format!(
                "Unknown command: '{}'\nType 'help' to see available commands.",
                cmd_name
            ));
        };

        let args = split_args(cmd.as_ref(), rest);
        let too_many = cmd.max_args().is_some_and(|max| args.len() > max);
        if args.len() < cmd.min_args() || too_many {
            return CommandResult::error(format!("Usage: {}", cmd.usage()));
        }

        log::debug!("Executing command: {} with {} args", cmd.name(), args.len());
        let mut ctx = ShellContext::new(db, state).with_registry(&self.registry);
        let start = std::time::Instant::now();
        let result = cmd.execute(&args, &mut ctx);
        log::debug!("Command '{}' completed in {:?}", cmd.name(), start.elapsed());
        result
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
