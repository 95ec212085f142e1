//! Quit command implementation.

use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to leave the shell.
pub struct QuitCommand;

impl Command for QuitCommand {
    fn name(&self) -> &str {
        "quit"
    }

    fn aliases(&self) -> &[&str] {
        &["exit", "q"]
    }

    fn description(&self) -> &str {
        "Save pending changes and exit"
    }

    fn usage(&self) -> &str {
        "quit"
    }

    fn help(&self) -> &str {
        "Exit the shell. Pending changes are written first unless the\n\
         database is open read-only.\n\n\
         Examples:\n  \
           quit\n  \
           q"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        log::info!(
            "User requested exit (unsaved changes: {})",
            ctx.db.is_dirty()
        );
        CommandResult::Exit
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
