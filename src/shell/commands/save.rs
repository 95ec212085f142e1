//! Commands that write the database or its contents.

use std::fs::File;
use std::io::BufWriter;

use crate::export;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to write pending changes to disk.
pub struct SaveCommand;

impl Command for SaveCommand {
    fn name(&self) -> &str {
        "save"
    }

    fn aliases(&self) -> &[&str] {
        &["w"]
    }

    fn description(&self) -> &str {
        "Write changes to the database file"
    }

    fn usage(&self) -> &str {
        "save"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if !ctx.db.is_dirty() {
            return CommandResult::success("No changes to save");
        }
        match ctx.db.write() {
            Ok(()) => {
                log::info!("Saved {} records", ctx.db.records().len());
                CommandResult::success(format!(
                    "Saved {} records to {}",
                    ctx.db.records().len(),
                    ctx.db.path().display()
                ))
            }
            Err(e) => {
                log::error!("Failed to save database: {}", e);
                CommandResult::error(format!("Save failed: {}", e))
            }
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

/// Command to export every record as plaintext CSV.
pub struct ExportCommand;

impl Command for ExportCommand {
    fn name(&self) -> &str {
        "export"
    }

    fn description(&self) -> &str {
        "Export all records to a plaintext CSV file"
    }

    fn usage(&self) -> &str {
        "export <path>"
    }

    fn help(&self) -> &str {
        "Write every record, passwords included, to a CSV file.\n\
         The file is not encrypted.\n\n\
         Examples:\n  \
           export /tmp/accounts.csv"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let path = args[0];
        let file = match File::create(path) {
            Ok(file) => file,
            Err(e) => return CommandResult::error(format!("Cannot create '{}': {}", path, e)),
        };

        match export::write_plaintext(ctx.db.records(), BufWriter::new(file)) {
            Ok(count) => {
                log::warn!("Exported {} records in plaintext to {}", count, path);
                CommandResult::success(format!("Exported {} records to {}", count, path))
            }
            Err(e) => CommandResult::error(format!("Export failed: {}", e)),
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
