//! List and select commands.

use super::numbered;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to list every record in sort order.
pub struct ListCommand;

impl Command for ListCommand {
    fn name(&self) -> &str {
        "list"
    }

    fn aliases(&self) -> &[&str] {
        &["ls", "l"]
    }

    fn description(&self) -> &str {
        "List all records"
    }

    fn usage(&self) -> &str {
        "list"
    }

    fn help(&self) -> &str {
        "List all records sorted by group, title and user.\n\
         The selected record is marked with '>'.\n\n\
         Examples:\n  \
           list\n  \
           ls"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let records = ctx.db.records();
        if records.is_empty() {
            return CommandResult::success("No records stored.");
        }

        let output: Vec<String> = records
            .iter()
            .enumerate()
            .map(|(pos, record)| {
                let marker = if ctx.state.selection == Some(pos) { '>' } else { ' ' };
                format!("{}{}", marker, numbered(pos, record))
            })
            .collect();

        log::debug!("Listed {} records", records.len());
        CommandResult::success(output.join("\n"))
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

/// Command to select a record by number.
pub struct SelectCommand;

impl Command for SelectCommand {
    fn name(&self) -> &str {
        "select"
    }

    fn aliases(&self) -> &[&str] {
        &["sel"]
    }

    fn description(&self) -> &str {
        "Select a record by number"
    }

    fn usage(&self) -> &str {
        "select <n>"
    }

    fn help(&self) -> &str {
        "Select the record with the given number from 'list'.\n\
         Commands that take an optional record number act on the selection.\n\n\
         Examples:\n  \
           select 3"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        match ctx.target(args.first().copied()) {
            Ok(pos) => {
                ctx.state.selection = Some(pos);
                match ctx.db.records().get(pos) {
                    Some(record) => CommandResult::success(numbered(pos, record)),
                    None => CommandResult::ok(),
                }
            }
            Err(msg) => CommandResult::error(msg),
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
