//! Show command implementation.

use crate::record::FieldId;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to display the fields of a record.
pub struct ShowCommand;

impl Command for ShowCommand {
    fn name(&self) -> &str {
        "show"
    }

    fn aliases(&self) -> &[&str] {
        &["view"]
    }

    fn description(&self) -> &str {
        "Show the fields of a record"
    }

    fn usage(&self) -> &str {
        "show [n]"
    }

    fn help(&self) -> &str {
        "Display every field of a record. The password is masked;\n\
         use 'get password' to print it.\n\n\
         Arguments:\n  \
           [n] - Record number, defaults to the selected record\n\n\
         Examples:\n  \
           show\n  \
           show 4"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let pos = match ctx.target(args.first().copied()) {
            Ok(pos) => pos,
            Err(msg) => return CommandResult::error(msg),
        };
        let Some(record) = ctx.db.records().get(pos) else {
            return CommandResult::error(format!("No record number {}", pos + 1));
        };

        let lines: Vec<String> = FieldId::ALL
            .into_iter()
            .filter_map(|field| {
                record.get(field).map(|value| {
                    let shown = if field == FieldId::Password { "********" } else { value };
                    format!("{:>9}: {}", field, shown)
                })
            })
            .collect();

        ctx.state.selection = Some(pos);
        CommandResult::success(lines.join("\n"))
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
