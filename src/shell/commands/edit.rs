//! Commands that create and edit records.
//!
//! Every edit works on a copy of the record which is then saved back into
//! the store. Saving may move the record, so the selection follows it.

use super::{field_completions, numbered};
use crate::record::{FieldId, Record};
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Writes `record` to the store and selects it.
fn save_and_select(ctx: &mut ShellContext, record: Record) -> CommandResult {
    let pos = ctx.db.records_mut().save(record);
    ctx.state.selection = Some(pos);
    match ctx.db.records().get(pos) {
        Some(saved) => CommandResult::success(numbered(pos, saved)),
        None => CommandResult::ok(),
    }
}

fn parse_editable(name: &str) -> Result<FieldId, String> {
    let field: FieldId = name.parse()?;
    if field == FieldId::Uuid {
        return Err("The uuid cannot be edited".to_string());
    }
    Ok(field)
}

/// Sets or clears a field of the selected record.
fn edit_selected(ctx: &mut ShellContext, field: &str, value: String) -> CommandResult {
    if let Err(msg) = ctx.ensure_writable() {
        return CommandResult::error(msg);
    }
    let field = match parse_editable(field) {
        Ok(field) => field,
        Err(msg) => return CommandResult::error(msg),
    };
    let mut record = match ctx.target(None).map(|pos| ctx.record_at(pos)) {
        Ok(Some(record)) => record,
        Ok(None) => return CommandResult::error("No record selected"),
        Err(msg) => return CommandResult::error(msg),
    };

    record.set(field, value);
    save_and_select(ctx, record)
}

/// Command to create a record.
pub struct NewCommand;

impl Command for NewCommand {
    fn name(&self) -> &str {
        "new"
    }

    fn aliases(&self) -> &[&str] {
        &["add", "a"]
    }

    fn description(&self) -> &str {
        "Create a record"
    }

    fn usage(&self) -> &str {
        "new <title>"
    }

    fn help(&self) -> &str {
        "Create a record with the given title and select it.\n\
         Use 'set' to fill in the other fields.\n\n\
         Examples:\n  \
           new GitHub\n  \
           add Work email"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Err(msg) = ctx.ensure_writable() {
            return CommandResult::error(msg);
        }
        let record = Record::with_fields([(FieldId::Title, args.join(" "))]);
        log::info!("Created record");
        save_and_select(ctx, record)
    }

    fn min_args(&self) -> usize {
        1
    }

    fn verbatim_after(&self) -> Option<usize> {
        Some(0)
    }
}

/// Command to set a field of the selected record.
pub struct SetCommand;

impl Command for SetCommand {
    fn name(&self) -> &str {
        "set"
    }

    fn description(&self) -> &str {
        "Set a field of the selected record"
    }

    fn usage(&self) -> &str {
        "set <field> <value>"
    }

    fn help(&self) -> &str {
        "Set a field of the selected record. The rest of the line after a single\n\
         separator is the value, spacing included.\n\n\
         Arguments:\n  \
           <field> - group, title, user, password, email, url, notes or name\n  \
           <value> - New value\n\n\
         Examples:\n  \
           set user alice\n  \
           set notes recovery codes in the safe"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        edit_selected(ctx, args[0], args[1..].join(" "))
    }

    fn completions(&self, arg_index: usize, partial: &str) -> Vec<String> {
        if arg_index == 0 {
            field_completions(partial, false)
        } else {
            vec![]
        }
    }

    fn min_args(&self) -> usize {
        2
    }

    fn verbatim_after(&self) -> Option<usize> {
        Some(1)
    }
}

/// Command to remove a field from the selected record.
pub struct UnsetCommand;

impl Command for UnsetCommand {
    fn name(&self) -> &str {
        "unset"
    }

    fn description(&self) -> &str {
        "Clear a field of the selected record"
    }

    fn usage(&self) -> &str {
        "unset <field>"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        edit_selected(ctx, args[0], String::new())
    }

    fn completions(&self, arg_index: usize, partial: &str) -> Vec<String> {
        if arg_index == 0 {
            field_completions(partial, false)
        } else {
            vec![]
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
