//! Get command implementation.

use super::field_completions;
use crate::record::FieldId;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to print a single field of a record.
pub struct GetCommand;

impl Command for GetCommand {
    fn name(&self) -> &str {
        "get"
    }

    fn aliases(&self) -> &[&str] {
        &["g"]
    }

    fn description(&self) -> &str {
        "Print one field of a record"
    }

    fn usage(&self) -> &str {
        "get <field> [n]"
    }

    fn help(&self) -> &str {
        "Print the raw value of a field, including the password.\n\n\
         Arguments:\n  \
           <field> - group, title, user, password, email, url, notes, name or uuid\n  \
           [n]     - Record number, defaults to the selected record\n\n\
         Examples:\n  \
           get password\n  \
           get user 3"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let field: FieldId = match args[0].parse() {
            Ok(field) => field,
            Err(msg) => return CommandResult::error(msg),
        };
        let pos = match ctx.target(args.get(1).copied()) {
            Ok(pos) => pos,
            Err(msg) => return CommandResult::error(msg),
        };

        match ctx.db.records().get(pos).and_then(|r| r.get(field)) {
            Some(value) => {
                log::debug!("Read field {} of record {}", field, pos + 1);
                CommandResult::success(value)
            }
            None => CommandResult::error(format!("Record {} has no {}", pos + 1, field)),
        }
    }

    fn completions(&self, arg_index: usize, partial: &str) -> Vec<String> {
        if arg_index == 0 {
            field_completions(partial, true)
        } else {
            vec![]
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::command::BrowseState;
    use crate::shell::command::testing::db_with;

    #[test]
    fn test_get_field() {
        let mut db = db_with(&[("", "mail", "alice")]);
        let mut state = BrowseState::default();
        let mut ctx = ShellContext::new(&mut db, &mut state);

        match GetCommand.execute(&["user", "1"], &mut ctx) {
            CommandResult::Success(Some(msg)) => assert_eq!(msg, "alice"),
            _ => panic!("Expected success with value"),
        }
    }

    #[test]
    fn test_get_missing_field() {
        let mut db = db_with(&[("", "mail", "")]);
        let mut state = BrowseState {
            selection: Some(0),
            search: None,
        };
        let mut ctx = ShellContext::new(&mut db, &mut state);

        assert!(matches!(
            GetCommand.execute(&["password"], &mut ctx),
            CommandResult::Error(_)
        ));
        assert!(matches!(
            GetCommand.execute(&["colour"], &mut ctx),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_get_completions() {
        assert_eq!(GetCommand.completions(0, "pa"), vec!["password"]);
        assert!(GetCommand.completions(1, "").is_empty());
    }
}
