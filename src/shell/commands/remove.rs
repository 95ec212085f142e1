//! Remove command implementation.

use super::summary;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to remove a record.
pub struct RemoveCommand;

impl Command for RemoveCommand {
    fn name(&self) -> &str {
        "remove"
    }

    fn aliases(&self) -> &[&str] {
        &["rm", "delete", "del"]
    }

    fn description(&self) -> &str {
        "Remove a record"
    }

    fn usage(&self) -> &str {
        "remove [n]"
    }

    fn help(&self) -> &str {
        "Remove a record from the database.\n\n\
         Arguments:\n  \
           [n] - Record number, defaults to the selected record\n\n\
         Examples:\n  \
           remove\n  \
           rm 3"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Err(msg) = ctx.ensure_writable() {
            return CommandResult::error(msg);
        }
        let pos = match ctx.target(args.first().copied()) {
            Ok(pos) => pos,
            Err(msg) => return CommandResult::error(msg),
        };
        let Some(label) = ctx.db.records().get(pos).map(summary) else {
            return CommandResult::error(format!("No record number {}", pos + 1));
        };

        if !ctx.db.records_mut().delete_at(pos) {
            log::debug!("Record {} has no uuid, nothing removed", pos + 1);
            return CommandResult::error(format!("Could not remove record {}", pos + 1));
        }
        log::info!("Removed record {}", pos + 1);

        // Keep the selection on the same record, or on its successor.
        let len = ctx.db.records().len();
        ctx.state.selection = match ctx.state.selection {
            _ if len == 0 => None,
            Some(sel) if sel > pos => Some(sel - 1),
            Some(sel) => Some(sel.min(len - 1)),
            None => None,
        };

        CommandResult::success(format!("Removed '{}'", label))
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldId;
    use crate::shell::command::BrowseState;
    use crate::shell::command::testing::db_with;

    #[test]
    fn test_remove_selected() {
        let mut db = db_with(&[("", "a", ""), ("", "b", ""), ("", "c", "")]);
        let mut state = BrowseState {
            selection: Some(2),
            search: None,
        };
        let mut ctx = ShellContext::new(&mut db, &mut state);

        let result = RemoveCommand.execute(&[], &mut ctx);
        assert!(matches!(result, CommandResult::Success(Some(_))));
        assert_eq!(ctx.db.records().len(), 2);
        assert_eq!(ctx.state.selection, Some(1));
        assert!(ctx.db.is_dirty());
    }

    #[test]
    fn test_remove_before_selection_shifts_it() {
        let mut db = db_with(&[("", "a", ""), ("", "b", ""), ("", "c", "")]);
        let mut state = BrowseState {
            selection: Some(2),
            search: None,
        };
        let mut ctx = ShellContext::new(&mut db, &mut state);

        RemoveCommand.execute(&["1"], &mut ctx);
        assert_eq!(ctx.state.selection, Some(1));
        assert_eq!(
            ctx.db.records().get(1).unwrap().get(FieldId::Title),
            Some("c")
        );
    }

    #[test]
    fn test_remove_last_record_clears_selection() {
        let mut db = db_with(&[("", "a", "")]);
        let mut state = BrowseState {
            selection: Some(0),
            search: None,
        };
        let mut ctx = ShellContext::new(&mut db, &mut state);

        RemoveCommand.execute(&[], &mut ctx);
        assert!(ctx.db.records().is_empty());
        assert_eq!(ctx.state.selection, None);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut db = db_with(&[("", "a", "")]);
        let mut state = BrowseState::default();
        let mut ctx = ShellContext::new(&mut db, &mut state);

        assert!(matches!(
            RemoveCommand.execute(&["5"], &mut ctx),
            CommandResult::Error(_)
        ));
        assert!(!ctx.db.is_dirty());
    }

    #[test]
    fn test_remove_read_only() {
        let mut db = db_with(&[("", "a", "")]);
        db.set_read_only(true);
        let mut state = BrowseState::default();
        let mut ctx = ShellContext::new(&mut db, &mut state);

        assert!(matches!(
            RemoveCommand.execute(&["1"], &mut ctx),
            CommandResult::Error(_)
        ));
        assert_eq!(ctx.db.records().len(), 1);
    }
}
