//! Incremental search commands.
//!
//! `find` opens a session (or refines the query of the open one), `next`
//! moves to the following match, and `done` or `cancel` ends the session.
//! While a session is open the selection follows the highlighted match.

use super::numbered;
use crate::search::SearchCursor;
use crate::shell::command::{Command, CommandResult, ShellContext};

fn highlight(ctx: &mut ShellContext, found: Option<usize>) -> CommandResult {
    match found {
        Some(pos) => {
            ctx.state.selection = Some(pos);
            match ctx.db.records().get(pos) {
                Some(record) => CommandResult::success(numbered(pos, record)),
                None => CommandResult::ok(),
            }
        }
        None => {
            let query = ctx
                .state
                .search
                .as_ref()
                .map(|cursor| cursor.query().to_string())
                .unwrap_or_default();
            CommandResult::success(format!("No match for '{}'", query))
        }
    }
}

/// Command to start or refine a search.
pub struct FindCommand;

impl Command for FindCommand {
    fn name(&self) -> &str {
        "find"
    }

    fn aliases(&self) -> &[&str] {
        &["/"]
    }

    fn description(&self) -> &str {
        "Search titles, names, users and notes"
    }

    fn usage(&self) -> &str {
        "find [query]"
    }

    fn help(&self) -> &str {
        "Search for the next record whose title, name, user or notes contain\n\
         the query, ignoring case. The search starts after the selected record\n\
         and wraps around. Running 'find' again replaces the query and searches\n\
         from the same place; 'find' with no query returns to the last match\n\
         confirmed with 'next'.\n\n\
         Examples:\n  \
           find mail\n  \
           / bank"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if ctx.state.search.is_none() {
            log::debug!("Opening search session");
            ctx.state.search = Some(SearchCursor::open(ctx.db.records(), ctx.state.selection));
        }
        let Some(cursor) = ctx.state.search.as_mut() else {
            return CommandResult::error("No search in progress");
        };
        let found = cursor.set_query(ctx.db.records(), args.join(" "));
        highlight(ctx, found)
    }

    fn verbatim_after(&self) -> Option<usize> {
        Some(0)
    }
}

/// Command to move to the next match.
pub struct NextCommand;

impl Command for NextCommand {
    fn name(&self) -> &str {
        "next"
    }

    fn aliases(&self) -> &[&str] {
        &["n"]
    }

    fn description(&self) -> &str {
        "Find the next match"
    }

    fn usage(&self) -> &str {
        "next"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(cursor) = ctx.state.search.as_mut() else {
            return CommandResult::error("No search in progress");
        };
        let found = cursor.find_next_match(ctx.db.records());
        highlight(ctx, found)
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

/// Command to end the search on the highlighted record.
pub struct DoneCommand;

impl Command for DoneCommand {
    fn name(&self) -> &str {
        "done"
    }

    fn description(&self) -> &str {
        "End the search keeping the match selected"
    }

    fn usage(&self) -> &str {
        "done"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(cursor) = ctx.state.search.take() else {
            return CommandResult::error("No search in progress");
        };
        ctx.state.selection = cursor.confirm(ctx.db.records());
        match ctx.state.selection {
            Some(pos) => match ctx.db.records().get(pos) {
                Some(record) => CommandResult::success(numbered(pos, record)),
                None => CommandResult::ok(),
            },
            None => CommandResult::ok(),
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

/// Command to abandon the search.
pub struct CancelCommand;

impl Command for CancelCommand {
    fn name(&self) -> &str {
        "cancel"
    }

    fn description(&self) -> &str {
        "End the search and restore the previous selection"
    }

    fn usage(&self) -> &str {
        "cancel"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(cursor) = ctx.state.search.take() else {
            return CommandResult::error("No search in progress");
        };
        ctx.state.selection = cursor.cancel(ctx.db.records());
        CommandResult::success("Search cancelled")
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
