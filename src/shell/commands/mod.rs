//! Individual command implementations.

mod edit;
mod get;
mod help;
mod list;
mod passwd;
mod quit;
mod remove;
mod save;
mod search;
mod show;

pub use edit::{NewCommand, SetCommand, UnsetCommand};
pub use get::GetCommand;
pub use help::HelpCommand;
pub use list::{ListCommand, SelectCommand};
pub use passwd::{PasswdCommand, read_new_password};
pub use quit::QuitCommand;
pub use remove::RemoveCommand;
pub use save::{ExportCommand, SaveCommand};
pub use search::{CancelCommand, DoneCommand, FindCommand, NextCommand};
pub use show::ShowCommand;

use std::sync::Arc;

use super::command::CommandRegistry;
use crate::record::{FieldId, Record};

/// Registers all built-in commands with the registry.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Arc::new(HelpCommand));
    registry.register(Arc::new(ListCommand));
    registry.register(Arc::new(SelectCommand));
    registry.register(Arc::new(ShowCommand));
    registry.register(Arc::new(GetCommand));
    registry.register(Arc::new(NewCommand));
    registry.register(Arc::new(SetCommand));
    registry.register(Arc::new(UnsetCommand));
    registry.register(Arc::new(RemoveCommand));
    registry.register(Arc::new(FindCommand));
    registry.register(Arc::new(NextCommand));
    registry.register(Arc::new(DoneCommand));
    registry.register(Arc::new(CancelCommand));
    registry.register(Arc::new(SaveCommand));
    registry.register(Arc::new(ExportCommand));
    registry.register(Arc::new(PasswdCommand::new()));
    registry.register(Arc::new(QuitCommand));
}

/// Field names starting with `partial`. The uuid is only offered when
/// `with_uuid` is set since it cannot be edited.
fn field_completions(partial: &str, with_uuid: bool) -> Vec<String> {
    FieldId::ALL
        .into_iter()
        .filter(|field| with_uuid || *field != FieldId::Uuid)
        .map(FieldId::as_str)
        .filter(|name| name.starts_with(partial))
        .map(String::from)
        .collect()
}

/// One-line summary of a record: "group / title (user)".
fn summary(record: &Record) -> String {
    let title = record.get_or(FieldId::Title, "(untitled)");
    let mut line = match record.get(FieldId::Group) {
        Some(group) => format!("{} / {}", group, title),
        None => title.to_string(),
    };
    if let Some(user) = record.get(FieldId::User) {
        line.push_str(&format!(" ({})", user));
    }
    line
}

/// Summary prefixed with the 1-based record number.
fn numbered(pos: usize, record: &Record) -> String {
    format!("{:>4}  {}", pos + 1, summary(record))
}
