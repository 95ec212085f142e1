//! Master password change.

use std::io;

use zeroize::Zeroizing;

use crate::shell::command::{Command, CommandResult, ShellContext};

type PromptFn = dyn Fn(&str) -> io::Result<String> + Send + Sync;

/// Asks for a new master password twice through `prompt` and returns it
/// once both entries agree.
pub fn read_new_password<F>(prompt: F) -> Result<Zeroizing<String>, String>
where
    F: Fn(&str) -> io::Result<String>,
{
    let first = Zeroizing::new(prompt("New master password: ").map_err(|e| e.to_string())?);
    if first.is_empty() {
        return Err("master password cannot be empty".to_string());
    }
    let second = Zeroizing::new(prompt("Repeat master password: ").map_err(|e| e.to_string())?);
    if *first != *second {
        return Err("passwords do not match".to_string());
    }
    Ok(first)
}

/// Command to change the master password of the open database.
pub struct PasswdCommand {
    prompt: Box<PromptFn>,
}

impl PasswdCommand {
    /// Reads passwords from the terminal without echo.
    pub fn new() -> Self {
        Self::with_prompt(|text: &str| rpassword::prompt_password(text))
    }

    pub fn with_prompt<F>(prompt: F) -> Self
    where
        F: Fn(&str) -> io::Result<String> + Send + Sync + 'static,
    {
        Self {
            prompt: Box::new(prompt),
        }
    }
}

impl Default for PasswdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for PasswdCommand {
    fn name(&self) -> &str {
        "passwd"
    }

    fn description(&self) -> &str {
        "Change the master password"
    }

    fn usage(&self) -> &str {
        "passwd"
    }

    fn help(&self) -> &str {
        "Change the master password. The current password is checked against\n\
         the database file, then the new one is asked for twice. The database\n\
         is written immediately with the new password, pending changes included."
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Err(msg) = ctx.ensure_writable() {
            return CommandResult::error(msg);
        }

        let current = match (self.prompt)("Current master password: ") {
            Ok(password) => Zeroizing::new(password),
            Err(e) => return CommandResult::error(e.to_string()),
        };
        if !ctx.db.check_password(current.as_str()) {
            log::warn!("Password change rejected for {}", ctx.db.path().display());
            return CommandResult::error("Incorrect master password");
        }

        let mut new_password = match read_new_password(&*self.prompt) {
            Ok(password) => password,
            Err(msg) => return CommandResult::error(msg),
        };
        ctx.db.set_password(std::mem::take(&mut *new_password));

        match ctx.db.write() {
            Ok(()) => {
                log::info!("Master password changed for {}", ctx.db.path().display());
                CommandResult::success("Master password changed")
            }
            Err(e) => {
                // The file still opens with the old password.
                ctx.db.set_password(current.as_str());
                log::error!("Failed to write with the new password: {}", e);
                CommandResult::error(format!("Password not changed: {}", e))
            }
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
