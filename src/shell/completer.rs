//! Tab completion for command names and command arguments.

use rustyline::Context;
use rustyline::completion::{Completer, Pair};
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

pub struct ShellCompleter {
    registry: Arc<CommandRegistry>,
}

/// What the word under the cursor is.
#[derive(Debug, PartialEq, Eq)]
enum CompletionContext<'a> {
    Command {
        partial: &'a str,
    },
    Argument {
        command: &'a str,
        arg_index: usize,
        partial: &'a str,
    },
}

fn parse_context(line: &str, pos: usize) -> CompletionContext<'_> {
    let line_to_pos = &line[..pos];
    let parts: Vec<&str> = line_to_pos.split_whitespace().collect();
    let ends_with_space = line_to_pos.ends_with(char::is_whitespace);

    match parts.as_slice() {
        [] => CompletionContext::Command { partial: "" },
        [partial] if !ends_with_space => CompletionContext::Command { partial: *partial },
        [command, rest @ ..] => {
            if ends_with_space {
                CompletionContext::Argument {
                    command: *command,
                    arg_index: rest.len(),
                    partial: "",
                }
            } else {
                CompletionContext::Argument {
                    command: *command,
                    arg_index: rest.len() - 1,
                    partial: rest[rest.len() - 1],
                }
            }
        }
    }
}

fn pairs(candidates: Vec<String>) -> Vec<Pair> {
    candidates
        .into_iter()
        .map(|s| Pair {
            display: s.clone(),
            replacement: s,
        })
        .collect()
}

impl ShellCompleter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        match parse_context(line, pos) {
            CompletionContext::Command { partial } => {
                (pos - partial.len(), self.registry.completions(partial))
            }
            CompletionContext::Argument {
                command,
                arg_index,
                partial,
            } => {
                let candidates = match self.registry.get(command) {
                    // Help takes a command name, which only the registry knows.
                    Some(cmd) if cmd.name() == "help" && arg_index == 0 => {
                        self.registry.completions(partial)
                    }
                    Some(cmd) => cmd.completions(arg_index, partial),
                    None => vec![],
                };
                (pos - partial.len(), candidates)
            }
        }
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(line, pos);
        Ok((start, pairs(candidates)))
    }
}
