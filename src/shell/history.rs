//! Persistent command history.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::FileHistory;
use rustyline::{Editor, Helper};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Path to the history file.
    pub path: PathBuf,
    /// Maximum number of entries to keep.
    pub max_entries: usize,
    /// Skip an entry identical to the previous one.
    pub ignore_dups: bool,
    /// Skip entries typed with a leading space.
    pub ignore_space: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("history"),
            max_entries: 1000,
            ignore_dups: true,
            ignore_space: true,
        }
    }
}

impl HistoryConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Configures `editor` and loads any saved history.
    pub fn apply<H: Helper>(&self, editor: &mut Editor<H, FileHistory>) -> Result<()> {
        editor.set_max_history_size(self.max_entries)?;
        editor.set_history_ignore_dups(self.ignore_dups)?;
        editor.set_history_ignore_space(self.ignore_space);

        if self.path.exists() {
            match editor.load_history(&self.path) {
                Ok(()) => log::debug!("Loaded history from {}", self.path.display()),
                Err(e) => log::warn!("Could not load history: {}", e),
            }
        }
        Ok(())
    }

    /// Writes the editor's history to disk.
    pub fn save<H: Helper>(&self, editor: &mut Editor<H, FileHistory>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        editor.save_history(&self.path)?;
        log::debug!("Saved history to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_config() {
        let config = HistoryConfig::new(PathBuf::from("/tmp/history")).with_max_entries(50);
        assert_eq!(config.path, PathBuf::from("/tmp/history"));
        assert_eq!(config.max_entries, 50);
        assert!(config.ignore_dups);
        assert!(config.ignore_space);
    }
}
