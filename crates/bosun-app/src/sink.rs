//! In-memory command sink for the demo host.

use std::collections::HashMap;

use bosun_engine::{CommandHandle, CommandSink};
use bosun_types::error::{BosunError, Result};

/// Command table held in process memory.
///
/// Stores each published handle under its lower-cased name and aliases,
/// the way a host's own command map would.
#[derive(Default)]
pub struct InMemorySink {
    entries: HashMap<String, CommandHandle>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a command by name or alias, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&CommandHandle> {
        self.entries.get(&name.to_lowercase())
    }

    /// Sorted (name, usage) pairs over the primary entries.
    pub fn usage_lines(&self) -> Vec<(String, String)> {
        let mut lines: Vec<(String, String)> = self
            .entries
            .iter()
            .filter(|(key, handle)| **key == handle.descriptor().name.to_lowercase())
            .map(|(_, handle)| {
                let d = handle.descriptor();
                (d.name.clone(), d.usage.clone())
            })
            .collect();
        lines.sort();
        lines
    }
}

impl CommandSink for InMemorySink {
    fn publish(&mut self, command: CommandHandle) -> Result<()> {
        let descriptor = command.descriptor();
        let key = descriptor.name.to_lowercase();
        if self.entries.contains_key(&key) {
            return Err(BosunError::Sink(format!(
                "command `{}` already published",
                descriptor.name
            )));
        }
        let alias_keys: Vec<String> = descriptor
            .aliases
            .iter()
            .map(|a| a.to_lowercase())
            .collect();
        for alias in &alias_keys {
            if self.entries.contains_key(alias) {
                return Err(BosunError::Sink(format!(
                    "alias `{alias}` already published"
                )));
            }
        }
        for alias in alias_keys {
            self.entries.insert(alias, command.clone());
        }
        self.entries.insert(key, command);
        Ok(())
    }
}
