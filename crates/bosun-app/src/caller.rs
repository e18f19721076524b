//! Caller implementations for the demo host.

use std::collections::HashSet;

use bosun_types::caller::{Caller, CallerKind};

/// The host console: sees every message on stdout and holds every
/// permission, like an operator.
pub struct ConsoleCaller {
    name: String,
}

impl ConsoleCaller {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Caller for ConsoleCaller {
    fn kind(&self) -> CallerKind {
        CallerKind::Console
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn has_permission(&self, _key: &str) -> bool {
        true
    }

    fn send_message(&self, text: &str) {
        println!("{text}");
    }
}

/// A pretend player with an explicit permission set, for trying out
/// permission gates from the REPL (`su <name> [perm...]`).
pub struct PlayerCaller {
    name: String,
    granted: HashSet<String>,
}

impl PlayerCaller {
    pub fn new(name: impl Into<String>, granted: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.into(),
            granted: granted.into_iter().collect(),
        }
    }
}

impl Caller for PlayerCaller {
    fn kind(&self) -> CallerKind {
        CallerKind::Player
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn has_permission(&self, key: &str) -> bool {
        self.granted.contains(key)
    }

    fn send_message(&self, text: &str) {
        println!("[to {}] {text}", self.name);
    }
}
