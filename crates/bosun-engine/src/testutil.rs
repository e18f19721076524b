//! Shared test doubles for engine tests.

use std::cell::RefCell;
use std::collections::HashSet;

use bosun_types::caller::{Caller, CallerKind};

/// A caller that records every message sent to it and answers permission
/// checks from a fixed set of granted keys.
pub(crate) struct TestCaller {
    kind: CallerKind,
    name: String,
    granted: HashSet<String>,
    sent: RefCell<Vec<String>>,
}

impl TestCaller {
    pub fn player(name: &str) -> Self {
        Self::of_kind(CallerKind::Player, name)
    }

    pub fn console() -> Self {
        Self::of_kind(CallerKind::Console, "server")
    }

    pub fn of_kind(kind: CallerKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            granted: HashSet::new(),
            sent: RefCell::new(Vec::new()),
        }
    }

    /// Grant a permission key to this caller.
    pub fn grant(mut self, key: &str) -> Self {
        self.granted.insert(key.to_string());
        self
    }

    /// Every message sent so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl Caller for TestCaller {
    fn kind(&self) -> CallerKind {
        self.kind
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn has_permission(&self, key: &str) -> bool {
        self.granted.contains(key)
    }

    fn send_message(&self, text: &str) {
        self.sent.borrow_mut().push(text.to_string());
    }
}
