//! Caller capability model: kinds, filters, and permission requirements.
//!
//! A caller is whoever invoked a command. The host hands the engine a
//! `&dyn Caller` per invocation; the engine only ever asks for its kind,
//! its display name, a permission check, or a message send.

use std::fmt;

/// Default message sent when a permission check denies a caller and the
/// requirement carries no custom message.
pub const DEFAULT_DENIED_MESSAGE: &str = "You do not have permission to execute this command.";

// ---------------------------------------------------------------------------
// Caller kinds
// ---------------------------------------------------------------------------

/// The kind of entity that invoked a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallerKind {
    /// An in-world player.
    Player,
    /// The host console.
    Console,
    /// A scripted block or automation source.
    Block,
}

impl fmt::Display for CallerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Console => write!(f, "console"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// Which caller kinds a handler accepts.
///
/// Handlers narrowed to a kind reject other callers at invocation time,
/// not at registration time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CallerFilter {
    /// Any caller kind.
    #[default]
    Any,
    /// Exactly one kind.
    Only(CallerKind),
    /// Any kind in the set.
    AnyOf(Vec<CallerKind>),
}

impl CallerFilter {
    /// Whether a caller of `kind` passes this filter.
    pub fn allows(&self, kind: CallerKind) -> bool {
        match self {
            Self::Any => true,
            Self::Only(k) => *k == kind,
            Self::AnyOf(kinds) => kinds.contains(&kind),
        }
    }
}

// ---------------------------------------------------------------------------
// Permission requirements
// ---------------------------------------------------------------------------

/// A permission requirement attached to a command or a single handler.
///
/// `message` overrides the denial text for this requirement; `None` falls
/// back to the engine-wide default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionReq {
    /// Permission key the caller must hold, e.g. `"warp.list"`.
    pub key: String,
    /// Custom denial message, if any.
    pub message: Option<String>,
}

impl PermissionReq {
    /// Requirement for `key` using the default denial message.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: None,
        }
    }

    /// Override the denial message for this requirement.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The message to send on denial, falling back to `default`.
    pub fn denial_message<'a>(&'a self, default: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(default)
    }
}

// ---------------------------------------------------------------------------
// Caller capability
// ---------------------------------------------------------------------------

/// The abstract capability representing whoever invoked a command.
///
/// Implementations use interior mutability where message delivery needs
/// it; the engine only ever holds a shared reference.
pub trait Caller {
    /// The kind of this caller, used for handler narrowing.
    fn kind(&self) -> CallerKind;

    /// Name shown in messages about this caller.
    fn display_name(&self) -> String;

    /// Whether this caller holds the permission `key`.
    fn has_permission(&self, key: &str) -> bool;

    /// Deliver a message to this caller.
    fn send_message(&self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display() {
        assert_eq!(format!("{}", CallerKind::Player), "player");
        assert_eq!(format!("{}", CallerKind::Console), "console");
        assert_eq!(format!("{}", CallerKind::Block), "block");
    }

    #[test]
    fn filter_any_allows_everything() {
        let f = CallerFilter::Any;
        assert!(f.allows(CallerKind::Player));
        assert!(f.allows(CallerKind::Console));
        assert!(f.allows(CallerKind::Block));
    }

    #[test]
    fn filter_only_matches_by_equality() {
        let f = CallerFilter::Only(CallerKind::Player);
        assert!(f.allows(CallerKind::Player));
        assert!(!f.allows(CallerKind::Console));
    }

    #[test]
    fn filter_any_of_matches_by_membership() {
        let f = CallerFilter::AnyOf(vec![CallerKind::Player, CallerKind::Block]);
        assert!(f.allows(CallerKind::Player));
        assert!(f.allows(CallerKind::Block));
        assert!(!f.allows(CallerKind::Console));
    }

    #[test]
    fn filter_default_is_any() {
        assert_eq!(CallerFilter::default(), CallerFilter::Any);
    }

    #[test]
    fn requirement_uses_default_message() {
        let req = PermissionReq::new("warp.list");
        assert_eq!(req.key, "warp.list");
        assert_eq!(
            req.denial_message(DEFAULT_DENIED_MESSAGE),
            DEFAULT_DENIED_MESSAGE
        );
    }

    #[test]
    fn requirement_custom_message_wins() {
        let req = PermissionReq::new("warp.set").with_message("Ask an admin for warp access.");
        assert_eq!(
            req.denial_message(DEFAULT_DENIED_MESSAGE),
            "Ask an admin for warp access."
        );
    }
}
