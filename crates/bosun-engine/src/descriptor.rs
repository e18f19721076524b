//! Static command metadata.

use bosun_types::caller::PermissionReq;

/// Static metadata identifying one registrable command.
///
/// Built once from a [`CommandSpec`](crate::CommandSpec) during the build
/// phase and immutable afterwards.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    /// Primary command name. Non-empty and unique across the registry.
    pub name: String,
    /// One-line description for host `help` output.
    pub description: String,
    /// Usage string, e.g. `"warp <name>"`.
    pub usage: String,
    /// Alternative names routed to the same command.
    pub aliases: Vec<String>,
    /// Command-level permission, checked before any handler-level one.
    pub permission: Option<PermissionReq>,
}
