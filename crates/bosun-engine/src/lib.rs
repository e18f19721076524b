//! Command registration and dispatch engine.
//!
//! Commands are described declaratively: a [`CommandSet`] builds a
//! [`CommandSpec`] (static metadata plus handler bindings), and the
//! registry turns each spec into an immutable routing table. Invocations
//! are gated on command-level and handler-level permissions, subcommand
//! tokens select named bindings and shift the argument list, and partial
//! invocations produce tab-completion suggestions. Host integration goes
//! through the `Caller` and [`CommandSink`] capabilities; the engine never
//! lets a handler fault escape into host code.

mod complete;
mod descriptor;
mod dispatch;
mod gate;
mod handler;
mod registry;

#[cfg(test)]
pub(crate) mod testutil;

/// Static metadata identifying one registrable command.
pub use descriptor::CommandDescriptor;
/// What became of one command invocation.
pub use dispatch::DispatchOutcome;
/// Declarative command description: metadata plus handler bindings.
pub use handler::CommandSpec;
/// A custom tab-completion binding.
pub use handler::Completer;
/// One handler binding: thunk, caller filter, optional permission.
pub use handler::Handler;
/// The signature-tagged handler thunk.
pub use handler::HandlerFn;
/// Boxed thunk types backing [`HandlerFn`] and [`Completer`].
pub use handler::{CallerOnlyFn, CompleteFn, NoArgsFn, WithArgsFn};
/// Host-side view of one registered command.
pub use registry::CommandHandle;
/// Registry of command tables with dispatch and completion entry points.
pub use registry::CommandRegistry;
/// A command definition type: describes one command and its handlers.
pub use registry::CommandSet;
/// Host-provided table the registry publishes resolved commands into.
pub use registry::CommandSink;
/// Collects command definitions and runs the one-shot build phase.
pub use registry::RegistryBuilder;
