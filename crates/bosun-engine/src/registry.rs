//! Command registry: build phase, publication, and dispatch entry points.

use std::collections::HashMap;
use std::sync::Arc;

use bosun_types::caller::Caller;
use bosun_types::config::EngineConfig;
use bosun_types::error::{RegistrationError, Result};

use crate::complete;
use crate::descriptor::CommandDescriptor;
use crate::dispatch::{self, DispatchOutcome};
use crate::handler::{CommandSpec, HandlerTable};

/// A command definition: one type describing a command and its handlers.
///
/// The registry keeps one shared instance per definition for the life of
/// the engine; handler thunks capture an `Arc` of it, so any state the
/// definition keeps in its own fields is shared across every invocation
/// of that command. Authors needing per-invocation state must manage it
/// themselves.
pub trait CommandSet: Send + Sync {
    /// Build this definition's spec: metadata plus handler bindings
    /// bound to `self`.
    fn spec(self: Arc<Self>) -> CommandSpec;
}

// ---------------------------------------------------------------------------
// Host-facing surface
// ---------------------------------------------------------------------------

/// Host-side view of one registered command.
///
/// Published into the host's [`CommandSink`]; `execute` and `complete`
/// route back into the engine's routing table for this command. Handles
/// are cheap to clone and safe to use from any thread.
#[derive(Clone)]
pub struct CommandHandle {
    table: Arc<HandlerTable>,
    config: Arc<EngineConfig>,
}

impl CommandHandle {
    /// Static metadata for this command.
    pub fn descriptor(&self) -> &CommandDescriptor {
        self.table.descriptor()
    }

    /// Execute one invocation against this command.
    pub fn execute(&self, caller: &dyn Caller, args: &[String]) -> DispatchOutcome {
        dispatch::dispatch(&self.table, caller, args, &self.config)
    }

    /// Produce completion suggestions for a partial invocation.
    pub fn complete(&self, caller: &dyn Caller, partial_args: &[String]) -> Vec<String> {
        complete::complete(&self.table, caller, partial_args, &self.config)
    }
}

/// Host-provided table the registry publishes resolved commands into.
///
/// A sink that errors is logged and skipped; the engine keeps operating
/// without publication.
pub trait CommandSink {
    /// Accept one resolved command.
    fn publish(&mut self, command: CommandHandle) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Registry of command routing tables with dispatch and completion entry
/// points.
///
/// Registration is a one-shot, single-threaded build phase; afterwards
/// the tables are immutable and every entry point takes `&self`.
pub struct CommandRegistry {
    tables: HashMap<String, Arc<HandlerTable>>,
    aliases: HashMap<String, String>,
    config: Arc<EngineConfig>,
}

impl CommandRegistry {
    /// Create an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an empty registry with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            tables: HashMap::new(),
            aliases: HashMap::new(),
            config: Arc::new(config),
        }
    }

    /// Register one command definition.
    ///
    /// Returns `Ok(true)` when the command was added, `Ok(false)` when the
    /// definition declared no executable bindings and was skipped.
    pub fn register(
        &mut self,
        def: Arc<dyn CommandSet>,
    ) -> std::result::Result<bool, RegistrationError> {
        self.register_spec(def.spec())
    }

    /// Register a spec built without a definition type (closures only).
    pub fn register_spec(
        &mut self,
        spec: CommandSpec,
    ) -> std::result::Result<bool, RegistrationError> {
        let Some(table) = spec.build()? else {
            log::debug!("command definition has no handlers; skipped");
            return Ok(false);
        };

        // Name and alias keys are lower-cased so lookup is
        // case-insensitive; the descriptor keeps the declared spelling.
        let name = table.descriptor().name.clone();
        let key = name.to_lowercase();
        if self.is_taken(&key) {
            return Err(RegistrationError::NameTaken(name));
        }
        let mut alias_keys = Vec::new();
        for alias in &table.descriptor().aliases {
            let alias_key = alias.to_lowercase();
            if alias_key == key || self.is_taken(&alias_key) || alias_keys.contains(&alias_key) {
                return Err(RegistrationError::NameTaken(alias.clone()));
            }
            alias_keys.push(alias_key);
        }

        for alias_key in alias_keys {
            self.aliases.insert(alias_key, key.clone());
        }
        self.tables.insert(key, Arc::new(table));
        Ok(true)
    }

    /// Register every definition in order. Failures are logged severe and
    /// skipped; returns how many commands were added.
    pub fn register_all(&mut self, defs: impl IntoIterator<Item = Arc<dyn CommandSet>>) -> usize {
        let mut added = 0;
        for def in defs {
            let spec = def.spec();
            let name = spec.name().to_string();
            match self.register_spec(spec) {
                Ok(true) => added += 1,
                Ok(false) => {},
                Err(e) => log::error!("failed to register command `{name}`: {e}"),
            }
        }
        added
    }

    fn is_taken(&self, key: &str) -> bool {
        self.tables.contains_key(key) || self.aliases.contains_key(key)
    }

    fn resolve(&self, name: &str) -> Option<&Arc<HandlerTable>> {
        let key = name.to_lowercase();
        if let Some(table) = self.tables.get(&key) {
            return Some(table);
        }
        self.aliases
            .get(&key)
            .and_then(|primary| self.tables.get(primary))
    }

    /// Route one invocation: look up the command (by name or alias), then
    /// resolve and run its handler.
    pub fn dispatch(&self, name: &str, caller: &dyn Caller, raw_args: &[String]) -> DispatchOutcome {
        match self.resolve(name) {
            Some(table) => dispatch::dispatch(table, caller, raw_args, &self.config),
            None => DispatchOutcome::UnknownCommand,
        }
    }

    /// Produce completion suggestions for a partial invocation of the
    /// named command. Unknown names complete to nothing.
    pub fn complete(&self, name: &str, caller: &dyn Caller, partial_args: &[String]) -> Vec<String> {
        match self.resolve(name) {
            Some(table) => complete::complete(table, caller, partial_args, &self.config),
            None => Vec::new(),
        }
    }

    /// Hand every registered command to the host's sink. Sink failures
    /// are logged severe and skipped; returns how many commands the sink
    /// accepted.
    pub fn publish(&self, sink: &mut dyn CommandSink) -> usize {
        let mut published = 0;
        for table in self.tables.values() {
            let handle = CommandHandle {
                table: Arc::clone(table),
                config: Arc::clone(&self.config),
            };
            match sink.publish(handle) {
                Ok(()) => published += 1,
                Err(e) => {
                    log::error!("failed to publish command `{}`: {e}", table.descriptor().name);
                },
            }
        }
        published
    }

    /// A host-side handle for one command, by name or alias.
    pub fn handle(&self, name: &str) -> Option<CommandHandle> {
        self.resolve(name).map(|table| CommandHandle {
            table: Arc::clone(table),
            config: Arc::clone(&self.config),
        })
    }

    /// Whether a command is registered under `name` (or an alias).
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Number of registered commands (aliases not counted).
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the registry has no commands.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Sorted (name, description) pairs for host `help` output.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        let mut commands: Vec<(&str, &str)> = self
            .tables
            .values()
            .map(|t| {
                let d = t.descriptor();
                (d.name.as_str(), d.description.as_str())
            })
            .collect();
        commands.sort_by_key(|(name, _)| *name);
        commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects command definitions and performs the one-shot build phase.
///
/// Failed definitions are logged severe and skipped; the resulting
/// registry always comes up with whatever commands registered cleanly.
#[derive(Default)]
pub struct RegistryBuilder {
    config: EngineConfig,
    defs: Vec<Arc<dyn CommandSet>>,
}

impl RegistryBuilder {
    /// Start an empty builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit engine configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a command definition.
    pub fn add<T: CommandSet + 'static>(mut self, def: T) -> Self {
        self.defs.push(Arc::new(def));
        self
    }

    /// Add an already-shared command definition.
    pub fn add_shared(mut self, def: Arc<dyn CommandSet>) -> Self {
        self.defs.push(def);
        self
    }

    /// Run the build phase and return the finished registry.
    pub fn build(self) -> CommandRegistry {
        let mut registry = CommandRegistry::with_config(self.config);
        registry.register_all(self.defs);
        registry
    }
}
