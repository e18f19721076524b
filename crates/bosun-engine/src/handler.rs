//! Handler bindings, completion bindings, and the per-command spec.
//!
//! A handler is a thunk bound to the owning command-definition instance,
//! tagged with the invocation shape it accepts. Specs collect the default
//! binding, named subcommand bindings, and at most one completion binding;
//! the registry turns a finished spec into an immutable routing table.

use std::fmt;

use bosun_types::caller::{Caller, CallerFilter, CallerKind, PermissionReq};
use bosun_types::error::{RegistrationError, Result};

use crate::descriptor::CommandDescriptor;

// ---------------------------------------------------------------------------
// Handler thunks
// ---------------------------------------------------------------------------

/// Thunk receiving the caller and the (already shifted) argument list.
pub type WithArgsFn = Box<dyn Fn(&dyn Caller, &[String]) -> Result<()> + Send + Sync>;
/// Thunk receiving only the caller.
pub type CallerOnlyFn = Box<dyn Fn(&dyn Caller) -> Result<()> + Send + Sync>;
/// Thunk receiving no invocation data at all.
pub type NoArgsFn = Box<dyn Fn() -> Result<()> + Send + Sync>;

/// A handler thunk tagged with the invocation shape it accepts.
///
/// The dispatcher adapts each invocation to the variant: `CallerOnly`
/// drops the arguments, `NoArgs` drops caller and arguments both.
pub enum HandlerFn {
    /// `(caller, args)`.
    WithArgs(WithArgsFn),
    /// `(caller)`.
    CallerOnly(CallerOnlyFn),
    /// `()`.
    NoArgs(NoArgsFn),
}

impl fmt::Debug for HandlerFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithArgs(_) => write!(f, "HandlerFn::WithArgs"),
            Self::CallerOnly(_) => write!(f, "HandlerFn::CallerOnly"),
            Self::NoArgs(_) => write!(f, "HandlerFn::NoArgs"),
        }
    }
}

// ---------------------------------------------------------------------------
// Handler bindings
// ---------------------------------------------------------------------------

/// One method-shaped entry point: a thunk plus its own caller filter and
/// permission requirement, independent of the command-level one.
#[derive(Debug)]
pub struct Handler {
    pub(crate) filter: CallerFilter,
    pub(crate) permission: Option<PermissionReq>,
    pub(crate) run: HandlerFn,
}

impl Handler {
    /// Handler receiving the caller and the argument list.
    pub fn with_args(
        f: impl Fn(&dyn Caller, &[String]) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self::from_fn(HandlerFn::WithArgs(Box::new(f)))
    }

    /// Handler receiving only the caller.
    pub fn caller_only(f: impl Fn(&dyn Caller) -> Result<()> + Send + Sync + 'static) -> Self {
        Self::from_fn(HandlerFn::CallerOnly(Box::new(f)))
    }

    /// Handler receiving nothing.
    pub fn no_args(f: impl Fn() -> Result<()> + Send + Sync + 'static) -> Self {
        Self::from_fn(HandlerFn::NoArgs(Box::new(f)))
    }

    fn from_fn(run: HandlerFn) -> Self {
        Self {
            filter: CallerFilter::Any,
            permission: None,
            run,
        }
    }

    /// Require a permission before this handler runs.
    pub fn permission(mut self, req: PermissionReq) -> Self {
        self.permission = Some(req);
        self
    }

    /// Restrict this handler to a single caller kind.
    pub fn only(mut self, kind: CallerKind) -> Self {
        self.filter = CallerFilter::Only(kind);
        self
    }

    /// Restrict this handler to a set of caller kinds.
    pub fn any_of(mut self, kinds: impl IntoIterator<Item = CallerKind>) -> Self {
        self.filter = CallerFilter::AnyOf(kinds.into_iter().collect());
        self
    }
}

/// Completion thunk: produces suggestion strings for a partial invocation.
pub type CompleteFn = Box<dyn Fn(&dyn Caller, &[String]) -> Result<Vec<String>> + Send + Sync>;

/// A custom tab-completion binding.
///
/// When present, its output is returned verbatim and the subcommand-name
/// synthesis path is skipped entirely.
pub struct Completer {
    pub(crate) filter: CallerFilter,
    pub(crate) run: CompleteFn,
}

impl Completer {
    /// Completion handler receiving the caller and the partial arguments.
    pub fn new(
        f: impl Fn(&dyn Caller, &[String]) -> Result<Vec<String>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            filter: CallerFilter::Any,
            run: Box::new(f),
        }
    }

    /// Restrict this completer to a single caller kind. Mismatching
    /// callers get an empty suggestion list, silently.
    pub fn only(mut self, kind: CallerKind) -> Self {
        self.filter = CallerFilter::Only(kind);
        self
    }
}

impl fmt::Debug for Completer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completer")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Command spec
// ---------------------------------------------------------------------------

/// Declarative description of one command: metadata plus handler bindings.
///
/// Builder rule violations (empty name, duplicate subcommand, duplicate
/// default handler) are recorded rather than panicking and surface as a
/// `RegistrationError` when the spec is registered, so one bad command
/// never aborts the whole build phase.
#[derive(Debug)]
pub struct CommandSpec {
    name: String,
    description: String,
    usage: String,
    aliases: Vec<String>,
    permission: Option<PermissionReq>,
    default: Option<Handler>,
    named: Vec<(String, Handler)>,
    completion: Option<Completer>,
    error: Option<RegistrationError>,
}

impl CommandSpec {
    /// Start a spec for the command `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let error = name.is_empty().then_some(RegistrationError::EmptyName);
        Self {
            name,
            description: String::new(),
            usage: String::new(),
            aliases: Vec::new(),
            permission: None,
            default: None,
            named: Vec::new(),
            completion: None,
            error,
        }
    }

    /// One-line description for host `help` output.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Usage string shown by host fallbacks.
    pub fn usage(mut self, text: impl Into<String>) -> Self {
        self.usage = text.into();
        self
    }

    /// Add an alternative name for this command.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Command-level permission, checked before any handler-level one.
    pub fn permission(mut self, req: PermissionReq) -> Self {
        self.permission = Some(req);
        self
    }

    /// The default handler, invoked when no subcommand token matches.
    pub fn default_handler(mut self, handler: Handler) -> Self {
        if self.default.is_some() {
            self.record(RegistrationError::DuplicateDefault(self.name.clone()));
        } else {
            self.default = Some(handler);
        }
        self
    }

    /// A named subcommand handler. The name is matched case-insensitively
    /// against the first argument token; an empty name means the default
    /// handler.
    pub fn sub(mut self, name: impl Into<String>, handler: Handler) -> Self {
        let key = name.into().to_lowercase();
        if key.is_empty() {
            return self.default_handler(handler);
        }
        if self.named.iter().any(|(k, _)| *k == key) {
            self.record(RegistrationError::DuplicateSub(self.name.clone(), key));
        } else {
            self.named.push((key, handler));
        }
        self
    }

    /// The completion binding. Calling this more than once keeps the last
    /// completer.
    pub fn complete(mut self, completer: Completer) -> Self {
        self.completion = Some(completer);
        self
    }

    /// The command name this spec was started with.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn record(&mut self, err: RegistrationError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Finish the spec. `Ok(None)` means the command has no executable
    /// bindings and is skipped (a completion binding alone does not make
    /// a command registrable).
    pub(crate) fn build(self) -> std::result::Result<Option<HandlerTable>, RegistrationError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.default.is_none() && self.named.is_empty() {
            return Ok(None);
        }
        Ok(Some(HandlerTable {
            descriptor: CommandDescriptor {
                name: self.name,
                description: self.description,
                usage: self.usage,
                aliases: self.aliases,
                permission: self.permission,
            },
            default: self.default,
            named: self.named,
            completion: self.completion,
        }))
    }
}

// ---------------------------------------------------------------------------
// Handler table
// ---------------------------------------------------------------------------

/// The full routing/permission/completion data for one command.
///
/// Built once during registration and immutable afterwards; shared via
/// `Arc` between the registry's dispatch map and published handles, so
/// concurrent invocations need no locking. Named bindings keep their
/// declaration order, which is the order completion synthesis reports
/// them in.
#[derive(Debug)]
pub struct HandlerTable {
    pub(crate) descriptor: CommandDescriptor,
    pub(crate) default: Option<Handler>,
    pub(crate) named: Vec<(String, Handler)>,
    pub(crate) completion: Option<Completer>,
}

impl HandlerTable {
    /// Static metadata for this command.
    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    /// Look up a named binding by its lower-cased key.
    pub(crate) fn named_get(&self, key: &str) -> Option<&Handler> {
        self.named.iter().find(|(k, _)| k == key).map(|(_, h)| h)
    }
}
