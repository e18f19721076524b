//! Invocation resolution: route a raw invocation to a handler binding.

use bosun_types::caller::Caller;
use bosun_types::config::EngineConfig;

use crate::gate;
use crate::handler::{HandlerFn, HandlerTable};

/// What became of one command invocation.
///
/// [`UnknownCommand`](Self::UnknownCommand) and
/// [`NoMatchingHandler`](Self::NoMatchingHandler) leave the invocation
/// unconsumed so the host may apply its own fallback (typically a usage
/// hint). Every other variant means the engine consumed the invocation,
/// any user-facing message included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler ran to completion.
    Handled,
    /// A permission gate stopped the invocation; the denial message has
    /// been sent.
    Denied,
    /// The resolved handler does not accept this caller kind; the fixed
    /// rejection message has been sent.
    WrongCaller,
    /// No command is registered under the invoked name.
    UnknownCommand,
    /// No default handler exists and no subcommand matched.
    NoMatchingHandler,
    /// The handler itself failed. The detail is also logged with the
    /// command name.
    Fault(String),
}

impl DispatchOutcome {
    /// Whether the invocation was consumed by the engine.
    pub fn consumed(&self) -> bool {
        !matches!(self, Self::UnknownCommand | Self::NoMatchingHandler)
    }
}

/// Resolve and invoke the handler for one invocation against a command's
/// routing table.
///
/// Order: command-level permission gate, subcommand resolution (a
/// matching first token selects the named binding and is consumed, so the
/// handler sees the remaining arguments), handler-level permission gate,
/// caller-kind narrowing, signature adaptation, invocation. Handler
/// faults are caught and logged; nothing escapes to the host.
pub(crate) fn dispatch(
    table: &HandlerTable,
    caller: &dyn Caller,
    raw_args: &[String],
    config: &EngineConfig,
) -> DispatchOutcome {
    let denied_default = config.denied_message.as_str();

    if !gate::check(
        caller,
        table.descriptor.permission.as_ref(),
        denied_default,
        false,
    ) {
        return DispatchOutcome::Denied;
    }

    // The default handler takes the full argument list; a matching first
    // token overrides it and shifts the arguments left by one.
    let mut handler = table.default.as_ref();
    let mut args = raw_args;
    if let Some(first) = raw_args.first()
        && let Some(named) = table.named_get(&first.to_lowercase())
    {
        handler = Some(named);
        args = &raw_args[1..];
    }

    let Some(handler) = handler else {
        return DispatchOutcome::NoMatchingHandler;
    };

    if !gate::check(caller, handler.permission.as_ref(), denied_default, false) {
        return DispatchOutcome::Denied;
    }

    if !handler.filter.allows(caller.kind()) {
        caller.send_message(&format!(
            "This command cannot be executed by {}!",
            caller.display_name()
        ));
        return DispatchOutcome::WrongCaller;
    }

    let result = match &handler.run {
        HandlerFn::WithArgs(f) => f(caller, args),
        HandlerFn::CallerOnly(f) => f(caller),
        HandlerFn::NoArgs(f) => f(),
    };

    match result {
        Ok(()) => DispatchOutcome::Handled,
        Err(e) => {
            log::error!("command `{}` handler failed: {e}", table.descriptor.name);
            DispatchOutcome::Fault(e.to_string())
        },
    }
}
