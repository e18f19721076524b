//! Tab-completion suggestions for partial invocations.

use bosun_types::caller::Caller;
use bosun_types::config::EngineConfig;

use crate::gate;
use crate::handler::HandlerTable;

/// Produce completion suggestions for a partial invocation.
///
/// A custom completion binding, when present, is authoritative: its
/// output is returned verbatim (a caller-kind mismatch or a fault in the
/// binding degrades to an empty list, the fault with a warning log).
/// Without one, a single partial argument is completed from subcommand
/// names by lower-cased prefix, filtered by silent permission checks so
/// no denial messages are ever sent while enumerating. Deeper argument
/// positions are left to the host's own completion.
pub(crate) fn complete(
    table: &HandlerTable,
    caller: &dyn Caller,
    partial_args: &[String],
    config: &EngineConfig,
) -> Vec<String> {
    if let Some(completer) = &table.completion {
        if !completer.filter.allows(caller.kind()) {
            return Vec::new();
        }
        return match (completer.run)(caller, partial_args) {
            Ok(suggestions) => suggestions,
            Err(e) => {
                log::warn!("command `{}` completion failed: {e}", table.descriptor.name);
                Vec::new()
            },
        };
    }

    if partial_args.len() != 1 {
        return Vec::new();
    }

    let prefix = partial_args[0].to_lowercase();
    let mut suggestions: Vec<String> = table
        .named
        .iter()
        .filter(|(name, handler)| {
            name.starts_with(&prefix)
                && gate::check(
                    caller,
                    handler.permission.as_ref(),
                    &config.denied_message,
                    true,
                )
        })
        .map(|(name, _)| name.clone())
        .collect();
    if config.sorted_completions {
        suggestions.sort();
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use bosun_types::caller::{CallerKind, PermissionReq};
    use bosun_types::error::BosunError;

    use super::*;
    use crate::handler::{CommandSpec, Completer, Handler};
    use crate::testutil::TestCaller;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn noop() -> Handler {
        Handler::no_args(|| Ok(()))
    }

    #[test]
    fn custom_completer_output_is_returned_verbatim() {
        // Named bindings exist, but the custom completer wins outright.
        let table = CommandSpec::new("warp")
            .sub("list", noop())
            .sub("link", noop())
            .complete(Completer::new(|_, _| {
                Ok(vec!["home".into(), "spawn".into()])
            }))
            .build()
            .unwrap()
            .unwrap();
        let caller = TestCaller::player("alice");

        let suggestions = complete(&table, &caller, &args(&["li"]), &EngineConfig::default());
        assert_eq!(suggestions, ["home", "spawn"]);
    }

    #[test]
    fn last_registered_completer_wins() {
        let table = CommandSpec::new("warp")
            .default_handler(noop())
            .complete(Completer::new(|_, _| Ok(vec!["first".into()])))
            .complete(Completer::new(|_, _| Ok(vec!["second".into()])))
            .build()
            .unwrap()
            .unwrap();
        let caller = TestCaller::player("alice");

        let suggestions = complete(&table, &caller, &args(&["x"]), &EngineConfig::default());
        assert_eq!(suggestions, ["second"]);
    }

    #[test]
    fn completer_caller_mismatch_is_empty_and_silent() {
        let table = CommandSpec::new("warp")
            .default_handler(noop())
            .complete(Completer::new(|_, _| Ok(vec!["home".into()])).only(CallerKind::Player))
            .build()
            .unwrap()
            .unwrap();
        let caller = TestCaller::console();

        let suggestions = complete(&table, &caller, &args(&["h"]), &EngineConfig::default());
        assert!(suggestions.is_empty());
        assert!(caller.messages().is_empty());
    }

    #[test]
    fn completer_fault_degrades_to_empty() {
        let table = CommandSpec::new("warp")
            .default_handler(noop())
            .complete(Completer::new(|_, _| {
                Err(BosunError::Completion("storage offline".into()))
            }))
            .build()
            .unwrap()
            .unwrap();
        let caller = TestCaller::player("alice");

        let suggestions = complete(&table, &caller, &args(&["h"]), &EngineConfig::default());
        assert!(suggestions.is_empty());
        assert!(caller.messages().is_empty());
    }

    // Scenario: named bindings {list, link}, prefix "li", both permitted.
    #[test]
    fn prefix_synthesis_offers_all_permitted_matches() {
        let table = CommandSpec::new("warp")
            .sub("list", noop())
            .sub("link", noop())
            .sub("set", noop())
            .build()
            .unwrap()
            .unwrap();
        let caller = TestCaller::player("alice");

        let mut suggestions = complete(&table, &caller, &args(&["li"]), &EngineConfig::default());
        suggestions.sort();
        assert_eq!(suggestions, ["link", "list"]);
    }

    #[test]
    fn prefix_match_is_case_insensitive() {
        let table = CommandSpec::new("warp")
            .sub("list", noop())
            .build()
            .unwrap()
            .unwrap();
        let caller = TestCaller::player("alice");

        let suggestions = complete(&table, &caller, &args(&["LI"]), &EngineConfig::default());
        assert_eq!(suggestions, ["list"]);
    }

    #[test]
    fn synthesis_hides_denied_subcommands_silently() {
        let table = CommandSpec::new("warp")
            .sub("list", noop().permission(PermissionReq::new("warp.list")))
            .sub("link", noop().permission(PermissionReq::new("warp.link")))
            .build()
            .unwrap()
            .unwrap();
        let caller = TestCaller::player("alice").grant("warp.list");

        let suggestions = complete(&table, &caller, &args(&["li"]), &EngineConfig::default());
        assert_eq!(suggestions, ["list"]);
        // Silent checks: the denied candidate produced no message.
        assert!(caller.messages().is_empty());
    }

    #[test]
    fn synthesis_keeps_declaration_order() {
        let table = CommandSpec::new("warp")
            .sub("set", noop())
            .sub("sell", noop())
            .sub("send", noop())
            .build()
            .unwrap()
            .unwrap();
        let caller = TestCaller::player("alice");

        let suggestions = complete(&table, &caller, &args(&["se"]), &EngineConfig::default());
        assert_eq!(suggestions, ["set", "sell", "send"]);
    }

    #[test]
    fn sorted_completions_config_sorts_suggestions() {
        let config = EngineConfig {
            sorted_completions: true,
            ..EngineConfig::default()
        };
        let table = CommandSpec::new("warp")
            .sub("set", noop())
            .sub("sell", noop())
            .sub("send", noop())
            .build()
            .unwrap()
            .unwrap();
        let caller = TestCaller::player("alice");

        let suggestions = complete(&table, &caller, &args(&["se"]), &config);
        assert_eq!(suggestions, ["sell", "send", "set"]);
    }

    #[test]
    fn no_partial_args_yields_nothing() {
        let table = CommandSpec::new("warp")
            .sub("list", noop())
            .build()
            .unwrap()
            .unwrap();
        let caller = TestCaller::player("alice");

        let suggestions = complete(&table, &caller, &args(&[]), &EngineConfig::default());
        assert!(suggestions.is_empty());
    }

    #[test]
    fn deeper_argument_positions_fall_through() {
        // Argument-level suggestions beyond the first position are the
        // host's business, even when named bindings exist.
        let table = CommandSpec::new("warp")
            .sub("list", noop())
            .build()
            .unwrap()
            .unwrap();
        let caller = TestCaller::player("alice");

        let suggestions = complete(&table, &caller, &args(&["list", "li"]), &EngineConfig::default());
        assert!(suggestions.is_empty());
    }
}
