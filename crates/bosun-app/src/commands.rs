//! Sample command definitions for the demo host.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use bosun_engine::{CommandSet, CommandSpec, Completer, Handler};
use bosun_types::caller::{Caller, CallerKind, PermissionReq};
use bosun_types::error::{BosunError, Result};

// ---------------------------------------------------------------------------
// warp
// ---------------------------------------------------------------------------

/// `warp` — teleport to saved warp points; subcommands manage the list.
///
/// One instance backs every invocation, so the warp table lives behind a
/// mutex.
pub struct WarpCommand {
    warps: Mutex<BTreeMap<String, (i32, i32, i32)>>,
}

impl WarpCommand {
    pub fn new() -> Self {
        let mut warps = BTreeMap::new();
        warps.insert("spawn".to_string(), (0, 64, 0));
        warps.insert("home".to_string(), (120, 70, -45));
        Self {
            warps: Mutex::new(warps),
        }
    }

    fn table(&self) -> Result<MutexGuard<'_, BTreeMap<String, (i32, i32, i32)>>> {
        self.warps
            .lock()
            .map_err(|_| BosunError::Handler("warp table lock poisoned".into()))
    }

    fn warp_to(&self, caller: &dyn Caller, args: &[String]) -> Result<()> {
        let Some(name) = args.first() else {
            caller.send_message("Which warp? Try `warp list`.");
            return Ok(());
        };
        let key = name.to_lowercase();
        match self.table()?.get(&key) {
            Some((x, y, z)) => {
                caller.send_message(&format!("Warped to {key} ({x}, {y}, {z})."));
            },
            None => caller.send_message(&format!("No such warp: {key}.")),
        }
        Ok(())
    }

    fn list(&self, caller: &dyn Caller) -> Result<()> {
        let names: Vec<String> = self.table()?.keys().cloned().collect();
        if names.is_empty() {
            caller.send_message("No warps defined.");
        } else {
            caller.send_message(&format!("Warps: {}", names.join(", ")));
        }
        Ok(())
    }

    fn set(&self, caller: &dyn Caller, args: &[String]) -> Result<()> {
        let parsed: Option<(String, i32, i32, i32)> = match args {
            [name, x, y, z] => match (x.parse(), y.parse(), z.parse()) {
                (Ok(x), Ok(y), Ok(z)) => Some((name.to_lowercase(), x, y, z)),
                _ => None,
            },
            _ => None,
        };
        let Some((name, x, y, z)) = parsed else {
            caller.send_message("usage: warp set <name> <x> <y> <z>");
            return Ok(());
        };
        self.table()?.insert(name.clone(), (x, y, z));
        caller.send_message(&format!("Warp {name} saved at ({x}, {y}, {z})."));
        Ok(())
    }

    fn del(&self, caller: &dyn Caller, args: &[String]) -> Result<()> {
        let Some(name) = args.first() else {
            caller.send_message("usage: warp del <name>");
            return Ok(());
        };
        let key = name.to_lowercase();
        if self.table()?.remove(&key).is_some() {
            caller.send_message(&format!("Warp {key} removed."));
        } else {
            caller.send_message(&format!("No such warp: {key}."));
        }
        Ok(())
    }
}

impl Default for WarpCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSet for WarpCommand {
    fn spec(self: Arc<Self>) -> CommandSpec {
        CommandSpec::new("warp")
            .description("Teleport to a saved warp point")
            .usage("warp <name> | warp list | warp set <name> <x> <y> <z> | warp del <name>")
            .alias("w")
            .default_handler(Handler::with_args({
                let s = Arc::clone(&self);
                move |c, a| s.warp_to(c, a)
            }))
            .sub(
                "list",
                Handler::caller_only({
                    let s = Arc::clone(&self);
                    move |c| s.list(c)
                })
                .permission(PermissionReq::new("warp.list")),
            )
            .sub(
                "set",
                Handler::with_args({
                    let s = Arc::clone(&self);
                    move |c, a| s.set(c, a)
                })
                .permission(PermissionReq::new("warp.set")),
            )
            .sub(
                "del",
                Handler::with_args({
                    let s = Arc::clone(&self);
                    move |c, a| s.del(c, a)
                })
                .permission(PermissionReq::new("warp.del")),
            )
    }
}

// ---------------------------------------------------------------------------
// gamemode
// ---------------------------------------------------------------------------

const MODES: &[&str] = &["adventure", "creative", "spectator", "survival"];

/// `gamemode` — show or change the current game mode. Carries a custom
/// completion binding that suggests mode names.
pub struct GamemodeCommand {
    mode: Mutex<String>,
}

impl GamemodeCommand {
    pub fn new() -> Self {
        Self {
            mode: Mutex::new("survival".to_string()),
        }
    }

    fn show_or_set(&self, caller: &dyn Caller, args: &[String]) -> Result<()> {
        let mut mode = self
            .mode
            .lock()
            .map_err(|_| BosunError::Handler("game mode lock poisoned".into()))?;
        let Some(requested) = args.first() else {
            caller.send_message(&format!("Game mode is {mode}."));
            return Ok(());
        };
        let requested = requested.to_lowercase();
        if MODES.contains(&requested.as_str()) {
            *mode = requested;
            caller.send_message(&format!("Game mode set to {mode}."));
        } else {
            caller.send_message(&format!(
                "Unknown mode `{requested}`. Modes: {}",
                MODES.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for GamemodeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSet for GamemodeCommand {
    fn spec(self: Arc<Self>) -> CommandSpec {
        CommandSpec::new("gamemode")
            .description("Show or change the game mode")
            .usage("gamemode [mode]")
            .alias("gm")
            .permission(
                PermissionReq::new("gamemode.use")
                    .with_message("You may not change game modes."),
            )
            .default_handler(Handler::with_args({
                let s = Arc::clone(&self);
                move |c, a| s.show_or_set(c, a)
            }))
            .complete(Completer::new(|_, partial| {
                let prefix = partial
                    .first()
                    .map(|p| p.to_lowercase())
                    .unwrap_or_default();
                Ok(MODES
                    .iter()
                    .filter(|m| m.starts_with(&prefix))
                    .map(|m| m.to_string())
                    .collect())
            }))
    }
}

// ---------------------------------------------------------------------------
// say
// ---------------------------------------------------------------------------

/// `say` — broadcast a message. Console only; players get the fixed
/// wrong-caller rejection.
pub struct SayCommand;

impl CommandSet for SayCommand {
    fn spec(self: Arc<Self>) -> CommandSpec {
        CommandSpec::new("say")
            .description("Broadcast a message to every player")
            .usage("say <message>")
            .default_handler(
                Handler::with_args(|caller, args| {
                    if args.is_empty() {
                        caller.send_message("Say what?");
                        return Ok(());
                    }
                    println!("[broadcast] {}", args.join(" "));
                    Ok(())
                })
                .only(CallerKind::Console),
            )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;

    use bosun_engine::{CommandRegistry, DispatchOutcome};

    use super::*;

    struct RecordingCaller {
        kind: CallerKind,
        granted: HashSet<String>,
        sent: RefCell<Vec<String>>,
    }

    impl RecordingCaller {
        fn operator() -> Self {
            Self {
                kind: CallerKind::Console,
                granted: ["warp.list", "warp.set", "warp.del", "gamemode.use"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn player() -> Self {
            Self {
                kind: CallerKind::Player,
                granted: HashSet::new(),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn messages(&self) -> Vec<String> {
            self.sent.borrow().clone()
        }
    }

    impl Caller for RecordingCaller {
        fn kind(&self) -> CallerKind {
            self.kind
        }

        fn display_name(&self) -> String {
            "tester".to_string()
        }

        fn has_permission(&self, key: &str) -> bool {
            self.granted.contains(key)
        }

        fn send_message(&self, text: &str) {
            self.sent.borrow_mut().push(text.to_string());
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn demo_registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(WarpCommand::new())).unwrap();
        registry.register(Arc::new(GamemodeCommand::new())).unwrap();
        registry.register(Arc::new(SayCommand)).unwrap();
        registry
    }

    #[test]
    fn warp_set_then_warp_to_round_trips() {
        let registry = demo_registry();
        let caller = RecordingCaller::operator();

        let outcome = registry.dispatch("warp", &caller, &args(&["set", "base", "1", "2", "3"]));
        assert_eq!(outcome, DispatchOutcome::Handled);
        let outcome = registry.dispatch("warp", &caller, &args(&["base"]));
        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(
            caller.messages(),
            ["Warp base saved at (1, 2, 3).", "Warped to base (1, 2, 3)."]
        );
    }

    #[test]
    fn warp_del_removes_the_warp() {
        let registry = demo_registry();
        let caller = RecordingCaller::operator();

        registry.dispatch("warp", &caller, &args(&["del", "home"]));
        registry.dispatch("warp", &caller, &args(&["home"]));
        assert_eq!(
            caller.messages(),
            ["Warp home removed.", "No such warp: home."]
        );
    }

    #[test]
    fn warp_list_requires_permission() {
        let registry = demo_registry();
        let caller = RecordingCaller::player();

        let outcome = registry.dispatch("warp", &caller, &args(&["list"]));
        assert_eq!(outcome, DispatchOutcome::Denied);
        assert_eq!(caller.messages().len(), 1);
    }

    #[test]
    fn gamemode_completion_suggests_modes() {
        let registry = demo_registry();
        let caller = RecordingCaller::operator();

        let suggestions = registry.complete("gamemode", &caller, &args(&["s"]));
        assert_eq!(suggestions, ["spectator", "survival"]);
    }

    #[test]
    fn gamemode_rejects_unknown_modes() {
        let registry = demo_registry();
        let caller = RecordingCaller::operator();

        registry.dispatch("gamemode", &caller, &args(&["peaceful"]));
        registry.dispatch("gm", &caller, &args(&[]));
        let messages = caller.messages();
        assert!(messages[0].starts_with("Unknown mode `peaceful`"));
        assert_eq!(messages[1], "Game mode is survival.");
    }

    #[test]
    fn say_is_console_only() {
        let registry = demo_registry();
        let player = RecordingCaller::player();

        let outcome = registry.dispatch("say", &player, &args(&["hi"]));
        assert_eq!(outcome, DispatchOutcome::WrongCaller);
        assert_eq!(
            player.messages(),
            ["This command cannot be executed by tester!"]
        );
    }
}
