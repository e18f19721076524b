//! Interactive demo host for the bosun command engine.
//!
//! Reads lines from stdin and routes them through a published in-memory
//! command table, the way a host process would from its own command hook.
//! Host intercepts: `help` lists commands, `su [name [perm...]]` switches
//! the acting caller, `quit` exits. A line starting with `?` runs a
//! completion query instead of an invocation, e.g. `?warp li`.

mod caller;
mod commands;
mod sink;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use bosun_engine::RegistryBuilder;
use bosun_types::caller::Caller;

use crate::caller::{ConsoleCaller, PlayerCaller};
use crate::sink::InMemorySink;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let registry = RegistryBuilder::new()
        .add(commands::WarpCommand::new())
        .add(commands::GamemodeCommand::new())
        .add(commands::SayCommand)
        .build();
    log::info!("Registered {} commands", registry.len());

    let mut sink = InMemorySink::new();
    let published = registry.publish(&mut sink);
    log::info!("Published {published} commands into the host table");

    let mut current: Box<dyn Caller> = Box::new(ConsoleCaller::new("server"));

    let stdin = io::stdin();
    print_prompt(&*current)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            print_prompt(&*current)?;
            continue;
        }

        if let Some(query) = trimmed.strip_prefix('?') {
            complete_query(&sink, &*current, query);
            print_prompt(&*current)?;
            continue;
        }

        let tokens: Vec<String> = trimmed.split_whitespace().map(str::to_string).collect();
        let Some((name, args)) = tokens.split_first() else {
            print_prompt(&*current)?;
            continue;
        };

        match name.as_str() {
            "quit" | "exit" => break,
            "help" => {
                for (name, usage) in sink.usage_lines() {
                    println!("  {name:<10} {usage}");
                }
            },
            "su" => current = switch_caller(args),
            _ => invoke(&sink, &*current, name, args),
        }
        print_prompt(&*current)?;
    }
    Ok(())
}

/// Route one invocation through the host table, applying the host
/// fallback (a usage hint) when the engine leaves it unconsumed.
fn invoke(sink: &InMemorySink, caller: &dyn Caller, name: &str, args: &[String]) {
    match sink.get(name) {
        Some(handle) => {
            let outcome = handle.execute(caller, args);
            if !outcome.consumed() {
                println!("Usage: {}", handle.descriptor().usage);
            }
        },
        None => println!("Unknown command: {name}. Try `help`."),
    }
}

/// Run a completion query: `?<command> [partial...]`.
fn complete_query(sink: &InMemorySink, caller: &dyn Caller, query: &str) {
    let tokens: Vec<String> = query.split_whitespace().map(str::to_string).collect();
    let Some((name, partial)) = tokens.split_first() else {
        println!("usage: ?<command> [partial...]");
        return;
    };
    match sink.get(name) {
        Some(handle) => {
            let suggestions = handle.complete(caller, partial);
            if suggestions.is_empty() {
                println!("(no suggestions)");
            } else {
                println!("{}", suggestions.join("  "));
            }
        },
        None => println!("Unknown command: {name}"),
    }
}

/// `su <name> [perm...]` acts as a player with the given permissions;
/// bare `su` returns to the console.
fn switch_caller(args: &[String]) -> Box<dyn Caller> {
    match args.split_first() {
        Some((name, perms)) => {
            println!("Now acting as player {name}");
            Box::new(PlayerCaller::new(name.clone(), perms.to_vec()))
        },
        None => {
            println!("Back to console");
            Box::new(ConsoleCaller::new("server"))
        },
    }
}

fn print_prompt(caller: &dyn Caller) -> io::Result<()> {
    print!("{}> ", caller.display_name());
    io::stdout().flush()
}
