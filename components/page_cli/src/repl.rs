//! Interactive simulator shell.

use crate::error::{CliError, CliResult};
use crate::scenario::ScenarioStep;
use crate::session::{describe_event, Session};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Runs the interactive shell over one session.
///
/// Returns `Ok(())` when the shell exits normally.
pub fn run_repl(session: &Session) -> CliResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Shell(format!("failed to initialize editor: {}", e)))?;

    println!("pagefresh session simulator");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    loop {
        match editor.readline("page> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);

                if trimmed == "exit" || trimmed == "quit" {
                    println!("Goodbye!");
                    break;
                }

                handle_command(trimmed, session);
            }
            Err(ReadlineError::Interrupted) => {
                println!("Press Ctrl-D or type 'exit' to quit");
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                return Err(CliError::Shell(format!("readline error: {}", err)));
            }
        }
    }

    Ok(())
}

fn handle_command(input: &str, session: &Session) {
    let (command, rest) = match input.split_once(' ') {
        Some((c, r)) => (c, r.trim()),
        None => (input, ""),
    };

    let step = match command {
        "help" => {
            print_help();
            return;
        }
        "load" => Some(ScenarioStep::Load),
        "frame" => Some(ScenarioStep::FirstFrame),
        "unload" => Some(ScenarioStep::Unload),
        "back" => Some(ScenarioStep::Back),
        "click" => {
            if rest.is_empty() {
                println!("usage: click <href>");
                return;
            }
            Some(ScenarioStep::Click {
                href: rest.to_string(),
            })
        }
        "clickx" => Some(ScenarioStep::ClickOutsideAnchor),
        "msg" => match serde_json::from_str(rest) {
            Ok(payload) => Some(ScenarioStep::Message { payload }),
            Err(e) => {
                println!("not valid JSON: {}", e);
                return;
            }
        },
        "tick" => match rest.parse::<i64>() {
            Ok(ms) if ms > 0 => Some(ScenarioStep::AdvanceClock { ms }),
            _ => {
                println!("usage: tick <milliseconds>");
                return;
            }
        },
        "cache" => {
            if rest.is_empty() {
                println!("usage: cache <name>");
                return;
            }
            Some(ScenarioStep::OpenCache {
                name: rest.to_string(),
            })
        }
        "respond" => {
            // respond [<http-date>]
            let last_modified = (!rest.is_empty()).then(|| rest.to_string());
            Some(ScenarioStep::StageResponse {
                status: 200,
                last_modified,
            })
        }
        "fail" => Some(ScenarioStep::StageFailure {
            reason: if rest.is_empty() {
                "staged failure".to_string()
            } else {
                rest.to_string()
            },
        }),
        "poll" => {
            let outcome = session.poll();
            println!("poll outcome: {:?}", outcome);
            for event in session.take_new_events() {
                println!("  {}", describe_event(&event));
            }
            return;
        }
        "status" => {
            print_status(session);
            return;
        }
        "caches" => {
            println!("{:?}", session.cache_names());
            return;
        }
        "storage" => {
            for (key, value) in session.storage_dump() {
                println!("{} = {}", key, value);
            }
            return;
        }
        "events" => {
            for event in session.all_events() {
                println!("{}", describe_event(&event));
            }
            return;
        }
        _ => {
            println!("Unknown command: {}", command);
            println!("Type 'help' for available commands");
            return;
        }
    };

    if let Some(step) = step {
        for event in session.apply(&step) {
            println!("  {}", describe_event(&event));
        }
    }
}

fn print_status(session: &Session) {
    let runtime = session.runtime();
    println!("now:      {}", session.now());
    println!("path:     {}", runtime.history().current().path());
    println!("history:  {} entries", runtime.history().len());
    println!("reloads:  {}", runtime.history().reload_requests().len());
    println!(
        "indicator: {}",
        if runtime.document().loading_indicator().is_visible() {
            "visible"
        } else {
            "hidden"
        }
    );
}

fn print_help() {
    println!("Session commands:");
    println!("  load              - deliver the page load signal");
    println!("  frame             - deliver the host first-frame signal");
    println!("  unload            - deliver the before-unload signal");
    println!("  back              - go back through history");
    println!("  click <href>      - click an anchor with this href");
    println!("  clickx            - click outside any anchor");
    println!("  msg <json>        - deliver a cross-context message");
    println!("  tick <ms>         - advance the clock, firing due timers");
    println!("  poll              - run one poll cycle now");
    println!("Stage direction:");
    println!("  respond [date]    - stage a probe response (optional Last-Modified)");
    println!("  fail [reason]     - stage a probe failure");
    println!("  cache <name>      - create a named cache");
    println!("Inspection:");
    println!("  status            - clock, path, history, reloads, indicator");
    println!("  caches            - list cache names");
    println!("  storage           - dump persisted keys");
    println!("  events            - list every notification so far");
    println!("  exit              - quit");
}
