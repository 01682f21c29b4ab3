//! Page freshness runtime simulator.
//!
//! Entry point for the `pagefresh` binary. Parses CLI arguments, builds a
//! session, and either replays a scenario file or hands control to the
//! interactive shell.

use clap::Parser;
use lifecycle::RuntimeConfig;
use page_cli::{scenario, repl, Cli, CliError, Session};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => match RuntimeConfig::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: invalid config '{}': {}", path, e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("Error: could not read config '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => RuntimeConfig::default(),
    };

    let session = match Session::new(&cli.url, config) {
        Ok(session) => session,
        Err(CliError::Url(e)) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(path) = &cli.scenario {
        match scenario::load_scenario(path) {
            Ok(steps) => session.run_scenario(&steps),
            Err(CliError::Io(e)) => {
                eprintln!("Error: could not read scenario '{}': {}", path, e);
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else if cli.interactive {
        repl::run_repl(&session)?;
    } else {
        println!("pagefresh v0.1.0");
        println!();
        println!("Usage:");
        println!("  pagefresh --scenario <FILE>    Replay a scenario file");
        println!("  pagefresh --interactive        Start the simulator shell");
        println!("  pagefresh --url <URL>          Set the initial page URL");
        println!("  pagefresh --config <FILE>      Load a JSON configuration");
    }

    Ok(())
}
