//! Page session simulator CLI library.
//!
//! Provides the Session facade and supporting modules for the `pagefresh`
//! binary: scenario files replay a sequence of external signals against a
//! fresh page runtime, and the interactive shell drives one by hand.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod repl;
pub mod scenario;
pub mod session;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use scenario::ScenarioStep;
pub use session::Session;
