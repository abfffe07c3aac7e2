//! Command execution: environment merging, child process supervision
//! under a deadline, and outcome capture.
//!
//! # Example
//!
//! ```no_run
//! use shell_probe::execution::CommandExecutor;
//! use shell_probe::spec::CommandSpec;
//!
//! # async fn run() -> shell_probe::Result<()> {
//! let executor = CommandExecutor::new();
//! let spec = CommandSpec::new("echo").arg("hello");
//! let item = executor.run(&spec, "localhost").await?;
//! println!("{}", item.attribute_str("stdout").unwrap_or_default());
//! # Ok(())
//! # }
//! ```

mod env;
mod executor;
mod outcome;

pub use env::merge_environment;
pub use executor::CommandExecutor;
pub use outcome::{trim_trailing_newline, ExecutionOutcome, OutcomeStatus};
