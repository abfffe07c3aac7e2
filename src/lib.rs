//! # shell-probe
//!
//! Deadline-bounded shell command execution source for discovery agents.
//!
//! This crate runs an arbitrary local shell or script command on behalf
//! of a remote discovery request: it enforces a wall-clock deadline,
//! captures output, normalizes exit-code semantics across platforms, and
//! can automate a single interactive credential prompt. It exposes the
//! result through the uniform source contract a hosting engine consumes.
//!
//! ## Features
//!
//! - **Cross-platform shell wrapping**: POSIX shell (`bash`/`sh -c`) and
//!   PowerShell strategies selected once at startup
//! - **Deadline enforcement**: every run is bounded; timeouts carry the
//!   output captured so far
//! - **Prompt automation**: watch a child's output for a credential
//!   prompt and answer it over stdin
//! - **Uniform contract**: `get`/`search`/`find` source surface with
//!   structured items and cross-references
//!
//! ## Quick Start
//!
//! ```no_run
//! use shell_probe::source::{local_context, CommandSource, Source};
//!
//! #[tokio::main]
//! async fn main() -> shell_probe::Result<()> {
//!     // Initialize logging
//!     shell_probe::logging::try_init().ok();
//!
//!     let source = CommandSource::new();
//!     let item = source.get(local_context(), "uname -a").await?;
//!
//!     println!("{}", item.attribute_str("stdout").unwrap_or_default());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod item;
pub mod logging;
pub mod prompt;
pub mod shell;
pub mod source;
pub mod spec;

// Re-export commonly used types
pub use error::{Result, ShellProbeError};
pub use execution::{CommandExecutor, ExecutionOutcome, OutcomeStatus};
pub use item::{Item, ItemQuery, QueryMethod};
pub use prompt::{PromptWatch, PromptWatcher};
pub use shell::{Invocation, ShellKind};
pub use source::{CommandSource, Source};
pub use spec::{CommandSpec, DEFAULT_TIMEOUT};
