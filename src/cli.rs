//! Command-line interface for shell-probe.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// The query to run: a bare command line, or a JSON spec with
    /// `--search`.
    pub query: Option<String>,
    /// Interpret the query as a JSON-encoded command spec.
    pub search: bool,
    /// Default timeout override.
    pub timeout: Option<Duration>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('s') | Long("search") => {
                result.search = true;
            }
            Short('t') | Long("timeout") => {
                let value: String = parser.value()?.parse()?;
                result.timeout = Some(
                    humantime::parse_duration(&value)
                        .map_err(|_| ArgsError::InvalidValue("timeout", value))?,
                );
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                if result.query.is_some() {
                    return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
                }
                result.query = Some(val.to_string_lossy().into());
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"shell-probe {version}
Deadline-bounded shell command execution source for discovery agents

USAGE:
    shell-probe [OPTIONS] <QUERY>

ARGS:
    <QUERY>                 Command line to run, or a JSON spec with --search

OPTIONS:
    -s, --search            Interpret the query as a JSON command spec
    -t, --timeout <DUR>     Default timeout (e.g. 500ms, 5s, 1m) [default: 10s]
    -c, --config <FILE>     Path to configuration file (JSON)
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    SHELL_PROBE_DEFAULT_TIMEOUT  Default timeout (overrides config)
    SHELL_PROBE_LOG_LEVEL        Log level (overrides config)
    RUST_LOG                     Alternative log level setting

EXAMPLES:
    # Run a bare command and print the resulting item
    shell-probe 'uname -a'

    # Structured spec with arguments and environment
    shell-probe -s '{{"command": "cat", "args": ["/etc/hosts"], "timeout": "5s"}}'

    # Tight deadline for everything without an explicit timeout
    shell-probe -t 500ms 'sleep 10'
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("shell-probe {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
