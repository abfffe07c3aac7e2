//! Command execution engine.

use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::env::merge_environment;
use super::outcome::{ExecutionOutcome, OutcomeStatus};
use crate::error::{Result, ShellProbeError};
use crate::item::{map_outcome, Item};
use crate::shell::{Invocation, ShellKind};
use crate::spec::{CommandSpec, DEFAULT_TIMEOUT};

/// Buffer size for reading child output pipes.
const READ_BUFFER_SIZE: usize = 4096;

/// How long to keep draining output pipes once the child itself is gone.
const CAPTURE_GRACE: Duration = Duration::from_secs(1);

/// Runs command specs against the host shell under a deadline.
///
/// Each call owns its child process, pipes, and buffers exclusively; no
/// state is shared across invocations.
pub struct CommandExecutor {
    shell: ShellKind,
    default_timeout: Duration,
}

impl CommandExecutor {
    /// Create an executor using the host platform's shell strategy.
    pub fn new() -> Self {
        Self::with_shell(ShellKind::host())
    }

    /// Create an executor with an explicit shell strategy.
    pub fn with_shell(shell: ShellKind) -> Self {
        Self {
            shell,
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the timeout applied to specs that do not carry one.
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.default_timeout = timeout;
        }
        self
    }

    /// Execute a spec and map the completed run into an item.
    ///
    /// Exactly one of the typed failures or a success item comes back;
    /// there is no partial success and nothing is retried.
    pub async fn run(&self, spec: &CommandSpec, context: &str) -> Result<Item> {
        spec.validate()?;

        if let Some(user) = &spec.run_as {
            debug!(user = %user, "run_as is declared but not enforced");
        }

        let timeout = self.resolve_timeout(spec);
        let invocation = self.shell.wrap(&spec.command, &spec.args)?;

        debug!(
            command = %spec.command,
            program = %invocation.program.display(),
            timeout_ms = timeout.as_millis() as u64,
            "executing command"
        );

        let outcome = self.spawn_and_wait(spec, &invocation, timeout).await?;

        match outcome.status {
            OutcomeStatus::DeadlineExceeded => Err(ShellProbeError::Timeout {
                stdout: outcome.stdout_lossy(),
                stderr: outcome.stderr_lossy(),
            }),
            OutcomeStatus::Signaled => Err(ShellProbeError::ExecutionFailed {
                reason: "process was killed before exiting".into(),
                stdout: outcome.stdout_lossy(),
                stderr: outcome.stderr_lossy(),
            }),
            OutcomeStatus::Exited(code) if code != spec.expected_exit => {
                Err(ShellProbeError::UnexpectedExit {
                    code,
                    expected: spec.expected_exit,
                    stdout: outcome.stdout_lossy(),
                    stderr: outcome.stderr_lossy(),
                })
            }
            OutcomeStatus::Exited(code) => {
                Ok(map_outcome(spec, code, &outcome, context, self.shell.newline()))
            }
        }
    }

    /// The timeout that will bound this spec's execution.
    fn resolve_timeout(&self, spec: &CommandSpec) -> Duration {
        match spec.timeout {
            Some(t) if !t.is_zero() => t,
            _ => self.default_timeout,
        }
    }

    async fn spawn_and_wait(
        &self,
        spec: &CommandSpec,
        invocation: &Invocation,
        timeout: Duration,
    ) -> Result<ExecutionOutcome> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .env_clear()
            .envs(merge_environment(&spec.env))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if !spec.dir.is_empty() {
            command.current_dir(&spec.dir);
        }

        let mut child = command
            .spawn()
            .map_err(|err| ShellProbeError::ExecutionFailed {
                reason: err.to_string(),
                stdout: String::new(),
                stderr: String::new(),
            })?;

        // Stdin is delivered on a background task (write then close) so a
        // child that never drains its input cannot stall the wait below.
        let stdin_task = spawn_stdin_writer(child.stdin.take(), spec.stdin.clone());
        let stdout_task = spawn_capture(child.stdout.take());
        let stderr_task = spawn_capture(child.stderr.take());

        match tokio::time::timeout(timeout, child.wait()).await {
            Err(_elapsed) => {
                stdin_task.abort();
                kill_child(&mut child).await;

                Ok(ExecutionOutcome {
                    stdout: stdout_task.collect().await,
                    stderr: stderr_task.collect().await,
                    status: OutcomeStatus::DeadlineExceeded,
                })
            }
            Ok(Err(err)) => {
                stdin_task.abort();

                Err(ShellProbeError::ExecutionFailed {
                    reason: err.to_string(),
                    stdout: String::from_utf8_lossy(&stdout_task.collect().await).into_owned(),
                    stderr: String::from_utf8_lossy(&stderr_task.collect().await).into_owned(),
                })
            }
            Ok(Ok(status)) => {
                // The writer cannot block anymore: the child is gone, so a
                // stuck write fails with a broken pipe. Its error never
                // fails the run, but it is surfaced in the log.
                if let Ok(Err(err)) = stdin_task.await {
                    warn!(error = %err, "stdin delivery to child failed");
                }

                let outcome_status = match status.code() {
                    Some(code) => OutcomeStatus::Exited(code),
                    None => OutcomeStatus::Signaled,
                };

                Ok(ExecutionOutcome {
                    stdout: stdout_task.collect().await,
                    stderr: stderr_task.collect().await,
                    status: outcome_status,
                })
            }
        }
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_stdin_writer(
    pipe: Option<ChildStdin>,
    payload: Vec<u8>,
) -> JoinHandle<std::io::Result<()>> {
    tokio::spawn(async move {
        let Some(mut pipe) = pipe else {
            return Ok(());
        };

        pipe.write_all(&payload).await?;
        pipe.shutdown().await
    })
}

/// A background task draining one output pipe into a shared buffer.
///
/// The buffer is shared rather than owned by the task so the partial
/// capture survives even when collection has to give up on a pipe that an
/// orphaned grandchild is keeping open.
struct CaptureTask {
    buffer: Arc<Mutex<Vec<u8>>>,
    handle: JoinHandle<()>,
}

impl CaptureTask {
    /// Take whatever has been captured, waiting up to [`CAPTURE_GRACE`]
    /// for the pipe to reach EOF after the child is gone.
    async fn collect(self) -> Vec<u8> {
        if tokio::time::timeout(CAPTURE_GRACE, self.handle).await.is_err() {
            debug!("output pipe still open after child exit; taking partial capture");
        }

        let mut buffer = match self.buffer.lock() {
            Ok(buffer) => buffer,
            Err(poisoned) => poisoned.into_inner(),
        };

        std::mem::take(&mut *buffer)
    }
}

fn spawn_capture<R>(pipe: Option<R>) -> CaptureTask
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buffer);

    let handle = tokio::spawn(async move {
        let Some(mut pipe) = pipe else {
            return;
        };

        let mut chunk = [0u8; READ_BUFFER_SIZE];

        loop {
            match pipe.read(&mut chunk).await {
                Ok(0) => break,
                Ok(read) => {
                    let Ok(mut buffer) = sink.lock() else {
                        break;
                    };
                    buffer.extend_from_slice(&chunk[..read]);
                }
                Err(err) => {
                    debug!(error = %err, "output capture ended early");
                    break;
                }
            }
        }
    });

    CaptureTask { buffer, handle }
}

async fn kill_child(child: &mut Child) {
    if let Err(err) = child.start_kill() {
        debug!(error = %err, "failed to kill timed-out child");
    }

    // Reap so the capture tasks see EOF and the process table stays clean.
    let _ = child.wait().await;
}
