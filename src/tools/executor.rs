//! Shell Command Execution
//!
//! The single execution primitive behind every tool: one command string, run
//! through `sh -c`, bounded by a timeout, with both output streams captured
//! and rendered into a fixed response template. Tool handlers are command
//! planners on top of this; nothing else in the crate spawns processes.

use super::validator::CommandValidator;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tracing::{debug, info, warn};

/// Default timeout for command execution in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Outcome of a single command execution
///
/// A non-zero exit code is still `Completed`; callers learn about it from
/// the rendered exit-code section, never as a failure variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The process ran to completion
    Completed {
        /// Captured stdout (lossily decoded)
        stdout: String,
        /// Captured stderr (lossily decoded)
        stderr: String,
        /// Exit code (-1 when the process was signal-terminated)
        exit_code: i32,
    },

    /// Empty command string; nothing was spawned
    EmptyCommand,

    /// Denylist match; nothing was spawned
    Blocked {
        /// The pattern that matched
        pattern: &'static str,
    },

    /// The process outlived its timeout and was abandoned
    TimedOut {
        /// The timeout that was exceeded
        timeout_secs: u64,
    },

    /// The process could not be spawned or awaited
    Failed {
        /// Operating-system error text
        message: String,
    },
}

impl ExecutionOutcome {
    /// Render the outcome into the fixed response template
    ///
    /// `Completed` renders as markdown sections: `### [Command]` with the
    /// verbatim command in a bash fence, `### [Result]` with stdout in a
    /// plain fence, `### [Error Output]` with stderr (present only when
    /// stderr is non-empty), and finally `### [Exit Code]`. The other
    /// variants render as single-line error text.
    pub fn render(&self, command: &str) -> String {
        match self {
            Self::Completed {
                stdout,
                stderr,
                exit_code,
            } => {
                let mut output = format!("### [Command]\n```bash\n{}\n```\n\n", command);
                output.push_str(&format!("### [Result]\n```\n{}\n```\n\n", stdout));
                if !stderr.is_empty() {
                    output.push_str(&format!("### [Error Output]\n```\n{}\n```\n\n", stderr));
                }
                output.push_str(&format!("### [Exit Code]\n{}", exit_code));
                output
            }
            Self::EmptyCommand => "Error: No command provided".to_string(),
            Self::Blocked { pattern } => {
                format!("Error: Potentially dangerous command blocked: {}", pattern)
            }
            Self::TimedOut { timeout_secs } => {
                format!("Error: Command timed out after {} seconds", timeout_secs)
            }
            Self::Failed { message } => format!("Error executing command: {}", message),
        }
    }

    /// Whether a process ran to completion (regardless of exit code)
    pub fn completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// The execution seam every tool handler runs its plan through
///
/// Kept as a trait so handler sequencing can be exercised against a
/// recording stand-in without touching the operating system.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run one command string to completion (or refusal, timeout, failure)
    async fn run(
        &self,
        command: &str,
        working_dir: Option<&Path>,
        timeout_secs: u64,
    ) -> ExecutionOutcome;
}

/// Shell-backed command runner
///
/// Commands are handed to `sh -c` whole: pipes, redirects and globbing are
/// available to callers on purpose, since the tool categories compose
/// multi-stage pipelines. The denylist screen runs before anything spawns.
pub struct ShellExecutor {
    validator: CommandValidator,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellExecutor {
    /// Create an executor with the default denylist
    pub fn new() -> Self {
        Self {
            validator: CommandValidator::new(),
        }
    }

    /// Create an executor with a custom validator
    pub fn with_validator(validator: CommandValidator) -> Self {
        Self { validator }
    }

    /// Get a reference to the validator
    pub fn validator(&self) -> &CommandValidator {
        &self.validator
    }
}

#[async_trait]
impl CommandRunner for ShellExecutor {
    async fn run(
        &self,
        command: &str,
        working_dir: Option<&Path>,
        timeout_secs: u64,
    ) -> ExecutionOutcome {
        if command.is_empty() {
            return ExecutionOutcome::EmptyCommand;
        }

        if let Err(blocked) = self.validator.validate(command) {
            warn!("Command blocked: {}", blocked);
            return ExecutionOutcome::Blocked {
                pattern: blocked.pattern,
            };
        }

        let preview: String = command.chars().take(120).collect();
        info!("Executing: {}", preview);

        let mut process = TokioCommand::new("sh");
        process.arg("-c").arg(command);

        if let Some(dir) = working_dir {
            process.current_dir(dir);
        }

        process.stdout(std::process::Stdio::piped());
        process.stderr(std::process::Stdio::piped());

        let child = match process.spawn() {
            Ok(child) => child,
            Err(err) => {
                warn!("Failed to spawn: {}", err);
                return ExecutionOutcome::Failed {
                    message: err.to_string(),
                };
            }
        };

        // wait_with_output consumes the child; on timeout the handle is
        // dropped and the process is left to the OS, matching the contract
        // that a timeout only reports, never reaps.
        let output = match tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            child.wait_with_output(),
        )
        .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                return ExecutionOutcome::Failed {
                    message: err.to_string(),
                }
            }
            Err(_) => {
                warn!("Command timed out after {}s: {}", timeout_secs, preview);
                return ExecutionOutcome::TimedOut { timeout_secs };
            }
        };

        debug!("Command finished with status {:?}", output.status.code());

        ExecutionOutcome::Completed {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        }
    }
}

/// Run one command with the default timeout and render the outcome as a
/// report block, the shape every multi-stage tool handler emits per step.
pub async fn run_rendered(runner: &dyn CommandRunner, command: &str) -> String {
    runner
        .run(command, None, DEFAULT_TIMEOUT_SECS)
        .await
        .render(command)
}
