//! Shell command execution utilities.
//!
//! Every interaction with the host network stack goes through the `ip`
//! command. Arguments are quoted with [`shellquote`] so an interface name
//! taken from the command line cannot inject extra shell syntax.
//!
//! # Example
//!
//! ```ignore
//! use macchanger_common::shell::{CommandRunner, ShellRunner, IP_CMD, shellquote};
//!
//! let cmd = format!("{} link set dev {} down", IP_CMD, shellquote("eth0"));
//! ShellRunner::default().exec(&cmd).await?.into_stdout(&cmd)?;
//! ```

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::{MacChangerError, MacResult};

/// Path to the `ip` command for network interface configuration.
pub const IP_CMD: &str = "/sbin/ip";

/// Default limit for a single external command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Regex for characters that need escaping in shell double-quotes.
/// Matches: $, `, ", \, and newline
static SHELL_ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([$`"\\\n])"#).expect("Invalid regex pattern"));

/// Quotes a string for safe use in shell commands.
///
/// Wraps the string in double quotes and escapes `$`, `` ` ``, `"`, `\` and
/// newline.
///
/// # Example
///
/// ```
/// use macchanger_common::shell::shellquote;
///
/// assert_eq!(shellquote("eth0"), "\"eth0\"");
/// assert_eq!(shellquote("with$var"), "\"with\\$var\"");
/// ```
pub fn shellquote(s: &str) -> String {
    let escaped = SHELL_ESCAPE_RE.replace_all(s, r"\$1");
    format!("\"{}\"", escaped)
}

/// Result of a shell command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// The exit code of the command (0 = success).
    pub exit_code: i32,
    /// The captured stdout output.
    pub stdout: String,
    /// The captured stderr output.
    pub stderr: String,
}

impl ExecResult {
    /// Builds a successful result carrying `stdout`.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Builds a failed result with the given exit code and stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Returns true if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Returns the combined output (stdout + stderr) for error messages.
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }

    /// Converts a non-zero exit into [`MacChangerError::ShellCommandFailed`].
    ///
    /// # Arguments
    ///
    /// * `command` - The command that produced this result, for the error message
    pub fn into_stdout(self, command: &str) -> MacResult<String> {
        if self.success() {
            Ok(self.stdout)
        } else {
            Err(MacChangerError::ShellCommandFailed {
                command: command.to_string(),
                exit_code: self.exit_code,
                output: self.combined_output(),
            })
        }
    }
}

/// Executes a shell command, waiting at most `timeout` for it to finish.
///
/// The command runs through `/bin/sh -c`. A command that overruns the limit
/// is killed and reported as [`MacChangerError::CommandTimeout`].
///
/// # Returns
///
/// * `Ok(ExecResult)` - The command ran to completion (any exit code)
/// * `Err(MacChangerError)` - The command could not be spawned or timed out
pub async fn exec(cmd: &str, timeout: Duration) -> MacResult<ExecResult> {
    tracing::debug!(command = %cmd, "Executing shell command");

    let mut command = Command::new("/bin/sh");
    command
        .arg("-c")
        .arg(cmd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = tokio::time::timeout(timeout, command.output())
        .await
        .map_err(|_| MacChangerError::CommandTimeout {
            command: cmd.to_string(),
            timeout,
        })?
        .map_err(|e| MacChangerError::ShellExec {
            command: cmd.to_string(),
            source: e,
        })?;

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    let result = ExecResult {
        exit_code,
        stdout,
        stderr,
    };

    if result.success() {
        tracing::trace!(command = %cmd, exit_code = exit_code, "Command succeeded");
    } else {
        tracing::warn!(
            command = %cmd,
            exit_code = exit_code,
            stderr = %result.stderr,
            "Command failed"
        );
    }

    Ok(result)
}

/// Seam between the interface controller and the host.
///
/// Production code uses [`ShellRunner`]; tests substitute a mock so no
/// command ever reaches the real network stack.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `cmd` to completion and returns its captured output.
    async fn exec(&self, cmd: &str) -> MacResult<ExecResult>;
}

/// [`CommandRunner`] that spawns real processes through `/bin/sh`.
#[derive(Debug, Clone, Copy)]
pub struct ShellRunner {
    timeout: Duration,
}

impl ShellRunner {
    /// Creates a runner that gives each command at most `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Returns the per-command limit.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn exec(&self, cmd: &str) -> MacResult<ExecResult> {
        exec(cmd, self.timeout).await
    }
}
