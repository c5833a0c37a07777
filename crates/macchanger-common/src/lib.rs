//! Common infrastructure for the macchanger tool.
//!
//! - [`shell`]: Safe shell command execution with proper quoting, plus the
//!   [`CommandRunner`] seam the controller is generic over
//! - [`error`]: Error types shared by every layer
//! - [`MacAddress`]: Strictly parsed 48-bit hardware address
//!
//! # Example
//!
//! ```ignore
//! use macchanger_common::{
//!     shell::{IP_CMD, shellquote},
//!     CommandRunner, MacResult, ShellRunner,
//! };
//!
//! async fn link_down(iface: &str) -> MacResult<()> {
//!     let cmd = format!("{} link set dev {} down", IP_CMD, shellquote(iface));
//!     ShellRunner::default().exec(&cmd).await?.into_stdout(&cmd)?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod mac;
pub mod shell;

// Re-export commonly used items at crate root
pub use error::{MacChangerError, MacResult};
pub use mac::MacAddress;
pub use shell::{CommandRunner, ExecResult, ShellRunner};

#[cfg(any(test, feature = "mock"))]
pub use shell::MockCommandRunner;
