//! Change the hardware (MAC) address of a network interface.
//!
//! This crate implements the `macchanger` tool, which drives the `ip`
//! command to read, change and verify interface addresses.
//!
//! # Responsibilities
//!
//! - Read interface addresses via `ip address show`
//! - Set admin status via `ip link set dev <if> up|down`
//! - Set the address via `ip link set dev <if> address <mac>`
//! - Re-read the address to verify the change
//!
//! # Commands issued for a change
//!
//! | Step | Command |
//! |------|---------|
//! | lookup | `ip address show` |
//! | down | `ip link set dev <if> down` |
//! | set | `ip link set dev <if> address <mac>` |
//! | up | `ip link set dev <if> up` |
//! | verify | `ip address show` |
//!
//! # Example
//!
//! ```ignore
//! use macchanger::InterfaceController;
//! use macchanger_common::ShellRunner;
//!
//! let ctl = InterfaceController::new(ShellRunner::default());
//! ctl.set_address("eth0", "02:00:00:00:00:01").await?;
//! assert!(ctl.verify("eth0", "02:00:00:00:00:01").await?);
//! ```

mod app;
mod cli;
mod controller;
mod listing;
mod privilege;

pub use app::{run, run_cli, Status};
pub use cli::{normalize_args, Args, Mode, RunConfig, PAIRING_MESSAGE};
pub use controller::{InterfaceController, LinkState};
pub use listing::{find_address, parse_listing, InterfaceEntry};
pub use privilege::{is_privileged, ROOT_REQUIRED_MESSAGE};
