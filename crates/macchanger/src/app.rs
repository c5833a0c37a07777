//! Run entry points: configuration in, user-facing report and exit status out.
//!
//! Contract messages go to the provided writer (stdout in the binary).
//! Errors go to stderr. Nothing in here exits the process.

use std::io::Write;
use std::process::ExitCode;

use tracing::{debug, info};

use macchanger_common::{CommandRunner, MacChangerError, MacResult};

use crate::cli::{Args, Mode, RunConfig};
use crate::controller::InterfaceController;
use crate::privilege;

/// Outcome of one invocation, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The requested mode ran to completion. A verification mismatch still
    /// counts as success.
    Success,
    /// Lookup, external command or privilege failure.
    Failure,
    /// Invalid flag combination or malformed address.
    Usage,
    /// Nothing was requested.
    NoAction,
}

impl Status {
    /// Returns the process exit code.
    pub fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::Failure => 1,
            Status::Usage => 2,
            Status::NoAction => 255,
        }
    }

    fn from_error(err: &MacChangerError) -> Self {
        match err {
            MacChangerError::NoAction => Status::NoAction,
            e if e.is_usage_error() => Status::Usage,
            _ => Status::Failure,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}

/// Validates `args` and runs the selected mode.
///
/// A usage error returns before `runner` is ever called.
pub async fn run_cli<R, W>(args: &Args, runner: R, out: &mut W) -> Status
where
    R: CommandRunner,
    W: Write,
{
    let config = match RunConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => return report(&e, out),
    };

    let controller = InterfaceController::new(runner).with_ip_cmd(config.ip_cmd.clone());
    run(&config, &controller, out).await
}

/// Runs one validated configuration against `controller`.
pub async fn run<R, W>(
    config: &RunConfig,
    controller: &InterfaceController<R>,
    out: &mut W,
) -> Status
where
    R: CommandRunner,
    W: Write,
{
    let result = match &config.mode {
        Mode::Change { interface, mac } => {
            if config.require_root {
                if let Err(e) = privilege::ensure_privileged(config.privileged) {
                    return report(&e, out);
                }
            }
            change_address(controller, interface, mac, out).await
        }
        Mode::ShowInfo => show_info(controller, out).await,
    };

    match result {
        Ok(()) => Status::Success,
        Err(e) => report(&e, out),
    }
}

/// Reads the old address, applies the new one and reports the verification.
async fn change_address<R, W>(
    controller: &InterfaceController<R>,
    interface: &str,
    mac: &str,
    out: &mut W,
) -> MacResult<()>
where
    R: CommandRunner,
    W: Write,
{
    let old = controller.current_address(interface).await?;
    writeln!(out, "The MAC address before changed is {}.", old)?;
    writeln!(out, "[+] MAC address for '{}' gets altered to {}.", interface, mac)?;

    controller.set_address(interface, mac).await?;

    if controller.verify(interface, mac).await? {
        info!("Changed MAC address of {} from {} to {}", interface, old, mac);
        writeln!(out, "[+] MAC was successfully changed to {}.", mac)?;
    } else {
        writeln!(out, "[-] MAC address could not be changed!")?;
    }
    Ok(())
}

/// Prints the interface table.
async fn show_info<R, W>(controller: &InterfaceController<R>, out: &mut W) -> MacResult<()>
where
    R: CommandRunner,
    W: Write,
{
    let entries = controller.list_interfaces().await?;

    writeln!(out, "Interfaces:\tMAC Addresses:")?;
    writeln!(out, "-----------\t--------------")?;
    for entry in &entries {
        writeln!(
            out,
            "{}\t\t{}",
            entry.name,
            entry.address.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}

/// Shows `err` to the user and maps it to a status.
fn report<W: Write>(err: &MacChangerError, out: &mut W) -> Status {
    debug!(error = ?err, "Run failed");

    let status = Status::from_error(err);
    match status {
        // Hint goes to stdout, matching `--help` output
        Status::NoAction => {
            let _ = writeln!(out, "{}", err);
        }
        Status::Usage => {
            eprintln!("error: {}", err);
            eprintln!("{}", MacChangerError::NoAction);
        }
        _ => eprintln!("[-] {}", err),
    }
    status
}
