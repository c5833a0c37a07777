//! Command line arguments and the validated run configuration.

use std::ffi::OsString;
use std::time::Duration;

use clap::Parser;
use tracing::warn;

use macchanger_common::{shell, MacAddress, MacChangerError, MacResult};

use crate::privilege;

/// Message for `--interface` / `--mac` given on their own.
pub const PAIRING_MESSAGE: &str = "Options --interface and --mac must be given together.";

/// Rewrites the legacy `-si` spelling to `--show-info`.
///
/// clap reads `-si` as `-s` followed by `-i` without a value.
pub fn normalize_args<I, T>(argv: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    argv.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if arg == "-si" {
                OsString::from("--show-info")
            } else {
                arg
            }
        })
        .collect()
}

/// Change the MAC address of a network interface
#[derive(Parser, Debug, Clone)]
#[command(name = "macchanger")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Interface to change the MAC address of
    #[arg(short = 'i', long)]
    pub interface: Option<String>,

    /// New MAC address, XX:XX:XX:XX:XX:XX (requires --interface)
    #[arg(short = 'm', long)]
    pub mac: Option<String>,

    /// Show the interfaces and their MAC addresses (also accepted as -si)
    #[arg(short = 's', long = "show-info", alias = "show_info")]
    pub show_info: bool,

    /// Path to the ip command
    #[arg(long, env = "MACCHANGER_IP_CMD", default_value = shell::IP_CMD)]
    pub ip_cmd: String,

    /// Timeout for each external command in seconds
    #[arg(
        long,
        env = "MACCHANGER_TIMEOUT",
        default_value = "10",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Do not require root privileges before changing an address
    #[arg(long)]
    pub skip_root_check: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "MACCHANGER_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Returns the per-command timeout.
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Assign `mac` to `interface` and verify it.
    Change {
        /// Interface name.
        interface: String,
        /// Target address in lower-case colon form.
        mac: String,
    },
    /// Print every interface with its address.
    ShowInfo,
}

impl TryFrom<&Args> for Mode {
    type Error = MacChangerError;

    /// Validates the flag combination. A requested change takes precedence
    /// over `--show-info`.
    fn try_from(args: &Args) -> MacResult<Self> {
        // An empty value counts as not given
        let interface = args.interface.as_deref().filter(|v| !v.is_empty());
        let mac = args.mac.as_deref().filter(|v| !v.is_empty());

        match (interface, mac) {
            (Some(interface), Some(mac)) => {
                let parsed: MacAddress = mac.parse()?;
                if parsed.is_multicast() {
                    warn!("{} is a multicast address, the kernel will likely reject it", parsed);
                }
                Ok(Mode::Change {
                    interface: interface.to_string(),
                    mac: parsed.to_string(),
                })
            }
            (Some(_), None) | (None, Some(_)) => {
                Err(MacChangerError::invalid_arguments(PAIRING_MESSAGE))
            }
            (None, None) if args.show_info => Ok(Mode::ShowInfo),
            (None, None) => Err(MacChangerError::NoAction),
        }
    }
}

/// Validated configuration handed to [`crate::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Selected mode.
    pub mode: Mode,
    /// Path of the `ip` binary.
    pub ip_cmd: String,
    /// Refuse to change an address without root privileges.
    pub require_root: bool,
    /// Whether the process runs with an effective uid of 0.
    pub privileged: bool,
}

impl RunConfig {
    /// Builds the configuration from parsed arguments.
    ///
    /// No external command is run here. The effective uid is sampled but
    /// only enforced when a change runs.
    pub fn from_args(args: &Args) -> MacResult<Self> {
        Ok(Self {
            mode: Mode::try_from(args)?,
            ip_cmd: args.ip_cmd.clone(),
            require_root: !args.skip_root_check,
            privileged: privilege::is_privileged(),
        })
    }
}
