//! InterfaceController implementation - reads and changes hardware addresses.

use std::fmt;

use tracing::{debug, info, instrument, warn};

use macchanger_common::{
    shell::{self, shellquote},
    CommandRunner, MacChangerError, MacResult,
};

use crate::listing::{self, InterfaceEntry};

/// Administrative state of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Link is administratively down.
    Down,
    /// Link is administratively up.
    Up,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkState::Up => write!(f, "up"),
            LinkState::Down => write!(f, "down"),
        }
    }
}

/// Drives the `ip` command to inspect and change interface addresses.
///
/// Every operation is a straight sequence of external commands, each awaited
/// before the next one starts. Nothing is cached: each lookup re-runs the
/// listing command.
pub struct InterfaceController<R> {
    /// Executes the generated commands.
    runner: R,

    /// Path of the `ip` binary.
    ip_cmd: String,
}

impl<R: CommandRunner> InterfaceController<R> {
    /// Creates a controller that uses the default `ip` path.
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            ip_cmd: shell::IP_CMD.to_string(),
        }
    }

    /// Overrides the path of the `ip` binary.
    pub fn with_ip_cmd(mut self, ip_cmd: impl Into<String>) -> Self {
        self.ip_cmd = ip_cmd.into();
        self
    }

    /// Returns the underlying command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs `cmd` and turns a non-zero exit into an error.
    async fn exec_checked(&self, cmd: &str) -> MacResult<String> {
        self.runner.exec(cmd).await?.into_stdout(cmd)
    }

    /// Lists every interface in the order the kernel reports them.
    #[instrument(skip(self))]
    pub async fn list_interfaces(&self) -> MacResult<Vec<InterfaceEntry>> {
        let cmd = format!("{} address show", self.ip_cmd);
        let stdout = self.exec_checked(&cmd).await?;

        let entries = listing::parse_listing(&stdout);
        debug!("Parsed {} interfaces from listing", entries.len());
        Ok(entries)
    }

    /// Returns the current hardware address of `interface`.
    ///
    /// # Errors
    ///
    /// * `MacChangerError::InterfaceNotFound` - The interface is not listed or
    ///   has no hardware address
    /// * Any external command error from the listing command
    #[instrument(skip(self, interface), fields(iface = %interface))]
    pub async fn current_address(&self, interface: &str) -> MacResult<String> {
        let entries = self.list_interfaces().await?;

        listing::find_address(&entries, interface)
            .map(str::to_string)
            .ok_or_else(|| MacChangerError::interface_not_found(interface))
    }

    /// Sets the administrative state using `ip link set`.
    ///
    /// # Arguments
    ///
    /// * `interface` - The interface name (e.g., "eth0")
    /// * `state` - Target state
    #[instrument(skip(self, interface), fields(iface = %interface))]
    pub async fn set_link_state(&self, interface: &str, state: LinkState) -> MacResult<()> {
        let cmd = format!(
            "{} link set dev {} {}",
            self.ip_cmd,
            shellquote(interface),
            state
        );

        self.exec_checked(&cmd).await?;
        info!("Set admin status for {} to {}", interface, state);
        Ok(())
    }

    /// Brings the link down, assigns `address`, and brings it back up.
    ///
    /// A failing step stops the sequence and nothing is rolled back. If the
    /// address step fails the link stays down with its old address.
    #[instrument(skip(self, interface, address), fields(iface = %interface, mac = %address))]
    pub async fn set_address(&self, interface: &str, address: &str) -> MacResult<()> {
        self.set_link_state(interface, LinkState::Down).await?;

        let cmd = format!(
            "{} link set dev {} address {}",
            self.ip_cmd,
            shellquote(interface),
            shellquote(address)
        );
        if let Err(e) = self.exec_checked(&cmd).await {
            warn!(
                "Setting address for {} failed, link left down: {}",
                interface, e
            );
            return Err(e);
        }
        info!("Set MAC address {} on interface {}", address, interface);

        self.set_link_state(interface, LinkState::Up).await
    }

    /// Re-reads the address of `interface` and compares it with `expected`.
    ///
    /// The comparison is an exact, case-sensitive string match.
    #[instrument(skip(self, interface, expected), fields(iface = %interface, mac = %expected))]
    pub async fn verify(&self, interface: &str, expected: &str) -> MacResult<bool> {
        let actual = self.current_address(interface).await?;
        let matched = actual == expected;

        if !matched {
            warn!(
                "Address of {} is {} after change, expected {}",
                interface, actual, expected
            );
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macchanger_common::{ExecResult, MockCommandRunner};
    use mockall::Sequence;
    use pretty_assertions::assert_eq;

    const LISTING: &str = "\
1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536 qdisc noqueue state UNKNOWN group default qlen 1000
    link/loopback 00:00:00:00:00:00 brd 00:00:00:00:00:00
2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc fq_codel state UP group default qlen 1000
    link/ether aa:bb:cc:dd:ee:ff brd ff:ff:ff:ff:ff:ff
3: wlan0: <BROADCAST,MULTICAST> mtu 1500 qdisc noop state DOWN group default qlen 1000
    link/ether 3c:a9:f4:12:34:56 brd ff:ff:ff:ff:ff:ff";

    fn is_listing(cmd: &str) -> bool {
        cmd == "/sbin/ip address show"
    }

    fn is_link(cmd: &str, state: &str) -> bool {
        cmd == format!("/sbin/ip link set dev \"eth0\" {}", state)
    }

    fn is_set_address(cmd: &str) -> bool {
        cmd == "/sbin/ip link set dev \"eth0\" address \"00:11:22:33:44:55\""
    }

    fn listing_runner(times: usize, listing: &'static str) -> MockCommandRunner {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_exec()
            .withf(|cmd| is_listing(cmd))
            .times(times)
            .returning(move |_| Ok(ExecResult::ok(listing)));
        runner
    }

    #[test]
    fn test_link_state_display() {
        assert_eq!(LinkState::Up.to_string(), "up");
        assert_eq!(LinkState::Down.to_string(), "down");
    }

    #[tokio::test]
    async fn test_current_address() {
        let ctl = InterfaceController::new(listing_runner(1, LISTING));
        assert_eq!(ctl.current_address("eth0").await.unwrap(), "aa:bb:cc:dd:ee:ff");
    }

    #[tokio::test]
    async fn test_current_address_single_line_listing() {
        let sample = "2: eth0: <BROADCAST,MULTICAST,UP> mtu 1500 link/ether aa:bb:cc:dd:ee:ff brd ff:ff:ff:ff:ff:ff";
        let ctl = InterfaceController::new(listing_runner(1, sample));
        assert_eq!(ctl.current_address("eth0").await.unwrap(), "aa:bb:cc:dd:ee:ff");
    }

    #[tokio::test]
    async fn test_current_address_not_found() {
        let ctl = InterfaceController::new(listing_runner(1, LISTING));

        match ctl.current_address("eth9").await {
            Err(MacChangerError::InterfaceNotFound { interface }) => {
                assert_eq!(interface, "eth9");
            }
            other => panic!("Expected InterfaceNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_current_address_listing_fails() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_exec()
            .times(1)
            .returning(|_| Ok(ExecResult::failed(127, "sh: 1: /sbin/ip: not found")));

        let ctl = InterfaceController::new(runner);
        match ctl.current_address("eth0").await {
            Err(MacChangerError::ShellCommandFailed { exit_code, .. }) => {
                assert_eq!(exit_code, 127);
            }
            other => panic!("Expected ShellCommandFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_interfaces_order() {
        let ctl = InterfaceController::new(listing_runner(1, LISTING));
        let entries = ctl.list_interfaces().await.unwrap();

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["lo", "eth0", "wlan0"]);
    }

    #[tokio::test]
    async fn test_custom_ip_cmd() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_exec()
            .withf(|cmd| cmd.starts_with("/usr/bin/ip address show"))
            .times(1)
            .returning(|_| Ok(ExecResult::ok(LISTING)));

        let ctl = InterfaceController::new(runner).with_ip_cmd("/usr/bin/ip");
        assert_eq!(ctl.list_interfaces().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_set_address_sequence() {
        let mut runner = MockCommandRunner::new();
        let mut seq = Sequence::new();

        runner
            .expect_exec()
            .withf(|cmd| is_link(cmd, "down"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ExecResult::ok("")));
        runner
            .expect_exec()
            .withf(|cmd| is_set_address(cmd))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ExecResult::ok("")));
        runner
            .expect_exec()
            .withf(|cmd| is_link(cmd, "up"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ExecResult::ok("")));

        let ctl = InterfaceController::new(runner);
        ctl.set_address("eth0", "00:11:22:33:44:55").await.unwrap();
    }

    #[tokio::test]
    async fn test_set_address_failure_leaves_link_down() {
        let mut runner = MockCommandRunner::new();

        runner
            .expect_exec()
            .withf(|cmd| is_link(cmd, "down"))
            .times(1)
            .returning(|_| Ok(ExecResult::ok("")));
        runner
            .expect_exec()
            .withf(|cmd| is_set_address(cmd))
            .times(1)
            .returning(|_| {
                Ok(ExecResult::failed(
                    2,
                    "RTNETLINK answers: Cannot assign requested address",
                ))
            });
        runner
            .expect_exec()
            .withf(|cmd| is_link(cmd, "up"))
            .never();

        let ctl = InterfaceController::new(runner);
        let err = ctl
            .set_address("eth0", "00:11:22:33:44:55")
            .await
            .unwrap_err();
        assert!(matches!(err, MacChangerError::ShellCommandFailed { exit_code: 2, .. }));
    }

    #[tokio::test]
    async fn test_set_address_down_fails() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_exec()
            .withf(|cmd| is_link(cmd, "down"))
            .times(1)
            .returning(|_| Ok(ExecResult::failed(1, "Operation not permitted")));
        runner
            .expect_exec()
            .withf(|cmd| is_set_address(cmd) || is_link(cmd, "up"))
            .never();

        let ctl = InterfaceController::new(runner);
        assert!(ctl.set_address("eth0", "00:11:22:33:44:55").await.is_err());
    }

    #[tokio::test]
    async fn test_verify_after_change() {
        let after = "2: eth0: <BROADCAST,UP> mtu 1500\n    link/ether 00:11:22:33:44:55 brd ff:ff:ff:ff:ff:ff";
        let ctl = InterfaceController::new(listing_runner(2, after));

        assert_eq!(ctl.current_address("eth0").await.unwrap(), "00:11:22:33:44:55");
        assert!(ctl.verify("eth0", "00:11:22:33:44:55").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_stale_listing() {
        let ctl = InterfaceController::new(listing_runner(1, LISTING));
        assert!(!ctl.verify("eth0", "00:11:22:33:44:55").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_is_case_sensitive() {
        let ctl = InterfaceController::new(listing_runner(1, LISTING));
        assert!(!ctl.verify("eth0", "AA:BB:CC:DD:EE:FF").await.unwrap());
    }
}
