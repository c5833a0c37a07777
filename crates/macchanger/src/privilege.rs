//! Root privilege check.

use nix::unistd::geteuid;

use macchanger_common::{MacChangerError, MacResult};

/// Message shown when a change is attempted without privileges.
pub const ROOT_REQUIRED_MESSAGE: &str = "You need to have root privileges. Program halted.";

/// Returns true when running with an effective uid of 0.
pub fn is_privileged() -> bool {
    geteuid().is_root()
}

/// Fails with [`MacChangerError::PermissionDenied`] unless `privileged`.
///
/// The caller samples [`is_privileged`] once and passes the result in.
pub fn ensure_privileged(privileged: bool) -> MacResult<()> {
    if privileged {
        Ok(())
    } else {
        Err(MacChangerError::permission_denied(ROOT_REQUIRED_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_privileged() {
        assert!(ensure_privileged(true).is_ok());
    }

    #[test]
    fn test_unprivileged_denied() {
        match ensure_privileged(false) {
            Err(err @ MacChangerError::PermissionDenied { .. }) => {
                assert_eq!(err.to_string(), ROOT_REQUIRED_MESSAGE);
            }
            other => panic!("Expected PermissionDenied, got {:?}", other),
        }
    }
}
