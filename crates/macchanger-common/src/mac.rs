//! MAC address type with strict parsing and formatting.

use std::fmt;
use std::str::FromStr;

use crate::error::MacChangerError;

/// A 48-bit Ethernet MAC address.
///
/// Only the colon-separated form accepted by `ip link set ... address` is
/// parsed: six groups of exactly two hexadecimal digits, either case.
///
/// # Examples
///
/// ```
/// use macchanger_common::MacAddress;
///
/// let mac: MacAddress = "00:1A:2b:33:44:55".parse().unwrap();
/// assert_eq!(mac.to_string(), "00:1a:2b:33:44:55");
///
/// assert!("00-11-22-33-44-55".parse::<MacAddress>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Returns true if this is a multicast address.
    ///
    /// A multicast address has the least significant bit of the first octet set.
    /// The kernel refuses to assign one to an Ethernet link.
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddress {
    type Err = MacChangerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MacChangerError::InvalidMacAddress(s.to_string());

        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(invalid());
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            // from_str_radix alone would accept "+f" and single digits
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            bytes[i] = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }

        Ok(MacAddress(bytes))
    }
}
