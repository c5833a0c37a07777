//! Parser for `ip address show` output.
//!
//! This is the only place that looks at raw command text. The output is a
//! sequence of records, each opened by a header line such as
//!
//! ```text
//! 2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc fq_codel state UP
//!     link/ether aa:bb:cc:dd:ee:ff brd ff:ff:ff:ff:ff:ff
//! ```
//!
//! The hardware address of an interface is the first whitespace-delimited
//! `XX:XX:XX:XX:XX:XX` token inside its own record. A search never runs into
//! the next record, so an interface without a link-layer address (`link/none`)
//! cannot borrow its neighbour's.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<index>: <name>[@<peer>]: <FLAGS>` at the start of a line.
static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*\d+:[ \t]+([^\s:@]+)(?:@[^\s:]+)?:[ \t]+<")
        .expect("Invalid regex pattern")
});

/// Hex digits only; `\w` would also accept tokens such as `zz:zz:zz:zz:zz:zz`.
static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)([0-9a-fA-F]{2}(?::[0-9a-fA-F]{2}){5})(?:\s|$)")
        .expect("Invalid regex pattern")
});

/// One interface as reported by the listing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceEntry {
    /// Interface name without any `@peer` suffix.
    pub name: String,
    /// Current hardware address, verbatim from the output.
    pub address: Option<String>,
}

/// Splits listing text into one entry per interface header, in text order.
pub fn parse_listing(text: &str) -> Vec<InterfaceEntry> {
    let headers: Vec<_> = HEADER_RE.captures_iter(text).collect();

    headers
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let header = caps.get(0)?;
            let record_end = headers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |m| m.start());
            let record = &text[header.end()..record_end];

            Some(InterfaceEntry {
                name: caps[1].to_string(),
                address: ADDRESS_RE.captures(record).map(|c| c[1].to_string()),
            })
        })
        .collect()
}

/// Returns the address of the interface named exactly `name`.
pub fn find_address<'a>(entries: &'a [InterfaceEntry], name: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.name == name)
        .and_then(|entry| entry.address.as_deref())
}
