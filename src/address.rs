// src/address.rs

//! Dotted-decimal IPv4 validation for the job's target address.
//!
//! `std::net::Ipv4Addr` rejects octets with leading zeros ("010"), which the
//! scheduler UI has always accepted, so the check is a plain pattern instead.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{Result, SwitchcmdError};

static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    let octet = r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";
    Regex::new(&format!(r"\A{octet}\.{octet}\.{octet}\.{octet}\z"))
        .expect("IPv4 pattern is a valid regex")
});

/// True if `s` is exactly four dot-separated groups of 1-3 digits, each in 0..=255.
pub fn is_valid_ipv4(s: &str) -> bool {
    IPV4.is_match(s)
}

/// Like [`is_valid_ipv4`], but as a `Result` for `?` call sites.
pub fn validate_ipv4(s: &str) -> Result<()> {
    if is_valid_ipv4(s) {
        Ok(())
    } else {
        Err(SwitchcmdError::InvalidAddress(s.to_string()))
    }
}
