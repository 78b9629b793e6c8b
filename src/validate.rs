//! Input grammars for the update parameters.

use crate::error::Error;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // NB: unwraps are safe: constant patterns.
    static ref HOSTNAME: Regex = Regex::new(
        r"^(([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9])$"
    )
    .unwrap();
    static ref IPV4: Regex = Regex::new(
        r"^(([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])\.){3}([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])$"
    )
    .unwrap();
}

/// Dot separated alphanumeric labels. Hyphens may appear inside a label but never at either end.
///
/// # Errors
///
/// Returns [`Error::NotFQDN`] for anything else, including the empty string and names with a
/// trailing dot.
pub fn hostname(hostname: &str) -> Result<(), Error> {
    if HOSTNAME.is_match(hostname) {
        Ok(())
    } else {
        Err(Error::NotFQDN(hostname.to_string()))
    }
}

/// Four dotted-decimal octets in `0..=255`, without leading zeros.
///
/// # Errors
///
/// Returns [`Error::NotIP`] when `ip` doesn't match.
pub fn ipv4(ip: &str) -> Result<(), Error> {
    if IPV4.is_match(ip) {
        Ok(())
    } else {
        Err(Error::NotIP(ip.to_string()))
    }
}

/// Plain suffix match, not label aware: with `allowed.com` configured, `notallowed.com` passes.
///
/// # Errors
///
/// Returns [`Error::NoHost`] if `hostname` doesn't end with `domain`.
pub fn in_domain(hostname: &str, domain: &str) -> Result<(), Error> {
    if hostname.ends_with(domain) {
        Ok(())
    } else {
        Err(Error::NoHost(hostname.to_string()))
    }
}
