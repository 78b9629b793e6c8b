//! Bring a zone's `A` record for one hostname in line with a requested address.

use crate::error::Error;
use crate::provider::{Change, DnsProvider, ResourceRecordSet};

/// TTL of every record set written by [`reconcile`].
pub const TTL: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The record already points at the requested address, nothing was written.
    NoChangeNeeded,
    /// A change replacing (or creating) the record was accepted by the provider.
    Applied,
}

/// List the zone, and unless `hostname` already resolves to `ip` submit one change deleting the
/// existing record set (if any) and adding `{hostname, A, 60, [ip]}`.
///
/// `hostname` must be fully qualified with its trailing dot. Only the first record set with that
/// exact name is considered, whatever its type, and its first value is compared to `ip` as a
/// plain string.
///
/// # Errors
///
/// Returns whatever error the provider returns from either call.
pub async fn reconcile<P>(
    provider: &P,
    project: &str,
    zone: &str,
    hostname: &str,
    ip: &str,
) -> Result<Outcome, Error>
where
    P: DnsProvider + ?Sized,
{
    let record_sets = provider.list_record_sets(project, zone).await?;

    let mut matching = record_sets
        .into_iter()
        .filter(|rrs| rrs.name == hostname);
    let found = matching.next();
    let duplicates = matching.count();
    if duplicates > 0 {
        tracing::warn!("{duplicates} additional record sets named {hostname} ignored");
    }

    if let Some(existing) = &found {
        if existing.rrdatas.first().map(String::as_str) == Some(ip) {
            return Ok(Outcome::NoChangeNeeded);
        }
    }

    let change = Change {
        additions: vec![ResourceRecordSet::a(hostname, TTL, ip)],
        deletions: found.into_iter().collect(),
        ..Change::default()
    };
    provider.create_change(project, zone, &change).await?;
    Ok(Outcome::Applied)
}
