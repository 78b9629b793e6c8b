//! DNS provider access.
//!
//! The [reconciler][crate::reconcile] needs exactly two operations from a provider: list every
//! record set in a managed zone, and atomically apply a [`Change`] made of deletions and
//! additions to that zone.
//!
//! Two implementations are provided, [`cloud_dns::CloudDnsProvider`] speaking to the Google Cloud
//! DNS v1 REST API, and [`memory::InMemoryProvider`] which keeps zones in process memory.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod cloud_dns;
pub mod memory;
pub mod token;

#[allow(clippy::module_name_repetitions)]
pub use cloud_dns::CloudDnsProvider;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryProvider;

/// Record type for IPv4 address records.
pub const A: &str = "A";
/// Record type for aliases, which may not share a name with any other record set.
pub const CNAME: &str = "CNAME";

/// `DynProvider` is a type alias for a [`DnsProvider`] shared between request handlers.
#[allow(clippy::module_name_repetitions)]
pub type DynProvider = Arc<dyn DnsProvider + Send + Sync>;

/// A provider record set: every record of one type at one name.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecordSet {
    /// Fully qualified, with a trailing dot.
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub rrdatas: Vec<String>,
}

impl ResourceRecordSet {
    /// A single value `A` record set.
    #[must_use]
    pub fn a(name: &str, ttl: u32, ip: &str) -> Self {
        ResourceRecordSet {
            name: name.to_string(),
            record_type: A.to_string(),
            ttl,
            rrdatas: vec![ip.to_string()],
        }
    }

    #[must_use]
    pub fn is_cname(&self) -> bool {
        self.record_type == CNAME
    }
}

/// An atomic set of deletions and additions to apply to a zone.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additions: Vec<ResourceRecordSet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deletions: Vec<ResourceRecordSet>,
    /// Assigned by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Assigned by the provider, e.g. `pending` or `done`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// An async trait describing the two DNS provider operations the
/// [reconciler][crate::reconcile::reconcile] relies on.
#[async_trait::async_trait]
pub trait DnsProvider {
    /// Every record set in the managed zone.
    async fn list_record_sets(
        &self,
        project: &str,
        zone: &str,
    ) -> Result<Vec<ResourceRecordSet>, Error>;

    /// Apply all of the change's deletions and additions together, or none of them.
    async fn create_change(&self, project: &str, zone: &str, change: &Change)
        -> Result<Change, Error>;
}
