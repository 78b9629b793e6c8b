//! An in-memory implementation of the [`DnsProvider`][super::DnsProvider] trait.
//!
//! Zones live only as long as the process. Changes are validated the way Cloud DNS validates
//! them: a deletion must match an existing record set exactly, and an addition may not collide
//! with a record set of the same name and type that is left in place. A `CNAME` can't share its
//! name with any other record set.
use crate::error::Error;
use crate::provider::{Change, DnsProvider, ResourceRecordSet};
use reqwest::StatusCode;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default, Debug)]
pub struct InMemoryProvider {
    zones: RwLock<HashMap<String, Vec<ResourceRecordSet>>>,
    changes: RwLock<Vec<Change>>,
}

fn zone_key(project: &str, zone: &str) -> String {
    format!("{project}/{zone}")
}

impl InMemoryProvider {
    /// Create a provider holding one managed zone with the given record sets.
    #[must_use]
    pub fn with_zone(project: &str, zone: &str, record_sets: Vec<ResourceRecordSet>) -> Self {
        InMemoryProvider {
            zones: RwLock::new(HashMap::from([(zone_key(project, zone), record_sets)])),
            changes: RwLock::default(),
        }
    }

    /// Every change applied so far, oldest first.
    pub async fn changes(&self) -> Vec<Change> {
        self.changes.read().await.clone()
    }

    /// Current record sets of a zone, or `None` if the zone doesn't exist.
    pub async fn record_sets(&self, project: &str, zone: &str) -> Option<Vec<ResourceRecordSet>> {
        self.zones.read().await.get(&zone_key(project, zone)).cloned()
    }
}

fn zone_not_found(project: &str, zone: &str) -> Error {
    Error::Provider {
        status: StatusCode::NOT_FOUND,
        message: format!("The 'parameters.managedZone' resource named '{zone}' does not exist in project '{project}'."),
    }
}

#[async_trait::async_trait]
impl DnsProvider for InMemoryProvider {
    async fn list_record_sets(
        &self,
        project: &str,
        zone: &str,
    ) -> Result<Vec<ResourceRecordSet>, Error> {
        self.record_sets(project, zone)
            .await
            .ok_or_else(|| zone_not_found(project, zone))
    }

    async fn create_change(
        &self,
        project: &str,
        zone: &str,
        change: &Change,
    ) -> Result<Change, Error> {
        let mut zones = self.zones.write().await;
        let current = zones
            .get(&zone_key(project, zone))
            .ok_or_else(|| zone_not_found(project, zone))?;

        // Work on a copy so a rejected change leaves the zone untouched.
        let mut next = current.clone();
        for deletion in &change.deletions {
            match next.iter().position(|rrs| rrs == deletion) {
                Some(idx) => {
                    next.remove(idx);
                }
                None => {
                    return Err(Error::Provider {
                        status: StatusCode::PRECONDITION_FAILED,
                        message: format!(
                            "Precondition not met for 'entity.change.deletions[{}]'",
                            deletion.name
                        ),
                    })
                }
            }
        }
        for addition in &change.additions {
            if let Some(clash) = next
                .iter()
                .find(|rrs| rrs.name == addition.name && rrs.is_cname() != addition.is_cname())
            {
                return Err(Error::Provider {
                    status: StatusCode::BAD_REQUEST,
                    message: format!(
                        "The resource record set 'entity.change.additions[{}]' is invalid because \
                         a {} record set with the same name already exists",
                        addition.name, clash.record_type
                    ),
                });
            }
            if next
                .iter()
                .any(|rrs| rrs.name == addition.name && rrs.record_type == addition.record_type)
            {
                return Err(Error::Provider {
                    status: StatusCode::CONFLICT,
                    message: format!(
                        "The resource 'entity.change.additions[{}]' named '{} ({})' already exists",
                        addition.name, addition.name, addition.record_type
                    ),
                });
            }
            next.push(addition.clone());
        }
        zones.insert(zone_key(project, zone), next);

        let mut changes = self.changes.write().await;
        let applied = Change {
            id: Some(changes.len().to_string()),
            status: Some("done".to_string()),
            ..change.clone()
        };
        changes.push(applied.clone());
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_zone() {
        let provider = InMemoryProvider::default();
        let err = provider.list_record_sets("p", "z").await.unwrap_err();
        assert!(matches!(err, Error::Provider { status: StatusCode::NOT_FOUND, .. }));
    }

    #[tokio::test]
    async fn replace_is_atomic() {
        let old = ResourceRecordSet::a("host.example.com.", 60, "1.2.3.4");
        let provider = InMemoryProvider::with_zone("p", "z", vec![old.clone()]);

        // Deleting a stale copy fails, and the addition isn't applied either.
        let stale = ResourceRecordSet::a("host.example.com.", 60, "9.9.9.9");
        let change = Change {
            deletions: vec![stale],
            additions: vec![ResourceRecordSet::a("host.example.com.", 60, "5.6.7.8")],
            ..Change::default()
        };
        let err = provider.create_change("p", "z", &change).await.unwrap_err();
        assert!(matches!(err, Error::Provider { status: StatusCode::PRECONDITION_FAILED, .. }));
        assert_eq!(provider.record_sets("p", "z").await.unwrap(), vec![old.clone()]);
        assert!(provider.changes().await.is_empty());

        let change = Change {
            deletions: vec![old],
            additions: vec![ResourceRecordSet::a("host.example.com.", 60, "5.6.7.8")],
            ..Change::default()
        };
        let applied = provider.create_change("p", "z", &change).await.unwrap();
        assert_eq!(applied.status.as_deref(), Some("done"));
        assert_eq!(
            provider.record_sets("p", "z").await.unwrap(),
            vec![ResourceRecordSet::a("host.example.com.", 60, "5.6.7.8")]
        );
        assert_eq!(provider.changes().await.len(), 1);
    }

    #[tokio::test]
    async fn a_next_to_cname() {
        let cname = ResourceRecordSet {
            name: "host.example.com.".to_string(),
            record_type: "CNAME".to_string(),
            ttl: 300,
            rrdatas: vec!["x.example.net.".to_string()],
        };
        let provider = InMemoryProvider::with_zone("p", "z", vec![cname.clone()]);
        let change = Change {
            additions: vec![ResourceRecordSet::a("host.example.com.", 60, "1.2.3.4")],
            ..Change::default()
        };
        let err = provider.create_change("p", "z", &change).await.unwrap_err();
        assert!(matches!(err, Error::Provider { status: StatusCode::BAD_REQUEST, .. }));
        assert_eq!(provider.record_sets("p", "z").await.unwrap(), vec![cname.clone()]);

        // Replacing the CNAME in one change is fine.
        let change = Change {
            deletions: vec![cname],
            ..change
        };
        provider.create_change("p", "z", &change).await.unwrap();
        assert_eq!(
            provider.record_sets("p", "z").await.unwrap(),
            vec![ResourceRecordSet::a("host.example.com.", 60, "1.2.3.4")]
        );
    }

    #[tokio::test]
    async fn addition_conflict() {
        let existing = ResourceRecordSet::a("host.example.com.", 60, "1.2.3.4");
        let provider = InMemoryProvider::with_zone("p", "z", vec![existing]);
        let change = Change {
            additions: vec![ResourceRecordSet::a("host.example.com.", 300, "5.6.7.8")],
            ..Change::default()
        };
        let err = provider.create_change("p", "z", &change).await.unwrap_err();
        assert!(matches!(err, Error::Provider { status: StatusCode::CONFLICT, .. }));
    }
}
