//! A [Google Cloud DNS][cloud-dns] implementation of the [`DnsProvider`][super::DnsProvider]
//! trait.
//!
//! Uses the `resourceRecordSets.list` and `changes.create` methods of the v1 REST API.
//!
//! [cloud-dns]: https://cloud.google.com/dns/docs/reference/v1
use crate::config::Config;
use crate::error::Error;
use crate::provider::token::TokenSource;
use crate::provider::{Change, DnsProvider, ResourceRecordSet};
use reqwest::{Response, Url};
use serde::Deserialize;

#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct CloudDnsProvider {
    client: reqwest::Client,
    api_base: String,
    token_source: TokenSource,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordSetsPage {
    #[serde(default)]
    rrsets: Vec<ResourceRecordSet>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudDnsProvider {
    #[must_use]
    pub fn new(api_base: impl Into<String>, token_source: TokenSource) -> Self {
        CloudDnsProvider {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            token_source,
        }
    }

    /// Use the configured static access token if there is one, the metadata server otherwise.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let token_source = match &config.access_token {
            Some(token) => TokenSource::Static(token.clone()),
            None => TokenSource::Metadata {
                url: config.metadata_url.clone(),
            },
        };
        Self::new(config.api_base.clone(), token_source)
    }

    fn zone_url(&self, project: &str, zone: &str, method: &str) -> Result<Url, Error> {
        let invalid = |reason: String| Error::InvalidSetting {
            name: crate::config::API_BASE_VAR,
            reason,
        };
        let mut url = Url::parse(&self.api_base).map_err(|err| invalid(format!("{err}")))?;
        url.path_segments_mut()
            .map_err(|()| invalid(format!("{} can't be a base URL", self.api_base)))?
            .pop_if_empty()
            .extend(["projects", project, "managedZones", zone, method]);
        Ok(url)
    }

    async fn success(resp: Response) -> Result<Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => envelope.error.message,
            Err(_) => body,
        };
        Err(Error::Provider { status, message })
    }
}

#[async_trait::async_trait]
impl DnsProvider for CloudDnsProvider {
    async fn list_record_sets(
        &self,
        project: &str,
        zone: &str,
    ) -> Result<Vec<ResourceRecordSet>, Error> {
        let token = self.token_source.token(&self.client).await?;
        let url = self.zone_url(project, zone, "rrsets")?;

        let mut record_sets = vec![];
        let mut page_token: Option<String> = None;
        loop {
            let mut req = self.client.get(url.clone()).bearer_auth(&token);
            if let Some(page_token) = &page_token {
                req = req.query(&[("pageToken", page_token)]);
            }
            let page: RecordSetsPage = Self::success(req.send().await?).await?.json().await?;
            record_sets.extend(page.rrsets);

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }
        tracing::debug!("listed {} record sets in {project}/{zone}", record_sets.len());
        Ok(record_sets)
    }

    async fn create_change(
        &self,
        project: &str,
        zone: &str,
        change: &Change,
    ) -> Result<Change, Error> {
        let token = self.token_source.token(&self.client).await?;
        let url = self.zone_url(project, zone, "changes")?;
        let resp = self
            .client
            .post(url)
            .bearer_auth(&token)
            .json(change)
            .send()
            .await?;
        let created: Change = Self::success(resp).await?.json().await?;
        tracing::debug!(
            "change {} in {project}/{zone} is {}",
            created.id.as_deref().unwrap_or("?"),
            created.status.as_deref().unwrap_or("unknown")
        );
        Ok(created)
    }
}
