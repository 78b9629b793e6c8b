//! OAuth access tokens for the Cloud DNS API.
//!
//! Platform authentication is ambient: on Google Cloud the instance metadata server hands out
//! tokens for the attached service account. A fixed token can be configured instead for running
//! elsewhere.

use crate::error::Error;
use serde::Deserialize;

const METADATA_FLAVOR: (&str, &str) = ("Metadata-Flavor", "Google");

#[derive(Clone, PartialEq, Eq)]
pub enum TokenSource {
    Static(String),
    Metadata { url: String },
}

#[derive(Deserialize)]
struct MetadataToken {
    access_token: String,
}

impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Static(_) => f.write_str("Static(<REDACTED>)"),
            TokenSource::Metadata { url } => f.debug_struct("Metadata").field("url", url).finish(),
        }
    }
}

impl TokenSource {
    /// Fetch a bearer token. Nothing is cached, every call to the metadata server is fresh.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the metadata server is unreachable and [`Error::Token`] if it
    /// answers with an error or an unexpected body.
    pub async fn token(&self, client: &reqwest::Client) -> Result<String, Error> {
        match self {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::Metadata { url } => {
                let resp = client
                    .get(url)
                    .header(METADATA_FLAVOR.0, METADATA_FLAVOR.1)
                    .send()
                    .await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(Error::Token(format!("metadata server returned {status}")));
                }
                let token: MetadataToken = resp
                    .json()
                    .await
                    .map_err(|err| Error::Token(format!("{err}")))?;
                Ok(token.access_token)
            }
        }
    }
}
