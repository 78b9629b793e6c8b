use crate::error::Error;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;

pub type SharedConfig = Arc<Config>;

pub const USERNAME_VAR: &str = "MRW_USERNAME";
pub const PASSWORD_VAR: &str = "MRW_PASSWORD";
pub const PROJECT_VAR: &str = "MRW_PROJECT";
pub const ZONE_VAR: &str = "MRW_ZONE";
pub const DOMAIN_VAR: &str = "MRW_DOMAIN";
pub const BIND_ADDR_VAR: &str = "MRW_BIND_ADDR";
pub const PORT_VAR: &str = "PORT";
pub const API_BASE_VAR: &str = "MRW_API_BASE";
pub const ACCESS_TOKEN_VAR: &str = "MRW_ACCESS_TOKEN";
pub const METADATA_URL_VAR: &str = "MRW_METADATA_URL";

pub const DEFAULT_API_BASE: &str = "https://dns.googleapis.com/dns/v1";
pub const DEFAULT_METADATA_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";
const DEFAULT_PORT: u16 = 8080;

#[derive(Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub username: String,
    pub password: String,
    pub project: String,
    pub zone: String,
    pub domain: String,
    pub bind_addr: SocketAddr,
    pub api_base: String,
    pub access_token: Option<String>,
    pub metadata_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            username: String::default(),
            password: String::default(),
            project: String::default(),
            zone: String::default(),
            domain: String::default(),
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            api_base: DEFAULT_API_BASE.to_string(),
            access_token: None,
            metadata_url: DEFAULT_METADATA_URL.to_string(),
        }
    }
}

// Password and token stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("project", &self.project)
            .field("zone", &self.zone)
            .field("domain", &self.domain)
            .field("bind_addr", &self.bind_addr)
            .field("api_base", &self.api_base)
            .field("access_token", &self.access_token.as_ref().map(|_| "<REDACTED>"))
            .field("metadata_url", &self.metadata_url)
            .finish()
    }
}

impl Config {
    /// Build a [`Config`] from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] if `MRW_BIND_ADDR` or `PORT` can't be parsed. Missing
    /// required values are *not* an error here, see [`Config::missing`].
    pub fn from_env() -> Result<Self, Error> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Load a [`Config`] from a JSON file, then apply any environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the file can't be read, [`Error::InvalidJSON`] if it isn't a valid
    /// config document and [`Error::InvalidSetting`] for unparseable overrides.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.with_overrides(|name| std::env::var(name).ok())
    }

    /// Replace settings with the non-empty values returned by `lookup` for each variable name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] if a bind address or port value can't be parsed.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.is_empty());

        for (name, field) in [
            (USERNAME_VAR, &mut self.username),
            (PASSWORD_VAR, &mut self.password),
            (PROJECT_VAR, &mut self.project),
            (ZONE_VAR, &mut self.zone),
            (DOMAIN_VAR, &mut self.domain),
            (API_BASE_VAR, &mut self.api_base),
            (METADATA_URL_VAR, &mut self.metadata_url),
        ] {
            if let Some(value) = lookup(name) {
                *field = value;
            }
        }

        if let Some(token) = lookup(ACCESS_TOKEN_VAR) {
            self.access_token = Some(token);
        }

        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            self.bind_addr = addr.parse().map_err(|err| Error::InvalidSetting {
                name: BIND_ADDR_VAR,
                reason: format!("{err}"),
            })?;
        } else if let Some(port) = lookup(PORT_VAR) {
            let port: u16 = port.parse().map_err(|err| Error::InvalidSetting {
                name: PORT_VAR,
                reason: format!("{err}"),
            })?;
            self.bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
        }

        Ok(self)
    }

    /// Names of the required variables that are currently empty.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (USERNAME_VAR, &self.username),
            (PASSWORD_VAR, &self.password),
            (PROJECT_VAR, &self.project),
            (ZONE_VAR, &self.zone),
            (DOMAIN_VAR, &self.domain),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.is_empty().then_some(name))
        .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Check that all five required settings are present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Incomplete`] naming every missing variable.
    pub fn ensure_complete(&self) -> Result<(), Error> {
        match self.missing() {
            missing if missing.is_empty() => Ok(()),
            missing => Err(Error::Incomplete(missing)),
        }
    }

    /// Case-insensitive username and exact password comparison.
    #[must_use]
    pub fn credentials_match(&self, username: &str, password: &str) -> bool {
        username.to_lowercase() == self.username.to_lowercase() && password == self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            (USERNAME_VAR, "alice"),
            (PASSWORD_VAR, "s3cret"),
            (PROJECT_VAR, "my-project"),
            (ZONE_VAR, "my-zone"),
            (DOMAIN_VAR, "allowed.com"),
        ]
    }

    #[test]
    fn complete_from_lookup() {
        let conf = Config::default().with_overrides(lookup(&full_env())).unwrap();
        assert!(conf.is_complete());
        assert_eq!(conf.username, "alice");
        assert_eq!(conf.domain, "allowed.com");
        assert_eq!(conf.api_base, DEFAULT_API_BASE);
        assert_eq!(conf.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert!(conf.access_token.is_none());
    }

    #[test]
    fn each_missing_value_is_reported() {
        for skip in 0..5 {
            let mut env = full_env();
            let (name, _) = env.remove(skip);
            let conf = Config::default().with_overrides(lookup(&env)).unwrap();
            assert_eq!(conf.missing(), vec![name]);
            assert!(matches!(conf.ensure_complete(), Err(Error::Incomplete(m)) if m == vec![name]));
        }
    }

    #[test]
    fn empty_values_count_as_missing() {
        let mut env = full_env();
        env[2] = (PROJECT_VAR, "");
        let conf = Config::default().with_overrides(lookup(&env)).unwrap();
        assert_eq!(conf.missing(), vec![PROJECT_VAR]);
    }

    #[test]
    fn bind_addr_and_port() {
        let mut env = full_env();
        env.push((PORT_VAR, "9000"));
        let conf = Config::default().with_overrides(lookup(&env)).unwrap();
        assert_eq!(conf.bind_addr, "0.0.0.0:9000".parse().unwrap());

        env.push((BIND_ADDR_VAR, "127.0.0.1:3000"));
        let conf = Config::default().with_overrides(lookup(&env)).unwrap();
        assert_eq!(conf.bind_addr, "127.0.0.1:3000".parse().unwrap());

        let bad = Config::default().with_overrides(lookup(&[(PORT_VAR, "nope")]));
        assert!(matches!(bad, Err(Error::InvalidSetting { name: PORT_VAR, .. })));
    }

    #[test]
    fn json_then_overrides() {
        let conf: Config = serde_json::from_str(
            r#"{"username":"bob","password":"pw","project":"p","zone":"z","domain":"d.com"}"#,
        )
        .unwrap();
        let conf = conf
            .with_overrides(lookup(&[(USERNAME_VAR, "carol"), (ZONE_VAR, "")]))
            .unwrap();
        assert_eq!(conf.username, "carol");
        assert_eq!(conf.zone, "z");
        assert_eq!(conf.metadata_url, DEFAULT_METADATA_URL);
    }

    #[test]
    fn credentials() {
        let conf = Config::default().with_overrides(lookup(&full_env())).unwrap();
        assert!(conf.credentials_match("alice", "s3cret"));
        assert!(conf.credentials_match("Alice", "s3cret"));
        assert!(conf.credentials_match("ALICE", "s3cret"));
        assert!(!conf.credentials_match("alice", "S3CRET"));
        assert!(!conf.credentials_match("bob", "s3cret"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut env = full_env();
        env.push((ACCESS_TOKEN_VAR, "ya29.token"));
        let conf = Config::default().with_overrides(lookup(&env)).unwrap();
        let out = format!("{conf:?}");
        assert!(!out.contains("s3cret"));
        assert!(!out.contains("ya29.token"));
        assert!(out.contains("alice"));
    }
}
