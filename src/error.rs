//! Error types.

use reqwest::StatusCode;

/// Error enumerates the possible clouddyn error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when one or more of the required `MRW_*` settings is empty. Carries the names of
    /// the missing environment variables.
    #[error("not configured, missing {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),

    /// Returned when a request carries no usable HTTP Basic `Authorization` header, or when the
    /// supplied credentials don't match the [`Config`][crate::config::Config].
    ///
    /// Missing and wrong credentials are deliberately indistinguishable to clients.
    #[error("bad username/password")]
    BadAuth,

    /// Returned when the `hostname` parameter isn't a fully qualified domain name.
    #[error("hostname \"{0}\" is not a FQDN")]
    NotFQDN(String),

    /// Returned when the `myip` parameter isn't a dotted-decimal IPv4 address.
    #[error("\"{0}\" is not an IPv4 address")]
    NotIP(String),

    /// Returned when the `hostname` parameter falls outside of
    /// [`Config::domain`][`crate::config::Config::domain`].
    #[error("hostname \"{0}\" isn't in the allowed domain")]
    NoHost(String),

    /// Returned when the DNS provider answers a request with a non-success status.
    #[error("DNS provider returned {status}: {message}")]
    Provider { status: StatusCode, message: String },

    /// Returned when the DNS provider, or the metadata server, can't be reached at all.
    #[error("HTTP transport error")]
    Http(#[from] reqwest::Error),

    /// Returned when an access token for the DNS provider can't be obtained.
    #[error("unable to obtain access token: {0}")]
    Token(String),

    /// Returned when a configured setting has an unusable value.
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [trying to load a `Config`][crate::config::Config::try_from_file] fails due
    /// to invalid JSON content, or when a provider response can't be decoded.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}
