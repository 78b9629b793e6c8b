//! clouddyn
//!
//! A [DynDNS] compatible update endpoint in front of a [Google Cloud DNS] managed zone.
//!
//! Dynamic DNS clients (routers, `ddclient`, `inadyn`, ...) authenticate with HTTP Basic auth
//! and send a `hostname` and `myip`. The `A` record for that hostname is created, or replaced,
//! so that it points at the given address. Writes are skipped when the record is already up to
//! date.
//!
//! [DynDNS]: https://help.dyn.com/remote-access-api/perform-update/
//! [Google Cloud DNS]: https://cloud.google.com/dns/docs
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod error;
pub mod provider;
pub mod reconcile;
pub mod validate;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use provider::{CloudDnsProvider, DnsProvider, DynProvider, InMemoryProvider};
pub use reconcile::{reconcile, Outcome};
