//! HTTP API implementing the DynDNS update protocol.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the service is operational.
//!
//! ## `/nic/update`, `/update`, `/` (any method)
//!
//!   Expects HTTP Basic authentication and two parameters, either in the query string or in an
//!   `application/x-www-form-urlencoded` body:
//!
//!   * `hostname`: the FQDN to update, e.g. `home.dyn.example.com`. It must end with the
//!     configured [`Config::domain`][`crate::config::Config::domain`].
//!   * `myip`: the dotted-decimal IPv4 address the name should resolve to.
//!
//!   ```bash
//!   ❯ curl -u alice:secret 'http://localhost:8080/nic/update?hostname=home.dyn.example.com&myip=203.0.113.7'
//!   good
//!   ```
//!
//!   The response body is a single DynDNS return code:
//!
//!   | Condition                        | Status | Body      |
//!   |----------------------------------|--------|-----------|
//!   | server configuration incomplete  | 500    | `911`     |
//!   | missing or wrong credentials     | 401    | `badauth` |
//!   | `hostname` isn't a FQDN          | 400    | `notfqdn` |
//!   | `myip` isn't an IPv4 address     | 400    | `notip`   |
//!   | `hostname` outside the domain    | 400    | `nohost`  |
//!   | record already up to date        | 200    | `nochg`   |
//!   | DNS provider error               | 500    | `911`     |
//!   | record created or updated        | 200    | `good`    |
//!
//!   Checks happen in the order of the table and the first failure wins.

mod api_error;
mod auth;
mod model;
mod routes;
pub mod server;

pub use server::new;
