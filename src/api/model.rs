use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

/// The `hostname`/`myip` pair of a DynDNS update. Absent parameters are empty strings.
#[derive(Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(default)]
pub(super) struct UpdateParams {
    pub hostname: String,
    pub myip: String,
}

impl UpdateParams {
    /// Non-empty form body values win over query string values.
    pub fn merge(query: Option<Self>, form: Option<Self>) -> Self {
        let query = query.unwrap_or_default();
        let form = form.unwrap_or_default();
        let pick = |body: String, query: String| if body.is_empty() { query } else { body };
        UpdateParams {
            hostname: pick(form.hostname, query.hostname),
            myip: pick(form.myip, query.myip),
        }
    }
}

/// DynDNS protocol return codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReturnCode {
    Good,
    NoChange,
    BadAuth,
    NotFQDN,
    NotIP,
    NoHost,
    ServerError,
}

impl ReturnCode {
    pub fn token(self) -> &'static str {
        match self {
            ReturnCode::Good => "good",
            ReturnCode::NoChange => "nochg",
            ReturnCode::BadAuth => "badauth",
            ReturnCode::NotFQDN => "notfqdn",
            ReturnCode::NotIP => "notip",
            ReturnCode::NoHost => "nohost",
            ReturnCode::ServerError => "911",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ReturnCode::Good | ReturnCode::NoChange => StatusCode::OK,
            ReturnCode::BadAuth => StatusCode::UNAUTHORIZED,
            ReturnCode::NotFQDN | ReturnCode::NotIP | ReturnCode::NoHost => StatusCode::BAD_REQUEST,
            ReturnCode::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ReturnCode {
    fn into_response(self) -> Response {
        (self.status(), self.token()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(hostname: &str, myip: &str) -> UpdateParams {
        UpdateParams {
            hostname: hostname.to_string(),
            myip: myip.to_string(),
        }
    }

    #[test]
    fn form_wins_over_query() {
        let merged = UpdateParams::merge(
            Some(params("query.example.com", "1.1.1.1")),
            Some(params("form.example.com", "")),
        );
        assert_eq!(merged, params("form.example.com", "1.1.1.1"));
        assert_eq!(UpdateParams::merge(None, None), UpdateParams::default());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let p: UpdateParams = serde_json::from_str(r#"{"hostname":"a.b"}"#).unwrap();
        assert_eq!(p, params("a.b", ""));
    }
}
