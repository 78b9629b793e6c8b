use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

/// Username and password from an HTTP Basic `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// `None` when the header is absent, uses another scheme, isn't valid base64 or UTF-8, or has
    /// no `:` separator. The scheme name is matched case-insensitively.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let (scheme, encoded) = value.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn basic() {
        let header = format!("Basic {}", STANDARD.encode("alice:pa:ss"));
        assert_eq!(
            Credentials::from_headers(&headers(&header)),
            Some(Credentials {
                username: "alice".to_string(),
                password: "pa:ss".to_string(),
            })
        );

        let header = format!("basic {}", STANDARD.encode("alice:"));
        let creds = Credentials::from_headers(&headers(&header)).unwrap();
        assert_eq!(creds.password, "");
    }

    #[test]
    fn rejected() {
        assert_eq!(Credentials::from_headers(&HeaderMap::new()), None);
        assert_eq!(Credentials::from_headers(&headers("Bearer abc")), None);
        assert_eq!(Credentials::from_headers(&headers("Basic !!!")), None);
        let no_colon = format!("Basic {}", STANDARD.encode("alice"));
        assert_eq!(Credentials::from_headers(&headers(&no_colon)), None);
        assert_eq!(Credentials::from_headers(&headers("Basic")), None);
    }
}
