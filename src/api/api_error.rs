use crate::api::model::ReturnCode;
use crate::error::Error;
use axum::response::{IntoResponse, Response};

pub(crate) struct APIError(anyhow::Error);

impl APIError {
    pub fn return_code(&self) -> ReturnCode {
        match self.0.downcast_ref::<Error>() {
            Some(Error::BadAuth) => ReturnCode::BadAuth,
            Some(Error::NotFQDN(_)) => ReturnCode::NotFQDN,
            Some(Error::NotIP(_)) => ReturnCode::NotIP,
            Some(Error::NoHost(_)) => ReturnCode::NoHost,
            _ => ReturnCode::ServerError,
        }
    }
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        // Clients only ever see the return code, the detail stays in the log.
        let code = self.return_code();
        match code {
            ReturnCode::ServerError => tracing::error!("{:#}", self.0),
            _ => tracing::info!("{:#}", self.0),
        }
        code.into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn return_codes() {
        let cases: Vec<(Error, ReturnCode)> = vec![
            (Error::Incomplete(vec!["MRW_ZONE"]), ReturnCode::ServerError),
            (Error::BadAuth, ReturnCode::BadAuth),
            (Error::NotFQDN("-x".into()), ReturnCode::NotFQDN),
            (Error::NotIP("1.2.3".into()), ReturnCode::NotIP),
            (Error::NoHost("h.other.com".into()), ReturnCode::NoHost),
            (
                Error::Provider {
                    status: StatusCode::CONFLICT,
                    message: "conflict".into(),
                },
                ReturnCode::ServerError,
            ),
            (Error::Token("metadata".into()), ReturnCode::ServerError),
        ];
        for (err, expected) in cases {
            assert_eq!(APIError::from(err).return_code(), expected);
        }
        assert_eq!(
            APIError::from(anyhow::anyhow!("anything")).return_code(),
            ReturnCode::ServerError
        );
    }
}
