use crate::api::api_error::APIError;
use crate::api::auth::Credentials;
use crate::api::model::{ReturnCode, UpdateParams};
use crate::api::server::AppState;
use crate::error::Error;
use crate::reconcile::{reconcile, Outcome};
use crate::validate;
use axum::extract::{Form, Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .route("/", any(update))
        .route("/update", any(update))
        .route("/nic/update", any(update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Option<Query<UpdateParams>>,
    form: Option<Form<UpdateParams>>,
) -> Result<ReturnCode, APIError> {
    let config = &state.config;
    config.ensure_complete()?;

    let Some(credentials) = Credentials::from_headers(&headers) else {
        tracing::debug!("received unauthenticated request");
        return Err(Error::BadAuth.into());
    };
    if !config.credentials_match(&credentials.username, &credentials.password) {
        tracing::debug!("bad credentials for user \"{}\"", credentials.username);
        return Err(Error::BadAuth.into());
    }

    let UpdateParams { hostname, myip } =
        UpdateParams::merge(query.map(|Query(q)| q), form.map(|Form(f)| f));
    validate::hostname(&hostname)?;
    validate::ipv4(&myip)?;
    validate::in_domain(&hostname, &config.domain)?;

    let fqdn = format!("{hostname}.");
    let outcome = reconcile(
        state.provider.as_ref(),
        &config.project,
        &config.zone,
        &fqdn,
        &myip,
    )
    .await?;

    match outcome {
        Outcome::NoChangeNeeded => {
            tracing::info!("no need to change \"{fqdn}\" to {myip}");
            Ok(ReturnCode::NoChange)
        }
        Outcome::Applied => {
            tracing::info!("updated \"{fqdn}\" to {myip}");
            Ok(ReturnCode::Good)
        }
    }
}
