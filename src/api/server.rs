use crate::api::routes;
use crate::config::SharedConfig;
use crate::provider::DynProvider;
use std::future::Future;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub provider: DynProvider,
}

pub fn new(
    config: SharedConfig,
    provider: DynProvider,
) -> impl Future<Output = hyper::Result<()>> {
    axum::Server::bind(&config.bind_addr)
        .serve(routes::new(AppState { config, provider }).into_make_service())
}
