use anyhow::{anyhow, Result};
use clouddyn::{CloudDnsProvider, Config, DynProvider, SharedConfig};
use is_terminal::IsTerminal;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let mut first_args = std::env::args().take(2);
    let (program_name, config_file) = (
        first_args.next().unwrap_or("clouddyn".to_string()),
        first_args.next(),
    );

    let config = config_init(&program_name, config_file)?;
    let provider: DynProvider = Arc::new(CloudDnsProvider::from_config(&config));
    tracing::debug!("running with {config:?}");

    tracing::info!(
        "API listening on {}, updating {} in {}/{}",
        &config.bind_addr,
        &config.domain,
        &config.project,
        &config.zone
    );
    let api_server = clouddyn::api::new(config.clone(), provider);
    let api_handle = tokio::spawn(api_server);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        Ok(api_res) = api_handle => {
            if let Err(err) = api_res {
                return Err(err.into())
            }
        }
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clouddyn=info,tower_http=info".into()),
        )
        .init();
}

fn config_init(program_name: &str, config_file: Option<String>) -> Result<SharedConfig> {
    let config = match config_file {
        None => Config::from_env()?,
        Some(flag) if flag.starts_with('-') => {
            return Err(anyhow!("usage: {program_name} [/path/to/config.json]"))
        }
        Some(config_file) => {
            tracing::debug!("loaded config from {config_file}");
            Config::try_from_file(&config_file)?
        }
    };
    if let Err(err) = config.ensure_complete() {
        tracing::error!("{err}");
        return Err(err.into());
    }
    Ok(Arc::new(config))
}
