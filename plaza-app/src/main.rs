mod command;
mod dispatch;
mod render;
mod routes;
mod shell;
mod views;

use plaza_client::{ApiClient, ApiError, endpoint::DEFAULT_BASE_URL};
use routes::{Route, RouteError};
use serde::Deserialize;
use shell::{Shell, ShellError, stdin_lines};
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error parsing API base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("Error parsing start route: {0}")]
    StartRoute(#[from] RouteError),
    #[error("Error building API client: {0}")]
    Client(#[from] ApiError),
    #[error(transparent)]
    Shell(#[from] ShellError),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    api_base_url: Option<Url>,
    request_timeout_secs: Option<u64>,
    #[serde(default = "default_start_route")]
    start_route: String,
}

fn default_start_route() -> String {
    "/".to_owned()
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "plaza_app=debug,\
                plaza_client=debug,\
                plaza_common=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::prefixed("PLAZA_").from_env().map_err(InitError::from)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let start: Route = env.start_route.parse()?;
    let timeout = env.request_timeout_secs.map(Duration::from_secs);
    let base = match env.api_base_url {
        Some(base) => base,
        None => Url::parse(DEFAULT_BASE_URL)?,
    };
    let api = ApiClient::new(base, timeout)?;
    info!(base = %api.base(), %start, "Starting");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!(%err, "Unable to listen for ctrl-c");
                return;
            }
            shutdown.cancel();
        }
    });

    let mut shell = Shell::new(Arc::new(api), start, shutdown);
    let mut stdout = std::io::stdout().lock();
    shell.run(stdin_lines(), &mut stdout).await?;

    Ok(())
}
