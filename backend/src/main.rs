//! Backend entry-point: loads settings, wires persistence and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_backend::inbound::http::health::HealthState;
use server::{
    AppSettings, BuildMode, ServerConfig, SessionSettings, build_http_state, create_server,
    drain_on_shutdown, shutdown_signal,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let session = SessionSettings::from_app(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let http_state = build_http_state(&settings).await?;
    let bind_addr = settings.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(session, bind_addr, http_state),
    )?;
    actix_web::rt::spawn(drain_on_shutdown(
        shutdown_signal(),
        health_state,
        server.handle(),
    ));
    info!(%bind_addr, "recipe backend listening");
    server.await
}
