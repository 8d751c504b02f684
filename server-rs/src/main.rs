use std::sync::Arc;

use anyhow::Context;
use modstats_server::configuration::{ApplicationProfile, Config};
use modstats_server::telemetry::init_telemetry;
use modstats_server::{app, serve, shutdown_signal, AppState};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let default_profile = if cfg!(debug_assertions) {
        ApplicationProfile::Dev
    } else {
        ApplicationProfile::Prod
    };
    let config = Config::load(Some(default_profile))?;
    init_telemetry(&config.telemetry)?;

    let listener = config
        .server
        .listener()
        .await
        .with_context(|| format!("Failed to bind {}", config.server.socket_addr()))?;

    let app = app(Arc::new(AppState::default()), &config.server);
    serve(listener, app, shutdown_signal()).await
}
