use std::path::Path;
use std::sync::{Arc, Once};

use modstats_server::configuration::{ApplicationProfile, Config};
use modstats_server::{app, serve, AppState};
use tracing_subscriber::EnvFilter;

pub struct TestApi {
    pub api_address: String,
    pub api_client: reqwest::Client,
}

impl TestApi {
    pub async fn spawn() -> Self {
        Self::init_telemetry();
        let config = Self::get_config();

        let listener = config
            .server
            .listener()
            .await
            .expect("Failed to bind the server TCP listener");
        let address = listener
            .local_addr()
            .expect("The server TCP listener doesn't have a local socket address");
        let app = app(Arc::new(AppState::default()), &config.server);

        tokio::spawn(serve(listener, app, std::future::pending()));

        TestApi {
            api_address: format!("http://{address}"),
            api_client: reqwest::Client::new(),
        }
    }

    /// The dev configuration, on a port picked by the OS so tests can run in parallel.
    fn get_config() -> Config {
        let configuration_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("configuration");
        let mut config = Config::load_from(configuration_dir, Some(ApplicationProfile::Dev))
            .expect("Failed to load test configuration");
        config.server.ip = [127, 0, 0, 1].into();
        config.server.port = 0;
        config
    }

    fn init_telemetry() {
        static INIT_TELEMETRY: Once = Once::new();
        INIT_TELEMETRY.call_once(|| {
            // Only enable the telemetry if the `TEST_LOG` environment variable is set.
            if std::env::var("TEST_LOG").is_ok() {
                tracing_subscriber::fmt()
                    .with_env_filter(
                        EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("info")),
                    )
                    .init();
            }
        });
    }
}

/// Convenient methods for calling the API under test.
impl TestApi {
    pub async fn get_health(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/health", &self.api_address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_report(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/statistics/report", &self.api_address))
            .header(reqwest::header::USER_AGENT, "ModStatistics/1.0.0 (8)")
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw_report(
        &self,
        body: &'static str,
        content_type: Option<&'static str>,
    ) -> reqwest::Response {
        let mut request = self
            .api_client
            .post(format!("{}/statistics/report", &self.api_address))
            .body(body);
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        request.send().await.expect("Failed to execute request.")
    }
}
