use tracing::{debug, instrument};

/// Liveness probe for load balancers and deploy tooling.
#[instrument]
pub async fn health_handler() -> &'static str {
    debug!("health check");
    "OK"
}
