use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::USER_AGENT, HeaderMap},
    Json,
};
use serde_json::Value;

use crate::error::ReportError;
use crate::model::{report_id, ReportSummary};
use crate::AppState;

/// `POST /statistics/report`
///
/// Logs the id of the reporting client and acknowledges with a plain `OK`. The rest of
/// the payload is only summarised for the log line, never validated or kept.
#[tracing::instrument(name = "statistics_report", skip_all)]
pub async fn report_handler(
    State(_state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<&'static str, ReportError> {
    let Json(report) = body?;
    let id = report_id(&report)?;
    let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok());

    match ReportSummary::from_report(&report) {
        Some(summary) => tracing::info!(
            report.id = id,
            user_agent,
            report.crashed = summary.crashed,
            report.statistics_version = summary.statistics_version,
            report.platform = summary.platform.map(display),
            report.game_version = summary.game_version.as_ref().map(display),
            report.assemblies = summary.assembly_count(),
            "Received statistics report from: {id}"
        ),
        None => tracing::info!(
            report.id = id,
            user_agent,
            "Received statistics report from: {id}"
        ),
    }

    Ok("OK")
}
