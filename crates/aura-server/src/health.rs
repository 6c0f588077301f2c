//! Health check endpoint.

use std::time::Instant;

use axum::Json;
use serde::{Deserialize, Serialize};

/// Health check response payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server can answer at all.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
}

/// Build the health check response.
pub fn health_check(start_time: Instant) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: aura_core::constants::VERSION.to_string(),
        uptime_secs: start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;

    #[test]
    fn health_check_reports_ok() {
        let Json(response) = health_check(Instant::now());
        assert_eq!(response.status, "ok");
        assert_eq!(response.version, aura_core::constants::VERSION);
    }

    #[test]
    fn uptime_starts_near_zero() {
        let Json(response) = health_check(Instant::now());
        assert!(response.uptime_secs < 2);
    }

    #[test]
    fn serializes_expected_fields() {
        let Json(response) = health_check(Instant::now());
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("status").is_some());
        assert!(value.get("version").is_some());
        assert!(value.get("uptime_secs").is_some());
    }
}
