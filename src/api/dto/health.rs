//! DTOs for health check endpoint.

use serde::Serialize;

use crate::application::services::HealthReport;

/// Health check response.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: &'static str,
    pub checks: HealthChecks,
}

/// `"ok"` or `"error"` per dependency.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthChecks {
    pub database: &'static str,
    pub redis: &'static str,
}

fn check_status(ok: bool) -> &'static str {
    if ok { "ok" } else { "error" }
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        Self {
            status: if report.is_healthy() {
                "healthy"
            } else {
                "unhealthy"
            },
            checks: HealthChecks {
                database: check_status(report.database_ok),
                redis: check_status(report.cache_ok),
            },
        }
    }
}
