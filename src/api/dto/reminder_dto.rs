//! Reminder sweep DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::service::SweepReport;

/// Response body for `GET|POST /reminders/sweep`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SweepResponse {
    /// Candidate events found in the reminder window.
    pub processed: usize,
    /// Messages accepted by the push gateway.
    pub sent: usize,
}

impl From<SweepReport> for SweepResponse {
    fn from(report: SweepReport) -> Self {
        Self {
            processed: report.processed,
            sent: report.sent,
        }
    }
}
