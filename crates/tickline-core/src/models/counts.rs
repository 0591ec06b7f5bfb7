//! Aggregate ticket counts model

use serde::{Deserialize, Serialize};

use super::TicketStatus;

/// Ticket counts by status, as aggregated server-side.
///
/// Values are surfaced to callers exactly as the backend reported them;
/// the client only derives totals and percentages for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCounts {
    #[serde(default, rename = "openCount")]
    pub open: u64,
    #[serde(default, rename = "inProgressCount")]
    pub in_progress: u64,
    #[serde(default, rename = "resolvedCount")]
    pub resolved: u64,
    #[serde(default, rename = "noResponseCount")]
    pub no_response: u64,
}

impl TicketCounts {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.open + self.in_progress + self.resolved + self.no_response
    }

    /// Status/count pairs in the order the dashboard presents them.
    #[must_use]
    pub fn breakdown(&self) -> [(TicketStatus, u64); 4] {
        [
            (TicketStatus::Open, self.open),
            (TicketStatus::InProgress, self.in_progress),
            (TicketStatus::Resolved, self.resolved),
            (TicketStatus::NoResponse, self.no_response),
        ]
    }

    /// Share of the total for one status bucket, in percent.
    ///
    /// Returns 0 for an empty total rather than dividing by zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self, count: u64) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        }
    }
}
