//! Workload summaries
//!
//! Counters collected while the workload runs, logged at the end of a command.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Outcome of a paged query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySummary {
    /// Number of pages received
    pub pages: usize,

    /// Number of items across all pages
    pub items: usize,

    /// Sum of the page request charges (RU)
    pub request_charge: f64,

    /// Ids of every item returned, in page order
    pub item_ids: Vec<String>,
}

impl QuerySummary {
    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            pages = self.pages,
            items = self.items,
            request_charge = self.request_charge,
            "Query completed"
        );
    }
}

/// Outcome of a full workload run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Families inserted during setup
    pub inserted: usize,

    /// Request charge consumed by the inserts (RU)
    pub insert_charge: f64,

    /// Point reads that returned the inserted payload
    pub reads_succeeded: u64,

    /// Point reads that failed or returned a different payload
    pub reads_failed: u64,

    /// Request charge consumed by successful reads (RU)
    pub read_charge: f64,

    /// Completed passes over the inserted families
    pub passes: u64,

    /// Whether the read loop was stopped by a shutdown signal
    pub interrupted: bool,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Query results, when the run included the sample query
    pub query: Option<QuerySummary>,
}

impl RunSummary {
    /// Create a new empty run summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Total point reads attempted
    pub fn total_reads(&self) -> u64 {
        self.reads_succeeded + self.reads_failed
    }

    /// Total request charge across inserts, reads and the query
    pub fn total_charge(&self) -> f64 {
        let query = self.query.as_ref().map_or(0.0, |q| q.request_charge);
        self.insert_charge + self.read_charge + query
    }

    /// Get read success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.total_reads();
        if total == 0 {
            return 100.0;
        }
        (self.reads_succeeded as f64 / total as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            started_at = %self.started_at.to_rfc3339(),
            inserted = self.inserted,
            passes = self.passes,
            reads_succeeded = self.reads_succeeded,
            reads_failed = self.reads_failed,
            total_charge = self.total_charge(),
            duration_ms = self.duration.as_millis() as u64,
            interrupted = self.interrupted,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Workload completed"
        );

        if self.reads_failed > 0 {
            tracing::warn!(
                reads_failed = self.reads_failed,
                "Workload completed with failed reads"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::new();
        assert_eq!(summary.total_reads(), 0);
        assert_eq!(summary.success_rate(), 100.0);
        assert_eq!(summary.total_charge(), 0.0);
    }

    #[test]
    fn test_totals() {
        let summary = RunSummary {
            inserted: 4,
            insert_charge: 40.0,
            reads_succeeded: 6,
            reads_failed: 2,
            read_charge: 6.0,
            query: Some(QuerySummary {
                request_charge: 3.5,
                ..Default::default()
            }),
            ..Default::default()
        }
        .with_duration(Duration::from_millis(120));

        assert_eq!(summary.total_reads(), 8);
        assert_eq!(summary.success_rate(), 75.0);
        assert_eq!(summary.total_charge(), 49.5);
        assert_eq!(summary.duration, Duration::from_millis(120));
    }
}
