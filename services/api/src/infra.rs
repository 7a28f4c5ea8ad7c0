use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::warn;
use trainset_induction::error::AppError;
use trainset_induction::workflows::induction::{
    AlertError, AlertPublisher, ConflictAlert, TrainsetSnapshot,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keeps conflict alerts in memory and mirrors each one to the log.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<ConflictAlert>>>,
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: ConflictAlert) -> Result<(), AlertError> {
        warn!(
            trainset = %alert.trainset_id,
            issue = alert.details.get("issue").map(String::as_str).unwrap_or_default(),
            "induction conflict raised"
        );
        let mut guard = self
            .events
            .lock()
            .map_err(|_| AlertError::Transport("alert log lock poisoned".to_string()))?;
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryAlertPublisher {
    pub(crate) fn events(&self) -> Vec<ConflictAlert> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

pub(crate) fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}

/// Reads a JSON array of vehicle snapshots from disk.
pub(crate) fn read_roster(path: &Path) -> Result<Vec<TrainsetSnapshot>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let roster = serde_json::from_str(&raw)?;
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offset_timestamps_into_utc() {
        let instant = parse_datetime("2025-10-02T02:30:00+05:30").expect("valid timestamp");
        assert_eq!(instant.to_rfc3339(), "2025-10-01T21:00:00+00:00");
    }

    #[test]
    fn rejects_bare_dates() {
        let err = parse_datetime("2025-10-01").expect_err("date without time");
        assert!(err.contains("RFC 3339"));
    }

    #[test]
    fn missing_roster_file_is_an_io_error() {
        let err = read_roster(Path::new("/nonexistent/roster.json")).expect_err("no such file");
        assert!(matches!(err, AppError::Io(_)));
    }
}
