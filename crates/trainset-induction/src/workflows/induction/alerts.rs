use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::conflicts::{Conflict, ConflictSeverity};
use super::domain::TrainsetId;

/// Trait describing outbound alert hooks (depot control room, e-mail, pager adapters).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: ConflictAlert) -> Result<(), AlertError>;
}

/// Alert payload raised for every conflict in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictAlert {
    pub template: String,
    pub trainset_id: TrainsetId,
    pub details: BTreeMap<String, String>,
}

impl ConflictAlert {
    pub fn from_conflict(conflict: &Conflict) -> Self {
        let mut details = BTreeMap::new();
        details.insert("issue".to_string(), conflict.issue.clone());
        details.insert("resolution".to_string(), conflict.resolution.clone());
        let severity = match conflict.severity {
            ConflictSeverity::Critical => "critical",
            ConflictSeverity::Warning => "warning",
        };
        details.insert("severity".to_string(), severity.to_string());

        Self {
            template: "induction_conflict".to_string(),
            trainset_id: conflict.trainset_id.clone(),
            details,
        }
    }
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
