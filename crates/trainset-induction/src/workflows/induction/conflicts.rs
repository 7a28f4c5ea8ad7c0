use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::certificates::min_hours_until_expiry;
use super::domain::{AssignmentCategory, Trainset, TrainsetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    Critical,
    Warning,
}

/// Mismatch between an assignment and a vehicle's safety state that needs a human decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub trainset_id: TrainsetId,
    pub issue: String,
    pub severity: ConflictSeverity,
    pub resolution: String,
}

/// Flags a vehicle when it carries a critical issue, or when it is sent to
/// service with a certificate window shorter than `expiry_threshold_hours`.
///
/// A vehicle without any certificate has no remaining validity and is treated
/// as already expired.
pub fn detect_conflict(
    trainset: &Trainset,
    assignment: AssignmentCategory,
    expiry_threshold_hours: f64,
    now: DateTime<Utc>,
) -> Option<Conflict> {
    let critical = trainset.critical_issue_count();
    if critical > 0 {
        return Some(Conflict {
            trainset_id: trainset.id.clone(),
            issue: format!(
                "Critical maintenance issues detected on train {} ({critical} open)",
                trainset.number
            ),
            severity: ConflictSeverity::Critical,
            resolution: "critical maintenance issues detected".to_string(),
        });
    }

    if assignment != AssignmentCategory::Service {
        return None;
    }

    let hours_left = min_hours_until_expiry(&trainset.fitness_certificates, now).unwrap_or(0.0);
    if hours_left < expiry_threshold_hours {
        return Some(Conflict {
            trainset_id: trainset.id.clone(),
            issue: format!(
                "Fitness certificate on train {} expires in {:.1}h while assigned to service",
                trainset.number,
                hours_left.max(0.0)
            ),
            severity: ConflictSeverity::Critical,
            resolution: "fitness certificate expires soon".to_string(),
        });
    }

    None
}
