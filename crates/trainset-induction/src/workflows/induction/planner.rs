use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::conflicts::{detect_conflict, Conflict, ConflictSeverity};
use super::domain::Trainset;
use super::jitter::JitterSource;
use super::metrics::{AssignmentCounts, FleetMetrics};
use super::scoring::{AssignmentEngine, PlanningPolicy, TrainsetAssignment};

/// Outcome of one planning run. Never merged with earlier runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub timestamp: DateTime<Utc>,
    pub schedule: Vec<TrainsetAssignment>,
    pub metrics: FleetMetrics,
    pub conflicts: Vec<Conflict>,
}

impl OptimizationResult {
    pub fn assignment_counts(&self) -> AssignmentCounts {
        AssignmentCounts::tally(&self.schedule)
    }

    pub fn critical_conflict_count(&self) -> usize {
        self.conflicts
            .iter()
            .filter(|conflict| conflict.severity == ConflictSeverity::Critical)
            .count()
    }
}

/// Runs the classifier over a fleet and reduces the per-vehicle results.
#[derive(Debug, Clone)]
pub struct InductionPlanner {
    engine: AssignmentEngine,
}

impl InductionPlanner {
    pub fn new(policy: PlanningPolicy) -> Self {
        Self {
            engine: AssignmentEngine::new(policy),
        }
    }

    pub fn engine(&self) -> &AssignmentEngine {
        &self.engine
    }

    pub fn policy(&self) -> &PlanningPolicy {
        self.engine.policy()
    }

    /// Plan the fleet in input order, stamping the result with `now`.
    pub fn run(
        &self,
        fleet: &[Trainset],
        jitter: &mut dyn JitterSource,
        now: DateTime<Utc>,
    ) -> OptimizationResult {
        let schedule: Vec<TrainsetAssignment> = fleet
            .iter()
            .map(|trainset| self.engine.classify(trainset, &mut *jitter, now))
            .collect();

        let expiry_threshold = self.policy().conflict_expiry_hours;
        let conflicts: Vec<Conflict> = fleet
            .iter()
            .zip(&schedule)
            .filter_map(|(trainset, entry)| {
                detect_conflict(trainset, entry.assignment, expiry_threshold, now)
            })
            .collect();

        let metrics = FleetMetrics::aggregate(&schedule, self.policy());
        let counts = AssignmentCounts::tally(&schedule);

        info!(
            fleet_size = fleet.len(),
            service = counts.service,
            standby = counts.standby,
            cleaning = counts.cleaning,
            maintenance = counts.maintenance,
            overall_score = metrics.overall_score,
            "induction plan computed"
        );
        if !conflicts.is_empty() {
            warn!(
                conflicts = conflicts.len(),
                "induction plan requires human review"
            );
        }

        OptimizationResult {
            timestamp: now,
            schedule,
            metrics,
            conflicts,
        }
    }
}
