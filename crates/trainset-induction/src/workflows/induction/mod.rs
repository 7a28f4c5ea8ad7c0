//! Nightly induction planning: which trainsets run, stand by, get cleaned, or go to the depot.
//!
//! Roster snapshots pass through the intake guard, are classified one vehicle at a time by the
//! assignment engine, and are then reduced into fleet metrics and a conflict list for the
//! control room.

pub mod alerts;
pub mod certificates;
pub mod conflicts;
pub mod domain;
pub mod intake;
pub mod jitter;
pub mod metrics;
pub mod planner;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use alerts::{AlertError, AlertPublisher, ConflictAlert};
pub use certificates::{CertificateHealth, CertificateSummary};
pub use conflicts::{Conflict, ConflictSeverity};
pub use domain::{
    AssignmentCategory, BrandingContract, CertificatePriority, CertificateStatus, Department,
    FitnessCertificate, Issue, IssueCategory, IssueSeverity, OperationalStatus, Trainset,
    TrainsetId, TrainsetSnapshot,
};
pub use intake::{IntakeGuard, IntakeViolation};
pub use jitter::{FixedJitter, JitterSource, RngJitter};
pub use metrics::{AssignmentCounts, FleetMetrics};
pub use planner::{InductionPlanner, OptimizationResult};
pub use router::{induction_router, PlanRequest};
pub use scoring::{
    AssignmentEngine, PlanningPolicy, PolicyError, ReadinessScores, SuitabilityWeights,
    TrainsetAssignment,
};
pub use service::{InductionPlanningService, PlanOptions, PlanningServiceError};
