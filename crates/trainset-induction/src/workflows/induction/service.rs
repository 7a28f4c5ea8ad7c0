use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alerts::{AlertError, AlertPublisher, ConflictAlert};
use super::domain::TrainsetSnapshot;
use super::intake::{IntakeGuard, IntakeViolation};
use super::jitter::{JitterSource, RngJitter};
use super::planner::{InductionPlanner, OptimizationResult};
use super::scoring::{PlanningPolicy, PolicyError};

/// Per-run knobs supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOptions {
    /// Fixes the jitter stream so the run can be reproduced.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Instant the run is evaluated at. It is also stamped on the result as
    /// `OptimizationResult::timestamp`, so replays carry the supplied instant.
    /// Defaults to the wall clock when omitted.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Service composing the intake guard, planner, and conflict alert hook.
pub struct InductionPlanningService<A> {
    guard: IntakeGuard,
    planner: Arc<InductionPlanner>,
    alerts: Arc<A>,
}

impl<A> InductionPlanningService<A>
where
    A: AlertPublisher + 'static,
{
    pub fn new(alerts: Arc<A>, policy: PlanningPolicy) -> Result<Self, PlanningServiceError> {
        policy.validate()?;
        Ok(Self {
            guard: IntakeGuard,
            planner: Arc::new(InductionPlanner::new(policy)),
            alerts,
        })
    }

    pub fn policy(&self) -> &PlanningPolicy {
        self.planner.policy()
    }

    /// Validate the roster and plan it with a fresh random source owned by this run.
    pub fn plan(
        &self,
        snapshots: Vec<TrainsetSnapshot>,
        options: PlanOptions,
    ) -> Result<OptimizationResult, PlanningServiceError> {
        let mut jitter = match options.seed {
            Some(seed) => RngJitter::seeded(seed),
            None => RngJitter::from_entropy(),
        };
        let now = options.now.unwrap_or_else(Utc::now);
        self.plan_with(snapshots, &mut jitter, now)
    }

    /// Plan with a caller-supplied jitter source and evaluation instant.
    ///
    /// One alert is published per conflict, in schedule order. The first
    /// publish failure aborts the run with [`PlanningServiceError::Alert`];
    /// alerts published before it are not retracted.
    pub fn plan_with(
        &self,
        snapshots: Vec<TrainsetSnapshot>,
        jitter: &mut dyn JitterSource,
        now: DateTime<Utc>,
    ) -> Result<OptimizationResult, PlanningServiceError> {
        let fleet = self.guard.admit_fleet(snapshots)?;
        let result = self.planner.run(&fleet, jitter, now);

        for conflict in &result.conflicts {
            self.alerts.publish(ConflictAlert::from_conflict(conflict))?;
        }

        Ok(result)
    }
}

/// Error raised by the planning service.
#[derive(Debug, thiserror::Error)]
pub enum PlanningServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Alert(#[from] AlertError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
