use super::common::*;
use std::sync::Arc;

use chrono::Utc;

use crate::workflows::induction::domain::IssueSeverity;
use crate::workflows::induction::jitter::FixedJitter;
use crate::workflows::induction::{
    AssignmentCategory, InductionPlanningService, IntakeViolation, PlanOptions,
    PlanningServiceError, PolicyError,
};

#[test]
fn plan_publishes_one_alert_per_conflict() {
    let (service, alerts) = build_service();
    let mut broken = snapshot("train-2");
    broken.current_issues = vec![issue(IssueSeverity::Critical)];

    let result = service
        .plan_with(
            vec![snapshot("train-1"), broken],
            &mut FixedJitter(0.0),
            now(),
        )
        .expect("plan succeeds");

    assert_eq!(result.conflicts.len(), 1);
    let events = alerts.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].template, "induction_conflict");
    assert_eq!(events[0].trainset_id.0, "train-2");
    assert_eq!(
        events[0].details.get("resolution").map(String::as_str),
        Some("critical maintenance issues detected")
    );
    assert_eq!(
        events[0].details.get("severity").map(String::as_str),
        Some("critical")
    );
}

#[test]
fn intake_violation_aborts_before_planning() {
    let (service, alerts) = build_service();
    let mut broken = snapshot("train-1");
    broken.current_issues = vec![issue(IssueSeverity::Critical)];

    let err = service
        .plan_with(
            vec![broken, snapshot("train-1")],
            &mut FixedJitter(0.0),
            now(),
        )
        .expect_err("duplicate roster rejected");

    assert!(matches!(
        err,
        PlanningServiceError::Intake(IntakeViolation::DuplicateTrainset { .. })
    ));
    assert!(alerts.events().is_empty());
}

#[test]
fn alert_failure_surfaces_as_error() {
    let service = InductionPlanningService::new(Arc::new(OfflineAlerts), policy())
        .expect("default policy is valid");
    let mut broken = snapshot("train-4");
    broken.current_issues = vec![issue(IssueSeverity::Critical)];

    let err = service
        .plan_with(vec![broken], &mut FixedJitter(0.0), now())
        .expect_err("offline alerts fail the run");

    assert!(matches!(err, PlanningServiceError::Alert(_)));
}

#[test]
fn alert_failure_mid_run_keeps_earlier_deliveries() {
    let alerts = Arc::new(FlakyAlerts::new(1));
    let service = InductionPlanningService::new(alerts.clone(), policy())
        .expect("default policy is valid");
    let mut first = snapshot("train-1");
    first.current_issues = vec![issue(IssueSeverity::Critical)];
    let mut second = snapshot("train-2");
    second.current_issues = vec![issue(IssueSeverity::Critical)];

    let err = service
        .plan_with(vec![first, second], &mut FixedJitter(0.0), now())
        .expect_err("second alert fails the run");

    assert!(matches!(err, PlanningServiceError::Alert(_)));
    let delivered = alerts.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].trainset_id.0, "train-1");
}

#[test]
fn conflict_free_plan_does_not_touch_alerts() {
    let service = InductionPlanningService::new(Arc::new(OfflineAlerts), policy())
        .expect("default policy is valid");

    let result = service
        .plan_with(vec![snapshot("train-1")], &mut FixedJitter(0.0), now())
        .expect("no conflicts, no alerts");

    assert_eq!(result.schedule[0].assignment, AssignmentCategory::Service);
}

#[test]
fn invalid_policy_is_rejected_at_construction() {
    let mut policy = policy();
    policy.cleaning_threshold = 0.8;

    let err = InductionPlanningService::new(Arc::new(MemoryAlerts::default()), policy)
        .err()
        .expect("unordered thresholds rejected");

    assert!(matches!(
        err,
        PlanningServiceError::Policy(PolicyError::UnorderedThresholds { .. })
    ));
}

#[test]
fn seeded_plans_are_reproducible() {
    let (service, _) = build_service();
    let roster = || vec![snapshot("train-1"), snapshot("train-2"), snapshot("train-3")];
    let options = PlanOptions {
        seed: Some(7),
        now: Some(now()),
    };

    let first = service.plan(roster(), options).expect("plan succeeds");
    let second = service.plan(roster(), options).expect("plan succeeds");

    assert_eq!(first, second);
    assert_eq!(first.timestamp, now());
}

#[test]
fn empty_roster_is_a_valid_plan() {
    let (service, alerts) = build_service();

    let result = service
        .plan(Vec::new(), PlanOptions::default())
        .expect("empty roster plans");

    assert!(result.schedule.is_empty());
    assert_eq!(result.metrics.service_readiness, 0.0);
    assert!(alerts.events().is_empty());
}

#[test]
fn omitted_instant_stamps_wall_clock() {
    let (service, _) = build_service();
    let before = Utc::now();

    let result = service
        .plan(vec![snapshot("train-1")], PlanOptions::default())
        .expect("plan succeeds");

    let after = Utc::now();
    assert!(before <= result.timestamp && result.timestamp <= after);
}
