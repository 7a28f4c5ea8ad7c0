//! Property-based checks over arbitrary fleets: every plan stays inside its bounds
//! regardless of vehicle condition or jitter stream.

use chrono::Duration;
use proptest::prelude::*;

use super::common::*;
use crate::workflows::induction::certificates::CertificateSummary;
use crate::workflows::induction::domain::{
    AssignmentCategory, BrandingContract, CertificateStatus, Department, IssueSeverity, Trainset,
};
use crate::workflows::induction::jitter::RngJitter;
use crate::workflows::induction::planner::InductionPlanner;

// ──────────────────── strategies ────────────────────

fn arb_status() -> impl Strategy<Value = CertificateStatus> {
    prop_oneof![
        4 => Just(CertificateStatus::Valid),
        1 => Just(CertificateStatus::ExpiringSoon),
        1 => Just(CertificateStatus::Expired),
        1 => Just(CertificateStatus::Suspended),
    ]
}

fn arb_severity() -> impl Strategy<Value = IssueSeverity> {
    prop_oneof![
        Just(IssueSeverity::Critical),
        Just(IssueSeverity::High),
        Just(IssueSeverity::Medium),
        Just(IssueSeverity::Low),
    ]
}

fn arb_trainset(index: usize) -> impl Strategy<Value = Trainset> {
    (
        prop::collection::vec((0usize..3, arb_status(), -48i64..2_000), 0..5),
        prop::collection::vec(arb_severity(), 0..4),
        0u32..400_000,
        -10i64..40,
        prop::option::of((1u32..500, 0u32..500)),
    )
        .prop_map(move |(certs, issues, mileage, days, branding_hours)| {
            let mut trainset = trainset(&format!("train-{index}"));
            trainset.mileage_km = mileage;
            trainset.next_maintenance = today() + Duration::days(days);
            trainset.fitness_certificates = certs
                .into_iter()
                .map(|(department, status, hours)| {
                    let mut cert = certificate(Department::ALL[department], status);
                    cert.expires_at = now() + Duration::hours(hours);
                    cert
                })
                .collect();
            trainset.current_issues = issues
                .into_iter()
                .enumerate()
                .map(|(position, severity)| {
                    let mut card = issue(severity);
                    card.id = format!("jc-{index}-{position}");
                    card
                })
                .collect();
            trainset.branding = branding_hours.map(|(contract_hours, completed_hours)| {
                BrandingContract {
                    advertiser: "Lulu Mall".to_string(),
                    contract_hours,
                    completed_hours,
                }
            });
            trainset
        })
}

fn arb_fleet() -> impl Strategy<Value = Vec<Trainset>> {
    (0usize..12).prop_flat_map(|size| {
        (0..size)
            .map(arb_trainset)
            .collect::<Vec<_>>()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Every entry carries bounded scores, a bounded confidence, and at least one reason.
    #[test]
    fn plan_entries_stay_in_bounds(fleet in arb_fleet(), seed in any::<u64>()) {
        let planner = InductionPlanner::new(policy());
        let result = planner.run(&fleet, &mut RngJitter::seeded(seed), now());

        prop_assert_eq!(result.schedule.len(), fleet.len());
        for entry in &result.schedule {
            prop_assert!(entry.service_readiness <= 100);
            prop_assert!(entry.overall_score <= 100);
            prop_assert!((0.75..=0.95).contains(&entry.confidence));
            prop_assert!(!entry.reasoning.is_empty());
        }
    }

    /// Any lapsed, expiring, or critical condition keeps a vehicle out of service.
    #[test]
    fn disqualified_vehicles_always_go_to_maintenance(fleet in arb_fleet(), seed in any::<u64>()) {
        let planner = InductionPlanner::new(policy());
        let result = planner.run(&fleet, &mut RngJitter::seeded(seed), now());

        for (trainset, entry) in fleet.iter().zip(&result.schedule) {
            let summary = CertificateSummary::from_certificates(&trainset.fitness_certificates);
            if summary.disqualified() > 0 || summary.expiring_soon > 0 || trainset.has_critical_issue() {
                prop_assert_eq!(entry.assignment, AssignmentCategory::Maintenance);
                prop_assert!(entry.suitability.is_none());
            }
        }
    }

    /// Lapsed certificates zero hypothetical service readiness and cap the overall score
    /// whichever category the vehicle is scored for.
    #[test]
    fn lapsed_certificates_cap_readiness(
        trainset in arb_trainset(0),
        category in prop::sample::select(AssignmentCategory::ALL.to_vec()),
    ) {
        let summary = CertificateSummary::from_certificates(&trainset.fitness_certificates);
        prop_assume!(summary.disqualified() > 0);

        let engine = engine();
        let scores = engine.readiness(&trainset, category, now());
        prop_assert!(scores.overall_score <= 50);

        let service = engine.readiness(&trainset, AssignmentCategory::Service, now());
        prop_assert_eq!(service.service_readiness, 0);
        prop_assert!(service.overall_score <= 50);
    }

    /// Critical issues are always surfaced as conflicts, one conflict per vehicle at most.
    #[test]
    fn critical_issues_always_conflict(fleet in arb_fleet(), seed in any::<u64>()) {
        let planner = InductionPlanner::new(policy());
        let result = planner.run(&fleet, &mut RngJitter::seeded(seed), now());

        let critical = fleet.iter().filter(|trainset| trainset.has_critical_issue()).count();
        prop_assert!(result.conflicts.len() >= critical);
        prop_assert!(result.conflicts.len() <= fleet.len());
    }

    /// Fleet percentages stay within [0, 100] and the weighted score never exceeds 40.
    #[test]
    fn fleet_metrics_are_percentages(fleet in arb_fleet(), seed in any::<u64>()) {
        let planner = InductionPlanner::new(policy());
        let result = planner.run(&fleet, &mut RngJitter::seeded(seed), now());
        let metrics = result.metrics;

        prop_assert!((0.0..=100.0).contains(&metrics.service_readiness));
        prop_assert!((0.0..=100.0).contains(&metrics.maintenance_compliance));
        prop_assert!((0.0..=40.0 + 1e-9).contains(&metrics.overall_score));
        if fleet.is_empty() {
            prop_assert_eq!(metrics.overall_score, 0.0);
        } else {
            prop_assert!(metrics.overall_score >= 10.0 - 1e-9);
        }
        prop_assert_eq!(result.assignment_counts().total(), fleet.len());
    }
}
