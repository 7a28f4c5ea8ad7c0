use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::certificates::CertificateSummary;
use super::super::domain::{AssignmentCategory, Trainset};
use super::config::PlanningPolicy;

const SCORE_CEILING: i32 = 100;

/// Bounded quality scores for a vehicle under a given assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessScores {
    pub service_readiness: u8,
    pub overall_score: u8,
}

fn base_readiness(category: AssignmentCategory) -> i32 {
    match category {
        AssignmentCategory::Service => 60,
        AssignmentCategory::Cleaning => 50,
        AssignmentCategory::Standby => 40,
        AssignmentCategory::Maintenance => 20,
    }
}

fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, SCORE_CEILING) as u8
}

fn service_readiness(
    trainset: &Trainset,
    summary: &CertificateSummary,
    category: AssignmentCategory,
) -> i32 {
    let mut score = base_readiness(category);

    match category {
        AssignmentCategory::Service => {
            // Lapsed or expiring certificates pin the score regardless of other strengths.
            if summary.disqualified() > 0 {
                return 0;
            }
            if summary.expiring_soon > 0 {
                return 20;
            }

            score += match summary.valid_departments {
                3 => 25,
                2 => 15,
                1 => 5,
                _ => 0,
            };

            if trainset.mileage_km < 50_000 {
                score += 15;
            } else if trainset.mileage_km < 100_000 {
                score += 10;
            }

            let critical = trainset.critical_issue_count() as i32;
            score += (15 - 5 * critical).max(0);

            if trainset.under_branding_contract() {
                score += 5;
            }
        }
        AssignmentCategory::Cleaning => {
            score += match summary.valid_departments {
                3 => 20,
                2 => 10,
                _ => 0,
            };
            let issues = trainset.current_issues.len() as i32;
            score += (10 - 2 * issues).max(0);
        }
        AssignmentCategory::Standby | AssignmentCategory::Maintenance => {}
    }

    score
}

fn overall_score(
    readiness: i32,
    trainset: &Trainset,
    summary: &CertificateSummary,
    policy: &PlanningPolicy,
    today: NaiveDate,
) -> i32 {
    let mut score = readiness;

    let days_until_maintenance = (trainset.next_maintenance - today).num_days();
    if days_until_maintenance <= policy.maintenance_urgent_days {
        score -= 20;
    } else if days_until_maintenance <= policy.maintenance_soon_days {
        score -= 10;
    }

    if summary.disqualified() > 0 {
        score -= 50;
    } else if summary.expiring_soon > 0 {
        score -= 30;
    } else if summary.valid_departments < 3 {
        score -= 15;
    }

    score -= 2 * trainset.current_issues.len() as i32;

    score
}

/// Scores a vehicle for `category`; the result depends only on vehicle state and category.
pub fn score_readiness(
    trainset: &Trainset,
    summary: &CertificateSummary,
    category: AssignmentCategory,
    policy: &PlanningPolicy,
    today: NaiveDate,
) -> ReadinessScores {
    let readiness = clamp_score(service_readiness(trainset, summary, category));
    let overall = clamp_score(overall_score(
        readiness as i32,
        trainset,
        summary,
        policy,
        today,
    ));

    ReadinessScores {
        service_readiness: readiness,
        overall_score: overall,
    }
}
