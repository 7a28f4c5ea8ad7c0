use serde::{Deserialize, Serialize};

use super::super::certificates::CertificateSummary;
use super::super::domain::{AssignmentCategory, Trainset};
use super::config::PlanningPolicy;

/// Safety condition that forces a vehicle into maintenance before any scoring happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disqualification {
    CertificatesLapsed { expired: usize, suspended: usize },
    CertificatesExpiring { count: usize },
    CriticalIssue { count: usize },
}

impl Disqualification {
    pub fn reasons(&self) -> Vec<String> {
        match self {
            Disqualification::CertificatesLapsed { expired, suspended } => {
                let mut reasons = Vec::new();
                if *expired > 0 {
                    reasons.push(format!("{expired} fitness certificate(s) expired"));
                }
                if *suspended > 0 {
                    reasons.push(format!("{suspended} fitness certificate(s) suspended"));
                }
                reasons.push("certificate renewal required before service".to_string());
                reasons
            }
            Disqualification::CertificatesExpiring { count } => vec![
                format!("{count} fitness certificate(s) expiring soon"),
                "renew certificates before next service cycle".to_string(),
            ],
            Disqualification::CriticalIssue { count } => {
                let mut reasons = vec!["critical issue requires immediate attention".to_string()];
                if *count > 1 {
                    reasons.push(format!("{count} critical issues open"));
                }
                reasons
            }
        }
    }
}

/// Disqualification hierarchy; the first matching rule wins.
pub(crate) fn disqualify(
    trainset: &Trainset,
    summary: &CertificateSummary,
) -> Option<Disqualification> {
    if summary.disqualified() > 0 {
        return Some(Disqualification::CertificatesLapsed {
            expired: summary.expired,
            suspended: summary.suspended,
        });
    }

    if summary.expiring_soon > 0 {
        return Some(Disqualification::CertificatesExpiring {
            count: summary.expiring_soon,
        });
    }

    let critical = trainset.critical_issue_count();
    if critical > 0 {
        return Some(Disqualification::CriticalIssue { count: critical });
    }

    None
}

/// Maps a suitability score onto a category along with the threshold explanation.
pub(crate) fn threshold_assignment(
    suitability: f64,
    policy: &PlanningPolicy,
) -> (AssignmentCategory, String) {
    if suitability > policy.service_threshold {
        (
            AssignmentCategory::Service,
            format!(
                "suitability {suitability:.2} above service threshold {:.2}",
                policy.service_threshold
            ),
        )
    } else if suitability > policy.cleaning_threshold {
        (
            AssignmentCategory::Cleaning,
            format!(
                "suitability {suitability:.2} above cleaning threshold {:.2}",
                policy.cleaning_threshold
            ),
        )
    } else if suitability > policy.standby_threshold {
        (
            AssignmentCategory::Standby,
            format!(
                "suitability {suitability:.2} above standby threshold {:.2}; available for backup service",
                policy.standby_threshold
            ),
        )
    } else {
        (
            AssignmentCategory::Maintenance,
            format!(
                "suitability {suitability:.2} at or below standby threshold {:.2}",
                policy.standby_threshold
            ),
        )
    }
}
