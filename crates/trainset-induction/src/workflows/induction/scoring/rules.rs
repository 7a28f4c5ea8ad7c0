use super::super::certificates::CertificateSummary;
use super::super::domain::Trainset;
use super::config::PlanningPolicy;
use super::SuitabilityComponent;
use super::SuitabilityFactor;

/// Condition score for a vehicle that cleared every disqualification rule.
pub(crate) struct Suitability {
    pub components: Vec<SuitabilityComponent>,
    pub total: f64,
    /// Labels of the favourable terms that fired, in evaluation order.
    pub strengths: Vec<&'static str>,
}

pub(crate) fn score_suitability(
    trainset: &Trainset,
    summary: &CertificateSummary,
    policy: &PlanningPolicy,
    jitter: f64,
) -> Suitability {
    let weights = &policy.weights;
    let mut components = Vec::with_capacity(5);
    let mut strengths = Vec::new();

    components.push(SuitabilityComponent {
        factor: SuitabilityFactor::Jitter,
        weight: jitter,
        notes: format!("random tie-break {jitter:.3}"),
    });

    if trainset.mileage_km < weights.low_mileage_limit_km {
        strengths.push("low mileage");
        components.push(SuitabilityComponent {
            factor: SuitabilityFactor::Mileage,
            weight: weights.low_mileage,
            notes: format!(
                "{} km below {} km",
                trainset.mileage_km, weights.low_mileage_limit_km
            ),
        });
    } else {
        components.push(SuitabilityComponent {
            factor: SuitabilityFactor::Mileage,
            weight: weights.high_mileage,
            notes: format!(
                "{} km at or above {} km",
                trainset.mileage_km, weights.low_mileage_limit_km
            ),
        });
    }

    if trainset.current_issues.is_empty() {
        strengths.push("no current issues");
        components.push(SuitabilityComponent {
            factor: SuitabilityFactor::IssueLoad,
            weight: weights.no_issues,
            notes: "no open job cards".to_string(),
        });
    } else {
        components.push(SuitabilityComponent {
            factor: SuitabilityFactor::IssueLoad,
            weight: weights.open_issues,
            notes: format!("{} open job card(s)", trainset.current_issues.len()),
        });
    }

    if trainset.under_branding_contract() {
        strengths.push("branding contract requirements");
        let notes = trainset
            .branding
            .as_ref()
            .map(|contract| {
                format!(
                    "{} wrap at {}/{} contracted hours",
                    contract.advertiser, contract.completed_hours, contract.contract_hours
                )
            })
            .unwrap_or_default();
        components.push(SuitabilityComponent {
            factor: SuitabilityFactor::Branding,
            weight: weights.branding_obligation,
            notes,
        });
    }

    if summary.all_departments_valid() {
        strengths.push("all fitness certificates valid");
        components.push(SuitabilityComponent {
            factor: SuitabilityFactor::CertificateHealth,
            weight: weights.certificates_valid,
            notes: "every department reports valid".to_string(),
        });
    } else {
        components.push(SuitabilityComponent {
            factor: SuitabilityFactor::CertificateHealth,
            weight: weights.certificates_degraded,
            notes: format!("{} of 3 departments valid", summary.valid_departments),
        });
    }

    let raw: f64 = components.iter().map(|component| component.weight).sum();
    // Snap to nine decimals so sums of decimal weights compare exactly against thresholds.
    let total = (raw * 1e9).round() / 1e9;

    Suitability {
        components,
        total,
        strengths,
    }
}
