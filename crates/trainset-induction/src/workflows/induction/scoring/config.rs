use serde::{Deserialize, Serialize};

/// Planning policy dials: suitability thresholds, term weights, and reporting baselines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningPolicy {
    pub service_threshold: f64,
    pub cleaning_threshold: f64,
    pub standby_threshold: f64,
    pub weights: SuitabilityWeights,
    pub confidence_floor: f64,
    pub confidence_ceiling: f64,
    pub conflict_expiry_hours: f64,
    pub maintenance_urgent_days: i64,
    pub maintenance_soon_days: i64,
    pub branding_compliance_baseline: f64,
    pub mileage_balance_baseline: f64,
}

/// Contribution of each condition term to the suitability score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityWeights {
    pub low_mileage_limit_km: u32,
    pub low_mileage: f64,
    pub high_mileage: f64,
    pub no_issues: f64,
    pub open_issues: f64,
    pub branding_obligation: f64,
    pub certificates_valid: f64,
    pub certificates_degraded: f64,
}

impl Default for SuitabilityWeights {
    fn default() -> Self {
        Self {
            low_mileage_limit_km: 150_000,
            low_mileage: 0.3,
            high_mileage: 0.1,
            no_issues: 0.4,
            open_issues: 0.1,
            branding_obligation: 0.3,
            certificates_valid: 0.3,
            certificates_degraded: 0.1,
        }
    }
}

impl Default for PlanningPolicy {
    fn default() -> Self {
        Self {
            service_threshold: 0.7,
            cleaning_threshold: 0.5,
            standby_threshold: 0.3,
            weights: SuitabilityWeights::default(),
            confidence_floor: 0.75,
            confidence_ceiling: 0.95,
            conflict_expiry_hours: 12.0,
            maintenance_urgent_days: 7,
            maintenance_soon_days: 14,
            branding_compliance_baseline: 92.4,
            mileage_balance_baseline: 89.6,
        }
    }
}

impl PlanningPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        let thresholds = [
            self.service_threshold,
            self.cleaning_threshold,
            self.standby_threshold,
        ];
        if thresholds.iter().any(|value| !value.is_finite())
            || !(self.service_threshold > self.cleaning_threshold
                && self.cleaning_threshold > self.standby_threshold)
        {
            return Err(PolicyError::UnorderedThresholds {
                service: self.service_threshold,
                cleaning: self.cleaning_threshold,
                standby: self.standby_threshold,
            });
        }

        let weights = &self.weights;
        let terms = [
            weights.low_mileage,
            weights.high_mileage,
            weights.no_issues,
            weights.open_issues,
            weights.branding_obligation,
            weights.certificates_valid,
            weights.certificates_degraded,
        ];
        if terms.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(PolicyError::NegativeWeight);
        }

        if !(0.0..=1.0).contains(&self.confidence_floor)
            || !(0.0..=1.0).contains(&self.confidence_ceiling)
            || self.confidence_floor > self.confidence_ceiling
        {
            return Err(PolicyError::ConfidenceBand {
                floor: self.confidence_floor,
                ceiling: self.confidence_ceiling,
            });
        }

        if !self.conflict_expiry_hours.is_finite() || self.conflict_expiry_hours < 0.0 {
            return Err(PolicyError::ConflictWindow(self.conflict_expiry_hours));
        }

        if self.maintenance_urgent_days < 0
            || self.maintenance_urgent_days > self.maintenance_soon_days
        {
            return Err(PolicyError::MaintenanceWindows {
                urgent: self.maintenance_urgent_days,
                soon: self.maintenance_soon_days,
            });
        }

        for (name, value) in [
            ("branding_compliance_baseline", self.branding_compliance_baseline),
            ("mileage_balance_baseline", self.mileage_balance_baseline),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(PolicyError::BaselineOutOfRange { name, value });
            }
        }

        Ok(())
    }

    /// Confidence reported for a decision drawn with the given jitter.
    pub fn confidence_for(&self, jitter: f64) -> f64 {
        let span = self.confidence_ceiling - self.confidence_floor;
        (self.confidence_floor + jitter * span).clamp(self.confidence_floor, self.confidence_ceiling)
    }
}

/// Rejected policy configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error(
        "suitability thresholds must be strictly descending (service {service}, cleaning {cleaning}, standby {standby})"
    )]
    UnorderedThresholds {
        service: f64,
        cleaning: f64,
        standby: f64,
    },
    #[error("suitability weights must be finite and non-negative")]
    NegativeWeight,
    #[error("confidence band [{floor}, {ceiling}] must sit inside [0, 1]")]
    ConfidenceBand { floor: f64, ceiling: f64 },
    #[error("conflict expiry window must be a non-negative number of hours, found {0}")]
    ConflictWindow(f64),
    #[error("maintenance urgency windows must satisfy 0 <= urgent ({urgent}) <= soon ({soon})")]
    MaintenanceWindows { urgent: i64, soon: i64 },
    #[error("{name} must be a percentage in [0, 100], found {value}")]
    BaselineOutOfRange { name: &'static str, value: f64 },
}
