use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::AssignmentCategory;
use super::scoring::{PlanningPolicy, TrainsetAssignment};

const SERVICE_WEIGHT: f64 = 0.4;
const CLEANING_WEIGHT: f64 = 0.3;
const STANDBY_WEIGHT: f64 = 0.2;
const MAINTENANCE_WEIGHT: f64 = 0.1;

/// Fleet-wide percentages reported alongside a schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetMetrics {
    pub service_readiness: f64,
    pub maintenance_compliance: f64,
    pub branding_compliance: f64,
    pub mileage_balance: f64,
    pub overall_score: f64,
}

/// Number of vehicles placed in each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentCounts {
    pub service: usize,
    pub standby: usize,
    pub maintenance: usize,
    pub cleaning: usize,
}

impl AssignmentCounts {
    pub fn tally<'a>(schedule: impl IntoIterator<Item = &'a TrainsetAssignment>) -> Self {
        let mut counts = AssignmentCounts::default();
        for entry in schedule {
            match entry.assignment {
                AssignmentCategory::Service => counts.service += 1,
                AssignmentCategory::Standby => counts.standby += 1,
                AssignmentCategory::Maintenance => counts.maintenance += 1,
                AssignmentCategory::Cleaning => counts.cleaning += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.service + self.standby + self.maintenance + self.cleaning
    }

    pub fn get(&self, category: AssignmentCategory) -> usize {
        match category {
            AssignmentCategory::Service => self.service,
            AssignmentCategory::Standby => self.standby,
            AssignmentCategory::Maintenance => self.maintenance,
            AssignmentCategory::Cleaning => self.cleaning,
        }
    }

    pub fn by_label(&self) -> BTreeMap<&'static str, usize> {
        AssignmentCategory::ALL
            .iter()
            .map(|category| (category.label(), self.get(*category)))
            .collect()
    }
}

impl FleetMetrics {
    /// Reduce a complete schedule into fleet metrics; an empty schedule yields all zeros.
    pub fn aggregate(schedule: &[TrainsetAssignment], policy: &PlanningPolicy) -> Self {
        let counts = AssignmentCounts::tally(schedule);
        let total = counts.total();
        if total == 0 {
            return FleetMetrics::default();
        }

        let total = total as f64;
        let share = |count: usize| count as f64 / total * 100.0;
        let weighted = SERVICE_WEIGHT * counts.service as f64
            + CLEANING_WEIGHT * counts.cleaning as f64
            + STANDBY_WEIGHT * counts.standby as f64
            + MAINTENANCE_WEIGHT * counts.maintenance as f64;

        FleetMetrics {
            service_readiness: share(counts.service),
            maintenance_compliance: share(counts.maintenance),
            branding_compliance: policy.branding_compliance_baseline,
            mileage_balance: policy.mileage_balance_baseline,
            overall_score: weighted / total * 100.0,
        }
    }
}
