use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::workflows::induction::alerts::{AlertError, AlertPublisher, ConflictAlert};
use crate::workflows::induction::domain::{
    BrandingContract, CertificateStatus, Department, FitnessCertificate, Issue, IssueCategory,
    IssueSeverity, OperationalStatus, Trainset, TrainsetId, TrainsetSnapshot,
};
use crate::workflows::induction::jitter::JitterSource;
use crate::workflows::induction::scoring::AssignmentEngine;
use crate::workflows::induction::{InductionPlanningService, PlanningPolicy};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 21, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn today() -> NaiveDate {
    now().date_naive()
}

pub(super) fn certificate(department: Department, status: CertificateStatus) -> FitnessCertificate {
    FitnessCertificate {
        department,
        issued_at: now() - Duration::days(300),
        expires_at: now() + Duration::days(60),
        status,
        priority: None,
    }
}

pub(super) fn valid_certificates() -> Vec<FitnessCertificate> {
    Department::ALL
        .iter()
        .map(|department| certificate(*department, CertificateStatus::Valid))
        .collect()
}

pub(super) fn issue(severity: IssueSeverity) -> Issue {
    Issue {
        id: format!("jc-{severity:?}").to_lowercase(),
        category: IssueCategory::Mechanical,
        severity,
        description: "Hydraulic system pressure low".to_string(),
        reported_at: now() - Duration::hours(6),
        estimated_resolution: Some(now() + Duration::hours(18)),
        assigned_technician: Some("Priya Sharma".to_string()),
    }
}

pub(super) fn branding(contract_hours: u32, completed_hours: u32) -> BrandingContract {
    BrandingContract {
        advertiser: "Kerala Tourism".to_string(),
        contract_hours,
        completed_hours,
    }
}

/// Clean vehicle: all certificates valid, no issues, moderate mileage, maintenance a month out.
pub(super) fn trainset(id: &str) -> Trainset {
    Trainset {
        id: TrainsetId(id.to_string()),
        number: id.trim_start_matches("train-").to_string(),
        status: OperationalStatus::Standby,
        location: "Muttom".to_string(),
        mileage_km: 120_000,
        last_maintenance: today() - Duration::days(20),
        next_maintenance: today() + Duration::days(30),
        fitness_certificates: valid_certificates(),
        current_issues: Vec::new(),
        branding: None,
    }
}

pub(super) fn snapshot(id: &str) -> TrainsetSnapshot {
    let trainset = trainset(id);
    TrainsetSnapshot {
        id: trainset.id.0,
        number: trainset.number,
        status: trainset.status,
        location: trainset.location,
        mileage_km: i64::from(trainset.mileage_km),
        last_maintenance: trainset.last_maintenance,
        next_maintenance: trainset.next_maintenance,
        fitness_certificates: trainset.fitness_certificates,
        current_issues: trainset.current_issues,
        branding: trainset.branding,
    }
}

pub(super) fn policy() -> PlanningPolicy {
    PlanningPolicy::default()
}

pub(super) fn engine() -> AssignmentEngine {
    AssignmentEngine::new(policy())
}

/// Replays a fixed sequence of draws, cycling when exhausted.
pub(super) struct ScriptedJitter {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedJitter {
    pub(super) fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            cursor: 0,
        }
    }
}

impl JitterSource for ScriptedJitter {
    fn next(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<ConflictAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<ConflictAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: ConflictAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct OfflineAlerts;

impl AlertPublisher for OfflineAlerts {
    fn publish(&self, _alert: ConflictAlert) -> Result<(), AlertError> {
        Err(AlertError::Transport("control room pager offline".to_string()))
    }
}

/// Delivers the first `capacity` alerts, then fails.
pub(super) struct FlakyAlerts {
    capacity: usize,
    delivered: Mutex<Vec<ConflictAlert>>,
}

impl FlakyAlerts {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            delivered: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn delivered(&self) -> Vec<ConflictAlert> {
        self.delivered.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for FlakyAlerts {
    fn publish(&self, alert: ConflictAlert) -> Result<(), AlertError> {
        let mut delivered = self.delivered.lock().expect("alert mutex poisoned");
        if delivered.len() >= self.capacity {
            return Err(AlertError::Transport("pager queue full".to_string()));
        }
        delivered.push(alert);
        Ok(())
    }
}

pub(super) fn build_service() -> (InductionPlanningService<MemoryAlerts>, Arc<MemoryAlerts>) {
    let alerts = Arc::new(MemoryAlerts::default());
    let service =
        InductionPlanningService::new(alerts.clone(), policy()).expect("default policy is valid");
    (service, alerts)
}
