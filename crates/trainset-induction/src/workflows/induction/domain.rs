use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for fleet vehicles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrainsetId(pub String);

impl std::fmt::Display for TrainsetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inbound vehicle record as supplied by the fleet roster, before intake validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainsetSnapshot {
    pub id: String,
    pub number: String,
    pub status: OperationalStatus,
    pub location: String,
    pub mileage_km: i64,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: NaiveDate,
    /// Required key; an explicitly empty list is accepted.
    pub fitness_certificates: Vec<FitnessCertificate>,
    pub current_issues: Vec<Issue>,
    #[serde(default)]
    pub branding: Option<BrandingContract>,
}

/// Validated vehicle consumed by the planning engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainset {
    pub id: TrainsetId,
    pub number: String,
    pub status: OperationalStatus,
    pub location: String,
    pub mileage_km: u32,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: NaiveDate,
    pub fitness_certificates: Vec<FitnessCertificate>,
    pub current_issues: Vec<Issue>,
    pub branding: Option<BrandingContract>,
}

impl Trainset {
    pub fn critical_issue_count(&self) -> usize {
        self.current_issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Critical)
            .count()
    }

    pub fn has_critical_issue(&self) -> bool {
        self.critical_issue_count() > 0
    }

    pub fn under_branding_contract(&self) -> bool {
        self.branding
            .as_ref()
            .map(BrandingContract::under_contract)
            .unwrap_or(false)
    }
}

/// Real-world state reported for a vehicle when the roster was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalStatus {
    Service,
    Standby,
    Maintenance,
    Cleaning,
    Inspection,
}

/// Regulatory domain that issues a fitness certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    RollingStock,
    #[serde(alias = "signaling")]
    Signalling,
    Telecom,
}

impl Department {
    pub const ALL: [Department; 3] = [
        Department::RollingStock,
        Department::Signalling,
        Department::Telecom,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Department::RollingStock => "rolling_stock",
            Department::Signalling => "signalling",
            Department::Telecom => "telecom",
        }
    }
}

/// Validity state resolved upstream by the certifying department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    Valid,
    ExpiringSoon,
    Expired,
    Suspended,
}

impl CertificateStatus {
    pub const fn is_disqualifying(self) -> bool {
        matches!(self, CertificateStatus::Expired | CertificateStatus::Suspended)
    }
}

/// Urgency bucket for renewing a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificatePriority {
    Critical,
    High,
    Medium,
    Low,
}

impl CertificatePriority {
    /// Buckets the remaining validity window; anything already lapsed is critical.
    pub fn from_hours_until_expiry(hours: f64) -> Self {
        if hours < 12.0 {
            CertificatePriority::Critical
        } else if hours < 24.0 {
            CertificatePriority::High
        } else if hours < 72.0 {
            CertificatePriority::Medium
        } else {
            CertificatePriority::Low
        }
    }
}

/// Fitness certificate issued by one department for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessCertificate {
    pub department: Department,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: CertificateStatus,
    #[serde(default)]
    pub priority: Option<CertificatePriority>,
}

impl FitnessCertificate {
    pub fn hours_until_expiry(&self, now: DateTime<Utc>) -> f64 {
        (self.expires_at - now).num_seconds() as f64 / 3600.0
    }

    /// Supplied priority, or one derived from the remaining validity window.
    pub fn effective_priority(&self, now: DateTime<Utc>) -> CertificatePriority {
        self.priority.unwrap_or_else(|| {
            CertificatePriority::from_hours_until_expiry(self.hours_until_expiry(now))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    RollingStock,
    #[serde(alias = "signaling")]
    Signalling,
    Telecom,
    Mechanical,
    Electrical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Critical,
    High,
    Medium,
    Low,
}

/// Open job card against a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub category: IssueCategory,
    pub severity: IssueSeverity,
    #[serde(default)]
    pub description: String,
    pub reported_at: DateTime<Utc>,
    #[serde(default)]
    pub estimated_resolution: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_technician: Option<String>,
}

/// Advertising wrap obligation carried by a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandingContract {
    pub advertiser: String,
    pub contract_hours: u32,
    pub completed_hours: u32,
}

impl BrandingContract {
    pub fn under_contract(&self) -> bool {
        self.completed_hours < self.contract_hours
    }
}

/// Operational state chosen for a vehicle for the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentCategory {
    Service,
    Standby,
    Maintenance,
    Cleaning,
}

impl AssignmentCategory {
    pub const ALL: [AssignmentCategory; 4] = [
        AssignmentCategory::Service,
        AssignmentCategory::Standby,
        AssignmentCategory::Maintenance,
        AssignmentCategory::Cleaning,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            AssignmentCategory::Service => "service",
            AssignmentCategory::Standby => "standby",
            AssignmentCategory::Maintenance => "maintenance",
            AssignmentCategory::Cleaning => "cleaning",
        }
    }
}

impl std::fmt::Display for AssignmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
