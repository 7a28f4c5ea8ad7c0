use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CertificateStatus, Department, FitnessCertificate};

/// Per-status tally of a vehicle's fitness certificates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSummary {
    pub valid: usize,
    pub expiring_soon: usize,
    pub expired: usize,
    pub suspended: usize,
    /// Departments whose certificates are present and all `valid`.
    pub valid_departments: u8,
}

impl CertificateSummary {
    pub fn from_certificates(certificates: &[FitnessCertificate]) -> Self {
        let mut summary = CertificateSummary::default();

        for certificate in certificates {
            match certificate.status {
                CertificateStatus::Valid => summary.valid += 1,
                CertificateStatus::ExpiringSoon => summary.expiring_soon += 1,
                CertificateStatus::Expired => summary.expired += 1,
                CertificateStatus::Suspended => summary.suspended += 1,
            }
        }

        summary.valid_departments = Department::ALL
            .iter()
            .filter(|department| {
                let mut held = certificates
                    .iter()
                    .filter(|certificate| certificate.department == **department)
                    .peekable();
                held.peek().is_some()
                    && held.all(|certificate| certificate.status == CertificateStatus::Valid)
            })
            .count() as u8;

        summary
    }

    pub fn disqualified(&self) -> usize {
        self.expired + self.suspended
    }

    pub fn all_departments_valid(&self) -> bool {
        self.valid_departments as usize == Department::ALL.len()
    }

    pub fn health(&self) -> CertificateHealth {
        if self.disqualified() > 0 {
            CertificateHealth::Critical
        } else if self.expiring_soon > 0 {
            CertificateHealth::Warning
        } else {
            CertificateHealth::AllValid
        }
    }
}

/// Roll-up label used by dashboards to colour a vehicle's certificate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateHealth {
    Critical,
    Warning,
    AllValid,
}

/// Shortest remaining validity across every certificate, in hours.
///
/// Returns `None` when the vehicle carries no certificates at all.
pub fn min_hours_until_expiry(
    certificates: &[FitnessCertificate],
    now: DateTime<Utc>,
) -> Option<f64> {
    certificates
        .iter()
        .map(|certificate| certificate.hours_until_expiry(now))
        .fold(None, |shortest, hours| match shortest {
            Some(current) if current <= hours => Some(current),
            _ => Some(hours),
        })
}
