use std::collections::BTreeSet;

use super::domain::{Department, Trainset, TrainsetId, TrainsetSnapshot};

/// Validation errors raised while admitting roster snapshots into a planning run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("trainset at roster position {position} is missing an identifier")]
    MissingIdentifier { position: usize },
    #[error("trainset {id} is missing a display number")]
    MissingNumber { id: String },
    #[error("trainset {id} reports negative mileage ({mileage_km} km)")]
    NegativeMileage { id: String, mileage_km: i64 },
    #[error("trainset {id} reports mileage {mileage_km} km beyond the supported range")]
    MileageOutOfRange { id: String, mileage_km: i64 },
    #[error("trainset {id} has a {department} certificate that expires before it was issued")]
    InvertedCertificateWindow {
        id: String,
        department: &'static str,
    },
    #[error("trainset {id} has an issue without an identifier")]
    MissingIssueIdentifier { id: String },
    #[error("trainset {id} appears more than once in the roster")]
    DuplicateTrainset { id: String },
}

/// Guard responsible for producing engine-ready `Trainset` records.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// Convert one roster snapshot into a validated trainset.
    pub fn trainset_from_snapshot(
        &self,
        position: usize,
        snapshot: TrainsetSnapshot,
    ) -> Result<Trainset, IntakeViolation> {
        let id = snapshot.id.trim().to_string();
        if id.is_empty() {
            return Err(IntakeViolation::MissingIdentifier { position });
        }

        if snapshot.number.trim().is_empty() {
            return Err(IntakeViolation::MissingNumber { id });
        }

        if snapshot.mileage_km < 0 {
            return Err(IntakeViolation::NegativeMileage {
                id,
                mileage_km: snapshot.mileage_km,
            });
        }
        let mileage_km =
            u32::try_from(snapshot.mileage_km).map_err(|_| IntakeViolation::MileageOutOfRange {
                id: id.clone(),
                mileage_km: snapshot.mileage_km,
            })?;

        if let Some(certificate) = snapshot
            .fitness_certificates
            .iter()
            .find(|certificate| certificate.expires_at < certificate.issued_at)
        {
            return Err(IntakeViolation::InvertedCertificateWindow {
                id,
                department: Department::label(certificate.department),
            });
        }

        if snapshot
            .current_issues
            .iter()
            .any(|issue| issue.id.trim().is_empty())
        {
            return Err(IntakeViolation::MissingIssueIdentifier { id });
        }

        Ok(Trainset {
            id: TrainsetId(id),
            number: snapshot.number.trim().to_string(),
            status: snapshot.status,
            location: snapshot.location,
            mileage_km,
            last_maintenance: snapshot.last_maintenance,
            next_maintenance: snapshot.next_maintenance,
            fitness_certificates: snapshot.fitness_certificates,
            current_issues: snapshot.current_issues,
            branding: snapshot.branding,
        })
    }

    /// Validate a full roster; the first violation aborts the whole run.
    pub fn admit_fleet(
        &self,
        snapshots: Vec<TrainsetSnapshot>,
    ) -> Result<Vec<Trainset>, IntakeViolation> {
        let mut seen = BTreeSet::new();
        let mut fleet = Vec::with_capacity(snapshots.len());

        for (position, snapshot) in snapshots.into_iter().enumerate() {
            let trainset = self.trainset_from_snapshot(position, snapshot)?;
            if !seen.insert(trainset.id.clone()) {
                return Err(IntakeViolation::DuplicateTrainset {
                    id: trainset.id.0,
                });
            }
            fleet.push(trainset);
        }

        Ok(fleet)
    }
}
