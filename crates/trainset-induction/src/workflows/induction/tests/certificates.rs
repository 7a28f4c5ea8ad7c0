use super::common::*;
use crate::workflows::induction::certificates::{
    min_hours_until_expiry, CertificateHealth, CertificateSummary,
};
use crate::workflows::induction::domain::{CertificatePriority, CertificateStatus, Department};
use chrono::Duration;

#[test]
fn summary_counts_each_status() {
    let certificates = vec![
        certificate(Department::RollingStock, CertificateStatus::Valid),
        certificate(Department::Signalling, CertificateStatus::Expired),
        certificate(Department::Telecom, CertificateStatus::Suspended),
        certificate(Department::Telecom, CertificateStatus::ExpiringSoon),
    ];

    let summary = CertificateSummary::from_certificates(&certificates);

    assert_eq!(summary.valid, 1);
    assert_eq!(summary.expired, 1);
    assert_eq!(summary.suspended, 1);
    assert_eq!(summary.expiring_soon, 1);
    assert_eq!(summary.disqualified(), 2);
    assert_eq!(summary.valid_departments, 1);
    assert_eq!(summary.health(), CertificateHealth::Critical);
}

#[test]
fn empty_collection_reports_no_valid_departments() {
    let summary = CertificateSummary::from_certificates(&[]);

    assert_eq!(summary, CertificateSummary::default());
    assert!(!summary.all_departments_valid());
    assert_eq!(summary.health(), CertificateHealth::AllValid);
}

#[test]
fn duplicate_department_is_only_valid_when_every_copy_is_valid() {
    let mut certificates = valid_certificates();
    certificates.push(certificate(
        Department::Signalling,
        CertificateStatus::ExpiringSoon,
    ));

    let summary = CertificateSummary::from_certificates(&certificates);

    assert_eq!(summary.valid, 3);
    assert_eq!(summary.valid_departments, 2);
    assert!(!summary.all_departments_valid());
    assert_eq!(summary.health(), CertificateHealth::Warning);
}

#[test]
fn full_valid_set_covers_every_department() {
    let summary = CertificateSummary::from_certificates(&valid_certificates());

    assert!(summary.all_departments_valid());
    assert_eq!(summary.health(), CertificateHealth::AllValid);
}

#[test]
fn shortest_window_drives_time_to_expiry() {
    let mut certificates = valid_certificates();
    certificates[1].expires_at = now() + Duration::hours(9);

    let hours = min_hours_until_expiry(&certificates, now()).expect("certificates present");

    assert!((hours - 9.0).abs() < 1e-9);
    assert_eq!(min_hours_until_expiry(&[], now()), None);
}

#[test]
fn priority_is_derived_from_remaining_window_when_missing() {
    let mut cert = certificate(Department::Telecom, CertificateStatus::ExpiringSoon);

    cert.expires_at = now() + Duration::hours(6);
    assert_eq!(cert.effective_priority(now()), CertificatePriority::Critical);

    cert.expires_at = now() + Duration::hours(20);
    assert_eq!(cert.effective_priority(now()), CertificatePriority::High);

    cert.expires_at = now() + Duration::hours(48);
    assert_eq!(cert.effective_priority(now()), CertificatePriority::Medium);

    cert.priority = Some(CertificatePriority::Critical);
    cert.expires_at = now() + Duration::days(90);
    assert_eq!(cert.effective_priority(now()), CertificatePriority::Critical);
}
