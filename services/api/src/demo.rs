use crate::infra::{parse_datetime, read_roster, InMemoryAlertPublisher};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::sync::Arc;
use trainset_induction::config::AppConfig;
use trainset_induction::error::AppError;
use trainset_induction::workflows::induction::{
    AssignmentCategory, BrandingContract, CertificateStatus, Department, FitnessCertificate,
    InductionPlanningService, Issue, IssueCategory, IssueSeverity, OperationalStatus,
    OptimizationResult, PlanOptions, PlanningPolicy, TrainsetSnapshot,
};

const STATIONS: [&str; 12] = [
    "Aluva",
    "Kalamassery",
    "Cusat",
    "Edapally",
    "Palarivattom",
    "Kaloor",
    "Town Hall",
    "MG Road",
    "Ernakulam South",
    "Kadavanthra",
    "Vyttila",
    "Muttom",
];

const ADVERTISERS: [&str; 5] = [
    "Coca-Cola",
    "Samsung",
    "Reliance",
    "BSNL",
    "Kerala Tourism",
];

const TECHNICIANS: [&str; 5] = [
    "Rajesh Kumar",
    "Priya Sharma",
    "Amit Patel",
    "Sneha Nair",
    "Vikram Singh",
];

const ISSUE_CATALOG: [(IssueCategory, &str); 10] = [
    (IssueCategory::RollingStock, "Brake system malfunction detected"),
    (IssueCategory::RollingStock, "Door mechanism requires calibration"),
    (IssueCategory::Signalling, "Signal reception issues detected"),
    (IssueCategory::Signalling, "GPS tracking system offline"),
    (IssueCategory::Telecom, "Passenger information display malfunction"),
    (IssueCategory::Telecom, "CCTV camera system offline"),
    (IssueCategory::Mechanical, "Hydraulic system pressure low"),
    (IssueCategory::Mechanical, "Wheel alignment issues detected"),
    (IssueCategory::Electrical, "Battery backup system needs replacement"),
    (IssueCategory::Electrical, "Voltage regulator malfunction"),
];

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// JSON file holding an array of vehicle snapshots
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Seed for the jitter stream; omit for a fresh random run
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Evaluation instant (RFC 3339). Defaults to now.
    #[arg(long, value_parser = parse_datetime)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of synthetic vehicles to plan
    #[arg(long, default_value_t = 25)]
    pub(crate) fleet_size: usize,
    /// Seed shared by the fleet generator and the planner
    #[arg(long, default_value_t = 2025)]
    pub(crate) seed: u64,
    /// Evaluation instant (RFC 3339). Defaults to now.
    #[arg(long, value_parser = parse_datetime)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let PlanArgs {
        input,
        seed,
        now,
        json,
    } = args;

    let config = AppConfig::load()?;
    let roster = read_roster(&input)?;
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let service = InductionPlanningService::new(alerts.clone(), config.planning)?;

    let result = service.plan(roster, PlanOptions { seed, now })?;
    print_result(&result, service.policy(), alerts.events().len(), json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        fleet_size,
        seed,
        now,
        json,
    } = args;

    let now = now.unwrap_or_else(Utc::now);
    let config = AppConfig::load()?;
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let service = InductionPlanningService::new(alerts.clone(), config.planning)?;

    let fleet = synthetic_fleet(fleet_size, seed, now);
    let result = service.plan(
        fleet,
        PlanOptions {
            seed: Some(seed),
            now: Some(now),
        },
    )?;

    if !json {
        println!("Induction planning demo ({fleet_size} synthetic trainsets, seed {seed})");
    }
    print_result(&result, service.policy(), alerts.events().len(), json)
}

fn print_result(
    result: &OptimizationResult,
    policy: &PlanningPolicy,
    alerts_raised: usize,
    json: bool,
) -> Result<(), AppError> {
    if json {
        println!("{}", render_json(result)?);
    } else {
        print!("{}", render_plan(result, policy, alerts_raised));
    }
    Ok(())
}

pub(crate) fn render_json(result: &OptimizationResult) -> Result<String, AppError> {
    serde_json::to_string_pretty(result).map_err(AppError::Render)
}

/// Builds a reproducible fleet resembling a nightly depot roster.
pub(crate) fn synthetic_fleet(size: usize, seed: u64, now: DateTime<Utc>) -> Vec<TrainsetSnapshot> {
    let mut rng = StdRng::seed_from_u64(seed);
    let today = now.date_naive();

    (0..size)
        .map(|index| synthetic_trainset(&mut rng, index, now, today))
        .collect()
}

fn synthetic_trainset(
    rng: &mut StdRng,
    index: usize,
    now: DateTime<Utc>,
    today: NaiveDate,
) -> TrainsetSnapshot {
    let status = match rng.random_range(0..5) {
        0 => OperationalStatus::Service,
        1 => OperationalStatus::Standby,
        2 => OperationalStatus::Maintenance,
        3 => OperationalStatus::Cleaning,
        _ => OperationalStatus::Inspection,
    };

    let fitness_certificates = Department::ALL
        .iter()
        .map(|department| synthetic_certificate(rng, *department, now))
        .collect();

    let current_issues = if rng.random_bool(0.4) {
        let (category, description) = ISSUE_CATALOG[rng.random_range(0..ISSUE_CATALOG.len())];
        let severity = match rng.random_range(0..4) {
            0 => IssueSeverity::Critical,
            1 => IssueSeverity::High,
            2 => IssueSeverity::Medium,
            _ => IssueSeverity::Low,
        };
        vec![Issue {
            id: format!("issue-{index}"),
            category,
            severity,
            description: description.to_string(),
            reported_at: now - Duration::minutes(rng.random_range(0..24 * 60)),
            estimated_resolution: Some(now + Duration::minutes(rng.random_range(0..24 * 60))),
            assigned_technician: rng
                .random_bool(0.7)
                .then(|| TECHNICIANS[rng.random_range(0..TECHNICIANS.len())].to_string()),
        }]
    } else {
        Vec::new()
    };

    let branding = rng.random_bool(0.4).then(|| BrandingContract {
        advertiser: ADVERTISERS[rng.random_range(0..ADVERTISERS.len())].to_string(),
        contract_hours: rng.random_range(100..600),
        completed_hours: rng.random_range(0..600),
    });

    TrainsetSnapshot {
        id: format!("train-{}", index + 1),
        number: format!("{:03}", index + 1),
        status,
        location: STATIONS[rng.random_range(0..STATIONS.len())].to_string(),
        mileage_km: rng.random_range(50_000..250_000),
        last_maintenance: today - Duration::days(rng.random_range(0..30)),
        next_maintenance: today + Duration::days(rng.random_range(0..30)),
        fitness_certificates,
        current_issues,
        branding,
    }
}

fn synthetic_certificate(
    rng: &mut StdRng,
    department: Department,
    now: DateTime<Utc>,
) -> FitnessCertificate {
    let roll: f64 = rng.random();
    let (status, expires_at) = if roll < 0.85 {
        (
            CertificateStatus::Valid,
            now + Duration::hours(rng.random_range(6..24 * 30)),
        )
    } else if roll < 0.93 {
        (
            CertificateStatus::ExpiringSoon,
            now + Duration::hours(rng.random_range(6..72)),
        )
    } else if roll < 0.97 {
        (
            CertificateStatus::Expired,
            now - Duration::hours(rng.random_range(1..24 * 10)),
        )
    } else {
        (
            CertificateStatus::Suspended,
            now + Duration::hours(rng.random_range(24..24 * 30)),
        )
    };

    FitnessCertificate {
        department,
        issued_at: expires_at - Duration::days(365),
        expires_at,
        status,
        priority: None,
    }
}

pub(crate) fn render_plan(
    result: &OptimizationResult,
    policy: &PlanningPolicy,
    alerts_raised: usize,
) -> String {
    let mut out = String::new();
    let counts = result.assignment_counts();
    let metrics = &result.metrics;

    out.push_str(&format!(
        "Plan computed at {}\n",
        result.timestamp.to_rfc3339()
    ));
    out.push_str(&format!(
        "- thresholds: service > {:.2} | cleaning > {:.2} | standby > {:.2}\n",
        policy.service_threshold, policy.cleaning_threshold, policy.standby_threshold
    ));
    out.push_str("Assignments:\n");
    for category in AssignmentCategory::ALL {
        out.push_str(&format!("  - {category}: {}\n", counts.get(category)));
    }

    out.push_str("Fleet metrics:\n");
    out.push_str(&format!(
        "  - service readiness {:.1}% | maintenance compliance {:.1}%\n",
        metrics.service_readiness, metrics.maintenance_compliance
    ));
    out.push_str(&format!(
        "  - branding compliance {:.1}% | mileage balance {:.1}% | overall {:.1}\n",
        metrics.branding_compliance, metrics.mileage_balance, metrics.overall_score
    ));

    out.push_str("Schedule:\n");
    for entry in &result.schedule {
        out.push_str(&format!(
            "  - {:<10} {:<11} readiness {:>3} | overall {:>3} | confidence {:.2}\n",
            entry.trainset_id.0,
            entry.assignment.label(),
            entry.service_readiness,
            entry.overall_score,
            entry.confidence
        ));
        if let Some(reason) = entry.reasoning.first() {
            out.push_str(&format!("      {reason}\n"));
        }
    }

    if result.conflicts.is_empty() {
        out.push_str("No conflicts detected.\n");
    } else {
        out.push_str(&format!(
            "Conflicts ({} critical, {alerts_raised} alert(s) raised):\n",
            result.critical_conflict_count()
        ));
        for conflict in &result.conflicts {
            out.push_str(&format!(
                "  - {}: {} -> {}\n",
                conflict.trainset_id, conflict.issue, conflict.resolution
            ));
        }
    }

    out
}
