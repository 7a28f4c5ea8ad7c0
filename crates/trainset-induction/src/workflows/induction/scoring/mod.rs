mod config;
mod policy;
mod readiness;
mod rules;

pub use config::{PlanningPolicy, PolicyError, SuitabilityWeights};
pub use policy::Disqualification;
pub use readiness::{score_readiness, ReadinessScores};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::certificates::CertificateSummary;
use super::domain::{AssignmentCategory, Trainset, TrainsetId};
use super::jitter::{draw, JitterSource};
use policy::{disqualify, threshold_assignment};

/// Stateless classifier applying the planning policy to one vehicle at a time.
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    policy: PlanningPolicy,
}

impl AssignmentEngine {
    pub fn new(policy: PlanningPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PlanningPolicy {
        &self.policy
    }

    /// Classify a vehicle, explain the decision, and score it under the chosen assignment.
    pub fn classify(
        &self,
        trainset: &Trainset,
        jitter: &mut dyn JitterSource,
        now: DateTime<Utc>,
    ) -> TrainsetAssignment {
        let summary = CertificateSummary::from_certificates(&trainset.fitness_certificates);

        let (assignment, reasoning, suitability, components) =
            match disqualify(trainset, &summary) {
                Some(disqualification) => (
                    AssignmentCategory::Maintenance,
                    disqualification.reasons(),
                    None,
                    Vec::new(),
                ),
                None => {
                    let scored =
                        rules::score_suitability(trainset, &summary, &self.policy, draw(jitter));
                    let (category, explanation) = threshold_assignment(scored.total, &self.policy);
                    let mut reasoning: Vec<String> = scored
                        .strengths
                        .iter()
                        .map(|strength| strength.to_string())
                        .collect();
                    reasoning.push(explanation);
                    (category, reasoning, Some(scored.total), scored.components)
                }
            };

        let confidence = self.policy.confidence_for(draw(jitter));
        let scores = score_readiness(
            trainset,
            &summary,
            assignment,
            &self.policy,
            now.date_naive(),
        );

        debug!(
            trainset = %trainset.id,
            assignment = assignment.label(),
            confidence,
            service_readiness = scores.service_readiness,
            overall_score = scores.overall_score,
            "trainset classified"
        );

        TrainsetAssignment {
            trainset_id: trainset.id.clone(),
            assignment,
            reasoning,
            confidence,
            service_readiness: scores.service_readiness,
            overall_score: scores.overall_score,
            suitability,
            components,
        }
    }

    /// Scores a vehicle under an arbitrary assignment, e.g. to ask "what if it ran in service".
    pub fn readiness(
        &self,
        trainset: &Trainset,
        category: AssignmentCategory,
        now: DateTime<Utc>,
    ) -> ReadinessScores {
        let summary = CertificateSummary::from_certificates(&trainset.fitness_certificates);
        score_readiness(trainset, &summary, category, &self.policy, now.date_naive())
    }
}

/// Terms that make up the suitability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuitabilityFactor {
    Jitter,
    Mileage,
    IssueLoad,
    Branding,
    CertificateHealth,
}

/// Discrete contribution to a suitability score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityComponent {
    pub factor: SuitabilityFactor,
    pub weight: f64,
    pub notes: String,
}

/// Per-vehicle decision with its explanation trail and quality scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainsetAssignment {
    pub trainset_id: TrainsetId,
    pub assignment: AssignmentCategory,
    pub reasoning: Vec<String>,
    pub confidence: f64,
    pub service_readiness: u8,
    pub overall_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suitability: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<SuitabilityComponent>,
}
