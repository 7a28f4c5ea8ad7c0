use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::alerts::AlertPublisher;
use super::domain::TrainsetSnapshot;
use super::service::{InductionPlanningService, PlanOptions, PlanningServiceError};

/// Body accepted by the planning endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub vehicles: Vec<TrainsetSnapshot>,
    #[serde(flatten)]
    pub options: PlanOptions,
}

/// Router builder exposing HTTP endpoints for induction planning.
pub fn induction_router<A>(service: Arc<InductionPlanningService<A>>) -> Router
where
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/induction/plan", post(plan_handler::<A>))
        .route("/api/v1/induction/policy", get(policy_handler::<A>))
        .with_state(service)
}

pub(crate) async fn plan_handler<A>(
    State(service): State<Arc<InductionPlanningService<A>>>,
    axum::Json(request): axum::Json<PlanRequest>,
) -> Response
where
    A: AlertPublisher + 'static,
{
    match service.plan(request.vehicles, request.options) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(PlanningServiceError::Intake(violation)) => {
            let payload = json!({
                "error": violation.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn policy_handler<A>(
    State(service): State<Arc<InductionPlanningService<A>>>,
) -> Response
where
    A: AlertPublisher + 'static,
{
    (StatusCode::OK, axum::Json(service.policy().clone())).into_response()
}
