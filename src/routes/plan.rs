//! Project plan generation endpoint.
//!
//! The one slow operation is the model call; the handler awaits it exactly
//! once, with no streaming and no retry. Everything on either side of it is
//! a pure transform over the request and the raw response text.

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::response::SuccessResponse;
use crate::app::AppState;
use crate::domain::ProjectRequest;
use crate::error::{ApiError, ApiResult};
use crate::plan::{build_prompt, normalize_plan, SYSTEM_PROMPT};

/// Generate a carpentry project plan.
///
/// POST /api/project-plan
pub async fn generate_project_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProjectRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.project_type.trim().is_empty() {
        return Err(ApiError::MissingField("projectType"));
    }

    let client = state
        .openai
        .as_ref()
        .ok_or(ApiError::Configuration("OpenAI API key is not configured"))?;

    let prompt = build_prompt(&request);
    let raw = client.chat_json(SYSTEM_PROMPT, &prompt).await?;
    let plan = normalize_plan(&raw, &request)?;

    tracing::info!(
        project_type = %request.project_type,
        steps = plan.steps.len(),
        parts = plan.parts.len(),
        "Project plan generated"
    );

    Ok(Json(SuccessResponse::new(plan)))
}
