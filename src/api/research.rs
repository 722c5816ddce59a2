use axum::{Json, extract::State};
use std::sync::Arc;

use super::{
    AppState,
    error::ApiError,
    types::{ResearchRequest, ResearchResponse},
};

pub async fn research(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>, ApiError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(ApiError::validation("Please provide a legal question."));
    }

    let result = state.shared.research.run(question).await?;

    Ok(Json(ResearchResponse {
        result,
        success: true,
    }))
}
