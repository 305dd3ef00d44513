//! `/api/ai` endpoints.

use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use service_core::error::AppError;
use service_core::extract::ApiJson;
use validator::{Validate, ValidationError};

use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct AskRequest {
    #[validate(custom(function = "non_blank", message = "Question is required"))]
    pub question: String,
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Forward a question and relay the upstream body untouched.
pub async fn ask(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AskRequest>,
) -> Result<Response, AppError> {
    request.validate()?;

    let body = state.gemini.ask(&request.question).await?;

    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}
