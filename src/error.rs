use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::models::Phase;

/// Application-level errors
///
/// All variants are local, recoverable failures reported to the caller with
/// enough context (night id, candidate id, participant id) to render a
/// user-facing message; none are fatal to the process.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("movie night {night_id}: cannot {action} while {phase}")]
    InvalidState {
        night_id: Uuid,
        phase: Phase,
        action: &'static str,
    },

    #[error("movie night {night_id}: candidate {candidate_id} is not on the ballot")]
    UnknownCandidate {
        night_id: Uuid,
        candidate_id: String,
    },

    #[error("movie night {night_id}: participant {participant_id} already voted for candidate {candidate_id}")]
    DuplicateVote {
        night_id: Uuid,
        candidate_id: String,
        participant_id: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("share code space exhausted after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::UnknownCandidate { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidState { .. }
            | AppError::DuplicateVote { .. }
            | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::CodeSpaceExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
