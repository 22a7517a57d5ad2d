use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{LedgerEntry, Movie, MovieId, MovieNight, Phase, VoteDirection};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateNightRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameNightRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddCandidateRequest {
    pub movie_id: MovieId,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub candidate_id: MovieId,
    pub participant_id: String,
    pub direction: VoteDirection,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

#[derive(Debug, Serialize)]
pub struct NightResponse {
    pub id: Uuid,
    pub name: String,
    pub phase: Phase,
    pub candidate_ids: Vec<MovieId>,
    pub ledger: HashMap<MovieId, LedgerEntry>,
    pub winner_id: Option<MovieId>,
    pub share_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&MovieNight> for NightResponse {
    fn from(night: &MovieNight) -> Self {
        Self {
            id: night.id,
            name: night.name.clone(),
            phase: night.phase,
            candidate_ids: night.candidate_ids.clone(),
            ledger: night.ledger.snapshot(),
            winner_id: night.winner_id.clone(),
            share_code: night.share_code.clone(),
            created_at: night.created_at,
            updated_at: night.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddCandidateResponse {
    pub night: NightResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub night: NightResponse,
    pub candidate_id: MovieId,
    pub tally: i32,
    pub voter_count: usize,
}

// Handlers

/// Create a new movie night
pub async fn create_night(
    State(state): State<AppState>,
    Json(request): Json<CreateNightRequest>,
) -> AppResult<(StatusCode, Json<NightResponse>)> {
    let night = state.nights.create_night(&request.name).await?;
    Ok((StatusCode::CREATED, Json(NightResponse::from(&night))))
}

/// List all movie nights, newest first
pub async fn list_nights(State(state): State<AppState>) -> AppResult<Json<Vec<NightResponse>>> {
    let nights = state.nights.list_nights().await?;
    Ok(Json(nights.iter().map(NightResponse::from).collect()))
}

/// Get the full snapshot for one movie night
pub async fn get_night(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NightResponse>> {
    let night = state.nights.get_snapshot(id).await?;
    Ok(Json(NightResponse::from(&night)))
}

/// Look a movie night up by its public share code
pub async fn get_night_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<NightResponse>> {
    let night = state.nights.get_by_share_code(&code).await?;
    Ok(Json(NightResponse::from(&night)))
}

/// Rename a movie night
pub async fn rename_night(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RenameNightRequest>,
) -> AppResult<Json<NightResponse>> {
    let night = state.nights.rename(id, &request.name).await?;
    Ok(Json(NightResponse::from(&night)))
}

/// Delete a movie night
pub async fn delete_night(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.nights.delete_night(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a candidate movie to the ballot
pub async fn add_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddCandidateRequest>,
) -> AppResult<Json<AddCandidateResponse>> {
    let (night, warning) = state.nights.add_candidate(id, &request.movie_id).await?;
    Ok(Json(AddCandidateResponse {
        night: NightResponse::from(&night),
        warning,
    }))
}

/// Remove a candidate movie from the ballot
pub async fn remove_candidate(
    State(state): State<AppState>,
    Path((id, movie_id)): Path<(Uuid, String)>,
) -> AppResult<Json<NightResponse>> {
    let night = state.nights.remove_candidate(id, &movie_id).await?;
    Ok(Json(NightResponse::from(&night)))
}

/// Open voting on a movie night
pub async fn start_voting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NightResponse>> {
    let night = state.nights.start_voting(id).await?;
    Ok(Json(NightResponse::from(&night)))
}

/// Cast one participant's vote for a candidate
pub async fn cast_vote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<VoteRequest>,
) -> AppResult<Json<VoteResponse>> {
    let (night, entry) = state
        .nights
        .vote(
            id,
            &request.candidate_id,
            &request.participant_id,
            request.direction,
        )
        .await?;
    Ok(Json(VoteResponse {
        night: NightResponse::from(&night),
        candidate_id: request.candidate_id,
        tally: entry.tally,
        voter_count: entry.voters.len(),
    }))
}

/// Close voting and freeze the winner
pub async fn finish_voting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NightResponse>> {
    let night = state.nights.finish_voting(id).await?;
    Ok(Json(NightResponse::from(&night)))
}

/// Reopen voting on a completed movie night
pub async fn reopen_voting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NightResponse>> {
    let night = state.nights.reopen_voting(id).await?;
    Ok(Json(NightResponse::from(&night)))
}

/// Get a catalog movie by id
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Movie>> {
    let movie = state
        .catalog
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("movie {}", id)))?;
    Ok(Json(movie))
}

/// Search catalog movies by title or genre
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.catalog.search(&params.q).await?;
    Ok(Json(movies))
}
