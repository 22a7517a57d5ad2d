use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{LedgerEntry, LedgerError, MovieNight, Phase, VoteDirection, VoteLedger},
    store::{Catalog, NightStore},
};

use super::{resolver, ShareCodeIssuer};

/// State machine governing the movie night lifecycle
///
/// Owns transition legality for Draft → Voting → Completed, delegates vote
/// accounting to the ledger, asks the resolver for the outcome on finish, and
/// persists every effect-producing transition through the injected store
/// before returning success.
///
/// Concurrency model: single writer per record. Each night id maps to its own
/// async mutex and every read-modify-write cycle runs under that lock, so
/// concurrent votes for the same candidate cannot race on the voter-set
/// insertion and tally increment. Operations on different nights proceed
/// independently.
pub struct MovieNightService {
    store: Arc<dyn NightStore>,
    catalog: Arc<dyn Catalog>,
    issuer: ShareCodeIssuer,
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl MovieNightService {
    /// Creates a lifecycle service over the given store and catalog
    pub fn new(
        store: Arc<dyn NightStore>,
        catalog: Arc<dyn Catalog>,
        issuer: ShareCodeIssuer,
    ) -> Self {
        Self {
            store,
            catalog,
            issuer,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a new movie night in Draft with a fresh id and share code
    pub async fn create_night(&self, name: &str) -> AppResult<MovieNight> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "movie night name must not be empty".to_string(),
            ));
        }

        let share_code = self.issuer.issue(self.store.as_ref()).await?;
        let night = MovieNight::new(name, share_code);
        let night = self.store.create(night).await?;

        tracing::info!(night_id = %night.id, name = %night.name, "movie night created");
        Ok(night)
    }

    /// Appends a candidate to the ballot
    ///
    /// Legal in Draft and Voting; during Voting the candidate also gets a
    /// zeroed ledger entry. Adding an id already on the ballot is a no-op
    /// success. The catalog is consulted for validation only: an unknown movie
    /// id is stored anyway and reported back as a warning.
    pub async fn add_candidate(
        &self,
        night_id: Uuid,
        movie_id: &str,
    ) -> AppResult<(MovieNight, Option<String>)> {
        let lock = self.record_lock(night_id).await;
        let _guard = lock.lock().await;

        let mut night = self.store.get(night_id).await?;
        ensure_phase(&night, &[Phase::Draft, Phase::Voting], "add a candidate")?;

        let warning = if self.catalog.get_by_id(movie_id).await?.is_none() {
            tracing::warn!(night_id = %night_id, movie_id, "candidate not found in catalog");
            Some(format!("movie {} not found in catalog", movie_id))
        } else {
            None
        };

        if night.has_candidate(movie_id) {
            return Ok((night, warning));
        }

        night.candidate_ids.push(movie_id.to_string());
        if night.phase == Phase::Voting {
            night.ledger.add_candidate(movie_id);
        }
        night.touch();
        let night = self.store.update(night).await?;

        tracing::info!(night_id = %night_id, movie_id, "candidate added");
        Ok((night, warning))
    }

    /// Removes a candidate and drops its ledger entry
    pub async fn remove_candidate(&self, night_id: Uuid, movie_id: &str) -> AppResult<MovieNight> {
        let lock = self.record_lock(night_id).await;
        let _guard = lock.lock().await;

        let mut night = self.store.get(night_id).await?;
        ensure_phase(&night, &[Phase::Draft, Phase::Voting], "remove a candidate")?;

        let position = night
            .candidate_ids
            .iter()
            .position(|id| id == movie_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "candidate {} on movie night {}",
                    movie_id, night_id
                ))
            })?;

        night.candidate_ids.remove(position);
        night.ledger.remove_candidate(movie_id);
        night.touch();
        let night = self.store.update(night).await?;

        tracing::info!(night_id = %night_id, movie_id, "candidate removed");
        Ok(night)
    }

    /// Opens voting: initializes the ledger for every candidate
    pub async fn start_voting(&self, night_id: Uuid) -> AppResult<MovieNight> {
        let lock = self.record_lock(night_id).await;
        let _guard = lock.lock().await;

        let mut night = self.store.get(night_id).await?;
        ensure_phase(&night, &[Phase::Draft], "start voting")?;
        if night.candidate_ids.is_empty() {
            return Err(AppError::InvalidInput(format!(
                "movie night {} has no candidates to vote on",
                night_id
            )));
        }

        night.ledger = VoteLedger::initialize(&night.candidate_ids);
        night.phase = Phase::Voting;
        night.touch();
        let night = self.store.update(night).await?;

        tracing::info!(
            night_id = %night_id,
            candidates = night.candidate_ids.len(),
            "voting started"
        );
        Ok(night)
    }

    /// Casts one participant's vote for a candidate
    pub async fn vote(
        &self,
        night_id: Uuid,
        candidate_id: &str,
        participant_id: &str,
        direction: VoteDirection,
    ) -> AppResult<(MovieNight, LedgerEntry)> {
        let lock = self.record_lock(night_id).await;
        let _guard = lock.lock().await;

        let mut night = self.store.get(night_id).await?;
        ensure_phase(&night, &[Phase::Voting], "vote")?;

        let entry = night
            .ledger
            .cast_vote(candidate_id, participant_id, direction)
            .map_err(|e| ledger_error(night_id, e))?;
        night.touch();
        let night = self.store.update(night).await?;

        tracing::info!(
            night_id = %night_id,
            candidate_id,
            participant_id,
            tally = entry.tally,
            "vote recorded"
        );
        Ok((night, entry))
    }

    /// Closes voting and freezes the winner
    pub async fn finish_voting(&self, night_id: Uuid) -> AppResult<MovieNight> {
        let lock = self.record_lock(night_id).await;
        let _guard = lock.lock().await;

        let mut night = self.store.get(night_id).await?;
        ensure_phase(&night, &[Phase::Voting], "finish voting")?;

        night.winner_id = resolver::resolve(&night.ledger, &night.candidate_ids);
        night.phase = Phase::Completed;
        night.touch();
        let night = self.store.update(night).await?;

        tracing::info!(
            night_id = %night_id,
            winner_id = night.winner_id.as_deref().unwrap_or("none"),
            "voting finished"
        );
        Ok(night)
    }

    /// Reopens a completed night: winner cleared, ledger preserved
    pub async fn reopen_voting(&self, night_id: Uuid) -> AppResult<MovieNight> {
        let lock = self.record_lock(night_id).await;
        let _guard = lock.lock().await;

        let mut night = self.store.get(night_id).await?;
        ensure_phase(&night, &[Phase::Completed], "reopen voting")?;

        night.winner_id = None;
        night.phase = Phase::Voting;
        night.touch();
        let night = self.store.update(night).await?;

        tracing::info!(night_id = %night_id, "voting reopened");
        Ok(night)
    }

    /// Renames a movie night
    pub async fn rename(&self, night_id: Uuid, name: &str) -> AppResult<MovieNight> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "movie night name must not be empty".to_string(),
            ));
        }

        let lock = self.record_lock(night_id).await;
        let _guard = lock.lock().await;

        let mut night = self.store.get(night_id).await?;
        night.name = name.to_string();
        night.touch();
        let night = self.store.update(night).await?;

        tracing::info!(night_id = %night_id, name, "movie night renamed");
        Ok(night)
    }

    /// Deletes a movie night irreversibly
    pub async fn delete_night(&self, night_id: Uuid) -> AppResult<()> {
        let lock = self.record_lock(night_id).await;
        let _guard = lock.lock().await;

        self.store.delete(night_id).await?;
        drop(_guard);
        self.locks.lock().await.remove(&night_id);

        tracing::info!(night_id = %night_id, "movie night deleted");
        Ok(())
    }

    /// Returns the full record including ledger and winner
    pub async fn get_snapshot(&self, night_id: Uuid) -> AppResult<MovieNight> {
        self.store.get(night_id).await
    }

    /// Looks a night up by its public share code
    pub async fn get_by_share_code(&self, code: &str) -> AppResult<MovieNight> {
        self.store
            .find_by_share_code(code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("movie night with share code {}", code)))
    }

    /// Lists all movie nights, newest first
    pub async fn list_nights(&self) -> AppResult<Vec<MovieNight>> {
        self.store.list().await
    }

    /// Fetches or creates the mutex serializing writers for one night
    async fn record_lock(&self, night_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(night_id).or_default().clone()
    }
}

fn ensure_phase(night: &MovieNight, allowed: &[Phase], action: &'static str) -> AppResult<()> {
    if allowed.contains(&night.phase) {
        Ok(())
    } else {
        Err(AppError::InvalidState {
            night_id: night.id,
            phase: night.phase,
            action,
        })
    }
}

fn ledger_error(night_id: Uuid, err: LedgerError) -> AppError {
    match err {
        LedgerError::UnknownCandidate(candidate_id) => AppError::UnknownCandidate {
            night_id,
            candidate_id,
        },
        LedgerError::DuplicateVote {
            candidate_id,
            participant_id,
        } => AppError::DuplicateVote {
            night_id,
            candidate_id,
            participant_id,
        },
    }
}
