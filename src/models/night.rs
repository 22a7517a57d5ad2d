use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MovieId, VoteLedger};

/// Voting phase of a movie night
///
/// Phases advance monotonically Draft → Voting → Completed; the only backward
/// edge is an explicit reopen from Completed to Voting. Deletion removes the
/// record from the store entirely rather than storing a terminal phase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Named, collecting candidates; no ledger entries yet
    Draft,
    /// Ballot frozen open: votes accepted, candidates may still change
    Voting,
    /// Voting finished; winner frozen until an explicit reopen
    Completed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Draft => write!(f, "draft"),
            Phase::Voting => write!(f, "voting"),
            Phase::Completed => write!(f, "completed"),
        }
    }
}

/// A collaborative movie night record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieNight {
    /// Unique identifier, assigned at creation, immutable
    pub id: Uuid,
    /// Display name, non-empty
    pub name: String,
    /// Candidate movie ids in selection order, duplicate-free
    pub candidate_ids: Vec<MovieId>,
    /// Per-candidate tallies and voter sets; keys are a subset of `candidate_ids`
    pub ledger: VoteLedger,
    /// Current voting phase
    pub phase: Phase,
    /// Winning candidate, present only while `phase` is Completed
    pub winner_id: Option<MovieId>,
    /// Short public token for external lookup, assigned once, immutable
    pub share_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MovieNight {
    /// Creates a new movie night in Draft with no candidates
    pub fn new(name: impl Into<String>, share_code: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            candidate_ids: Vec::new(),
            ledger: VoteLedger::new(),
            phase: Phase::Draft,
            winner_id: None,
            share_code: share_code.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// True if the movie is already on the candidate list
    pub fn has_candidate(&self, movie_id: &str) -> bool {
        self.candidate_ids.iter().any(|id| id == movie_id)
    }

    /// Refreshes `updated_at`; call before persisting any mutation
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
