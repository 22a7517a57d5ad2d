use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{MovieId, ParticipantId};

/// Direction of a single vote
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Tally adjustment for this direction
    pub fn delta(&self) -> i32 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

/// Error types for ledger operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("candidate {0} is not on the ballot")]
    UnknownCandidate(MovieId),
    #[error("participant {participant_id} already voted for candidate {candidate_id}")]
    DuplicateVote {
        candidate_id: MovieId,
        participant_id: ParticipantId,
    },
}

/// Vote tally and voter set for a single candidate
///
/// Tallies may go negative: down-votes subtract and there is no floor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Net vote count (up-votes minus down-votes)
    pub tally: i32,
    /// Participants who have voted for this candidate
    pub voters: HashSet<ParticipantId>,
}

/// Per-night mapping of candidate to vote tally and voter set
///
/// Enforces at-most-one-vote-per-participant-per-candidate. The voter-set
/// insertion and tally adjustment happen inside a single `&mut self` call, so
/// they are atomic as long as the owning record is mutated by one writer at a
/// time (the lifecycle service serializes writers per night).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct VoteLedger {
    entries: HashMap<MovieId, LedgerEntry>,
}

impl VoteLedger {
    /// Creates an empty ledger (a night still in Draft has no entries)
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger with a zero tally and empty voter set per candidate
    pub fn initialize(candidate_ids: &[MovieId]) -> Self {
        Self {
            entries: candidate_ids
                .iter()
                .map(|id| (id.clone(), LedgerEntry::default()))
                .collect(),
        }
    }

    /// Adds a zeroed entry for a candidate attached mid-vote; no-op if present
    pub fn add_candidate(&mut self, candidate_id: &str) {
        self.entries.entry(candidate_id.to_string()).or_default();
    }

    /// Drops a candidate's entry, returning whether one existed
    pub fn remove_candidate(&mut self, candidate_id: &str) -> bool {
        self.entries.remove(candidate_id).is_some()
    }

    /// Returns the entry for a candidate, if it is on the ballot
    pub fn entry(&self, candidate_id: &str) -> Option<&LedgerEntry> {
        self.entries.get(candidate_id)
    }

    /// Number of candidates on the ballot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no candidate has a ledger entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a vote for a candidate
    ///
    /// Fails with `UnknownCandidate` if the candidate has no entry and with
    /// `DuplicateVote` if the participant already voted for it; a rejected
    /// vote leaves the tally untouched. Returns a copy of the updated entry.
    pub fn cast_vote(
        &mut self,
        candidate_id: &str,
        participant_id: &str,
        direction: VoteDirection,
    ) -> Result<LedgerEntry, LedgerError> {
        let entry = self
            .entries
            .get_mut(candidate_id)
            .ok_or_else(|| LedgerError::UnknownCandidate(candidate_id.to_string()))?;

        if entry.voters.contains(participant_id) {
            return Err(LedgerError::DuplicateVote {
                candidate_id: candidate_id.to_string(),
                participant_id: participant_id.to_string(),
            });
        }

        entry.voters.insert(participant_id.to_string());
        entry.tally += direction.delta();

        Ok(entry.clone())
    }

    /// Returns an immutable copy of the full ledger; side-effect free
    pub fn snapshot(&self) -> HashMap<MovieId, LedgerEntry> {
        self.entries.clone()
    }
}
