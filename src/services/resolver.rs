use crate::models::{MovieId, VoteLedger};

/// Computes the winning candidate from a ledger snapshot
///
/// Ties on the maximum tally are broken by the earliest position in
/// `candidate_order` (the original selection order), so the result never
/// depends on the iteration order of the ledger's underlying map. Candidates
/// in the order without a ledger entry are skipped; an empty order yields no
/// winner. Pure: never mutates its inputs.
pub fn resolve(ledger: &VoteLedger, candidate_order: &[MovieId]) -> Option<MovieId> {
    let mut winner: Option<(&MovieId, i32)> = None;

    for candidate_id in candidate_order {
        let Some(entry) = ledger.entry(candidate_id) else {
            continue;
        };
        // Strictly-greater keeps the earliest candidate on ties
        match winner {
            Some((_, best)) if entry.tally <= best => {}
            _ => winner = Some((candidate_id, entry.tally)),
        }
    }

    winner.map(|(id, _)| id.clone())
}
