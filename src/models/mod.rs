pub mod ledger;
pub mod movie;
pub mod night;

pub use ledger::{LedgerEntry, LedgerError, VoteDirection, VoteLedger};
pub use movie::Movie;
pub use night::{MovieNight, Phase};

/// Identifier for a catalog movie, opaque to the voting core
pub type MovieId = String;

/// Identifier for a voting member of a movie night group
pub type ParticipantId = String;
