use rand::{distributions::Alphanumeric, Rng};

use crate::{
    error::{AppError, AppResult},
    store::NightStore,
};

/// Generates unique share codes for movie nights
///
/// Codes are fixed-length alphanumeric tokens. A freshly rolled code is
/// checked against the live store and re-rolled on collision, up to a bounded
/// attempt count; exhausting the attempts is reported as `CodeSpaceExhausted`
/// rather than looping silently. With the default 9-character code the budget
/// is practically unreachable.
#[derive(Debug, Clone)]
pub struct ShareCodeIssuer {
    length: usize,
    max_attempts: u32,
}

impl ShareCodeIssuer {
    /// Creates an issuer producing codes of the given length
    pub fn new(length: usize, max_attempts: u32) -> Self {
        Self {
            length,
            max_attempts,
        }
    }

    /// Rolls a code, re-rolling on collision against the live store
    pub async fn issue(&self, store: &dyn NightStore) -> AppResult<String> {
        for attempt in 1..=self.max_attempts {
            let code = self.generate();
            if store.find_by_share_code(&code).await?.is_none() {
                return Ok(code);
            }
            tracing::warn!(attempt, code, "share code collision, re-rolling");
        }

        Err(AppError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    fn generate(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

impl Default for ShareCodeIssuer {
    fn default() -> Self {
        Self::new(9, 16)
    }
}
