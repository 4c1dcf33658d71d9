//! Per-participant stake records.

use concert_types::Timestamp;
use serde::{Deserialize, Serialize};

/// One participant's open staking position.
///
/// A record exists only while `principal > 0` — a full withdrawal
/// removes the record rather than zeroing it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StakeRecord {
    /// Amount of token currently staked, in the token's smallest unit.
    pub principal: u128,

    /// When the current position began accruing. Reset whenever the
    /// time-based reward up to that moment has been settled (partial
    /// withdrawal, or restake under the settle-then-reset policy).
    pub staked_at: Timestamp,
}

impl StakeRecord {
    pub fn new(principal: u128, staked_at: Timestamp) -> Self {
        Self {
            principal,
            staked_at,
        }
    }
}
