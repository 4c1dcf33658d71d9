//! Reward parameters — the immutable configuration of the accrual formula.
//!
//! Reward for withdrawing `amount` tokens after `elapsed` seconds is
//! `(amount × rate_per_token + elapsed × rate_per_second) / scale`,
//! floor division. The three constants are fixed at deployment and never
//! derived — changing them means deploying a new ledger.

use serde::{Deserialize, Serialize};

/// What happens when a participant stakes again on top of an existing
/// position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestakePolicy {
    /// Settle the reward accrued so far (paid out from the reward pool),
    /// then merge the new principal with the accrual clock reset.
    /// Nothing earned is forfeited.
    #[default]
    SettleThenReset,
    /// Merge the new principal and reset the accrual clock without
    /// settling — the time component earned so far is forfeited.
    ResetClock,
}

/// Immutable reward configuration for one ledger deployment.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StakeParams {
    /// Raw reward units per token withdrawn, independent of duration.
    #[serde(default = "default_rate_per_token")]
    pub reward_rate_per_token: u128,

    /// Raw reward units per second elapsed, independent of amount.
    #[serde(default = "default_rate_per_second")]
    pub reward_rate_per_second: u128,

    /// Divisor translating raw reward units into token units.
    /// Must be nonzero. Fractional remainders are discarded (floor).
    #[serde(default = "default_scale")]
    pub reward_scale: u128,

    /// Behavior when staking on top of an existing position.
    #[serde(default)]
    pub restake_policy: RestakePolicy,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_rate_per_token() -> u128 {
    50_000_000_000_000_000
}

fn default_rate_per_second() -> u128 {
    126_839_168
}

fn default_scale() -> u128 {
    100_000_000_000_000_000 // 1e17
}

impl Default for StakeParams {
    fn default() -> Self {
        Self {
            reward_rate_per_token: default_rate_per_token(),
            reward_rate_per_second: default_rate_per_second(),
            reward_scale: default_scale(),
            restake_policy: RestakePolicy::default(),
        }
    }
}

impl StakeParams {
    /// Check that the parameter set is usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.reward_scale == 0 {
            return Err("reward_scale must be nonzero".into());
        }
        Ok(())
    }
}
