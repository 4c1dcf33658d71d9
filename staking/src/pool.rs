//! The reward pool — the separately funded balance backing payouts.
//!
//! The pool is pure bookkeeping: a pair of monotonic counters with a
//! floor at zero. The tokens themselves sit in the ledger's custodian
//! account alongside staked principal; the pool tracks how much of that
//! balance is reward backing rather than principal.

use serde::{Deserialize, Serialize};

use crate::error::StakeError;

/// Reward-backing funds for one ledger deployment.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RewardPool {
    /// Cumulative amount ever contributed by the administrator.
    total_funded: u128,
    /// Cumulative amount reserved for payouts.
    total_paid_out: u128,
}

impl RewardPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_funded(&self) -> u128 {
        self.total_funded
    }

    pub fn total_paid_out(&self) -> u128 {
        self.total_paid_out
    }

    /// Funds still available to back future payouts.
    pub fn available(&self) -> u128 {
        // total_paid_out never exceeds total_funded (reserve checks first)
        self.total_funded - self.total_paid_out
    }

    /// Record an administrator contribution.
    pub fn fund(&mut self, amount: u128) -> Result<(), StakeError> {
        self.total_funded = self
            .total_funded
            .checked_add(amount)
            .ok_or(StakeError::Overflow)?;
        Ok(())
    }

    /// Reserve `amount` of reward backing for a payout.
    ///
    /// Fails without changing anything when the pool cannot cover it;
    /// the caller must then abort its whole transition.
    pub fn reserve_for_payout(&mut self, amount: u128) -> Result<(), StakeError> {
        let available = self.available();
        if available < amount {
            return Err(StakeError::InsufficientRewardFunds {
                needed: amount,
                available,
            });
        }
        self.total_paid_out += amount;
        Ok(())
    }

    /// Roll back a reservation when a later step of the same transition
    /// aborts.
    pub fn release(&mut self, amount: u128) {
        self.total_paid_out = self.total_paid_out.saturating_sub(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fund_accumulates() {
        let mut pool = RewardPool::new();
        pool.fund(1000).unwrap();
        pool.fund(500).unwrap();
        assert_eq!(pool.total_funded(), 1500);
        assert_eq!(pool.available(), 1500);
    }

    #[test]
    fn reserve_draws_down_available() {
        let mut pool = RewardPool::new();
        pool.fund(1000).unwrap();
        pool.reserve_for_payout(400).unwrap();
        assert_eq!(pool.available(), 600);
        assert_eq!(pool.total_paid_out(), 400);
        pool.reserve_for_payout(600).unwrap();
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn reserve_beyond_available_fails_cleanly() {
        let mut pool = RewardPool::new();
        pool.fund(100).unwrap();
        let err = pool.reserve_for_payout(101).unwrap_err();
        match err {
            StakeError::InsufficientRewardFunds { needed, available } => {
                assert_eq!(needed, 101);
                assert_eq!(available, 100);
            }
            other => panic!("expected InsufficientRewardFunds, got {other}"),
        }
        assert_eq!(pool.available(), 100);
        assert_eq!(pool.total_paid_out(), 0);
    }

    #[test]
    fn reserve_zero_always_succeeds() {
        let mut pool = RewardPool::new();
        pool.reserve_for_payout(0).unwrap();
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn release_undoes_reservation() {
        let mut pool = RewardPool::new();
        pool.fund(100).unwrap();
        pool.reserve_for_payout(60).unwrap();
        pool.release(60);
        assert_eq!(pool.available(), 100);
    }
}
