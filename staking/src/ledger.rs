//! The staking ledger — the aggregate root owning stake records, the
//! reward pool, and the custody conservation invariant.
//!
//! Every operation is one indivisible transition: all fallible checks
//! and arithmetic happen before any balance moves, so a failure at any
//! point leaves ledger, pool, and token state exactly as they were.
//! The ledger is strictly sequential — operations take `&mut self` and
//! an exclusive token handle, and never suspend mid-transition.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use concert_token::TokenLedger;
use concert_types::{AccountAddress, RestakePolicy, StakeParams, Timestamp};
use serde::{Deserialize, Serialize};

use crate::config::LedgerConfig;
use crate::error::StakeError;
use crate::pool::RewardPool;
use crate::record::StakeRecord;
use crate::reward;

/// What a successful unstake paid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnstakeReceipt {
    /// Principal returned.
    pub principal: u128,
    /// Reward settled on top of the principal.
    pub reward: u128,
    /// Total transferred to the participant (`principal + reward`).
    pub paid: u128,
}

/// One staking ledger deployment.
///
/// The ledger owns no tokens in the abstract model; concretely, the
/// `custodian` account on the external token service holds all staked
/// principal plus all reward-pool backing. Conservation:
/// `balance_of(custodian) == total_staked + pool.available()` after
/// every operation ([`Self::verify_custody`]).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakingLedger {
    admin: AccountAddress,
    custodian: AccountAddress,
    params: StakeParams,
    stakes: HashMap<AccountAddress, StakeRecord>,
    /// Sum of all record principals, maintained incrementally.
    total_staked: u128,
    pool: RewardPool,
}

impl StakingLedger {
    /// Create an empty ledger.
    ///
    /// `custodian` is the token account that holds all custodied funds;
    /// participants authorize it before staking. It must be distinct
    /// from the administrator and never stakes itself, otherwise the
    /// custody invariant cannot be checked against its balance.
    pub fn new(
        admin: AccountAddress,
        custodian: AccountAddress,
        params: StakeParams,
    ) -> Result<Self, StakeError> {
        params.validate().map_err(StakeError::InvalidParams)?;
        if admin == custodian {
            return Err(StakeError::InvalidParams(
                "administrator and custodian must be distinct accounts".into(),
            ));
        }
        Ok(Self {
            admin,
            custodian,
            params,
            stakes: HashMap::new(),
            total_staked: 0,
            pool: RewardPool::new(),
        })
    }

    /// Create a ledger from a deployment configuration.
    pub fn from_config(config: &LedgerConfig) -> Result<Self, StakeError> {
        Self::new(
            config.admin.clone(),
            config.custodian.clone(),
            config.params,
        )
    }

    // ── Entry points ─────────────────────────────────────────────────

    /// Stake `amount` of the participant's tokens into custody.
    ///
    /// Pulls `amount` via `transfer_from` (the participant must have
    /// approved the custodian beforehand). A first stake creates the
    /// record; a restake merges per the configured [`RestakePolicy`].
    pub fn stake(
        &mut self,
        token: &mut dyn TokenLedger,
        participant: &AccountAddress,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), StakeError> {
        if amount == 0 {
            return Err(StakeError::ZeroAmount);
        }
        if *participant == self.custodian {
            return Err(StakeError::Unauthorized(participant.clone()));
        }

        let new_total = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakeError::Overflow)?;

        // For a restake, work out the whole transition's arithmetic and
        // the pool's ability to cover a settlement before pulling any
        // balance, so a refusal leaves everything untouched.
        let mut settlement = 0u128;
        let new_principal = match self.stakes.get(participant) {
            Some(record) => {
                if self.params.restake_policy == RestakePolicy::SettleThenReset {
                    let elapsed = elapsed_or_die(record.staked_at, now);
                    settlement = reward::accrual(record.principal, elapsed, &self.params)
                        .ok_or(StakeError::Overflow)?;
                    let available = self.pool.available();
                    if available < settlement {
                        tracing::warn!(
                            participant = %participant,
                            needed = settlement,
                            available,
                            "restake refused: reward pool cannot cover settlement"
                        );
                        return Err(StakeError::InsufficientRewardFunds {
                            needed: settlement,
                            available,
                        });
                    }
                }
                record
                    .principal
                    .checked_add(amount)
                    .ok_or(StakeError::Overflow)?
            }
            None => amount,
        };

        token.transfer_from(&self.custodian, participant, &self.custodian, amount)?;

        if settlement > 0 {
            self.pool.reserve_for_payout(settlement)?;
            self.pay_from_custody(token, participant, settlement, settlement);
            tracing::debug!(
                participant = %participant,
                reward = settlement,
                "restake settled accrued reward"
            );
        }

        match self.stakes.entry(participant.clone()) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                record.principal = new_principal;
                record.staked_at = now;
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StakeRecord::new(amount, now));
            }
        }
        self.total_staked = new_total;

        tracing::info!(
            participant = %participant,
            amount,
            total_staked = self.total_staked,
            "stake recorded"
        );
        Ok(())
    }

    /// Administrator-only: top up the reward pool.
    ///
    /// Pulls `amount` from the administrator's balance into custody and
    /// credits the pool's backing by the same amount.
    pub fn fund_liquidity(
        &mut self,
        token: &mut dyn TokenLedger,
        caller: &AccountAddress,
        amount: u128,
    ) -> Result<(), StakeError> {
        if *caller != self.admin {
            return Err(StakeError::Unauthorized(caller.clone()));
        }
        if amount == 0 {
            return Err(StakeError::ZeroAmount);
        }
        self.pool
            .total_funded()
            .checked_add(amount)
            .ok_or(StakeError::Overflow)?;

        token.transfer_from(&self.custodian, caller, &self.custodian, amount)?;
        self.pool.fund(amount)?;

        tracing::info!(amount, available = self.pool.available(), "reward pool funded");
        Ok(())
    }

    /// Withdraw `amount` of staked principal plus the reward accrued on
    /// it since `staked_at`.
    ///
    /// If the reward pool cannot cover the reward, the whole unstake
    /// fails and the principal stays staked — a partial
    /// unstake-without-reward never silently occurs. On a partial
    /// withdrawal the remainder's accrual clock restarts, since the
    /// withdrawn interval's reward was just settled.
    pub fn unstake(
        &mut self,
        token: &mut dyn TokenLedger,
        participant: &AccountAddress,
        amount: u128,
        now: Timestamp,
    ) -> Result<UnstakeReceipt, StakeError> {
        if amount == 0 {
            return Err(StakeError::ZeroAmount);
        }
        let record = self
            .stakes
            .get(participant)
            .ok_or_else(|| StakeError::NoSuchStake(participant.clone()))?;
        let (principal, staked_at) = (record.principal, record.staked_at);
        if amount > principal {
            return Err(StakeError::InsufficientStake {
                requested: amount,
                staked: principal,
            });
        }

        let elapsed = elapsed_or_die(staked_at, now);
        let reward = reward::accrual(amount, elapsed, &self.params).ok_or(StakeError::Overflow)?;
        let paid = amount.checked_add(reward).ok_or(StakeError::Overflow)?;
        let new_total = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakeError::Overflow)?;

        if let Err(err) = self.pool.reserve_for_payout(reward) {
            tracing::warn!(
                participant = %participant,
                needed = reward,
                available = self.pool.available(),
                "unstake refused: reward pool cannot cover payout"
            );
            return Err(err);
        }
        self.pay_from_custody(token, participant, paid, reward);

        let remaining = principal - amount;
        if remaining == 0 {
            self.stakes.remove(participant);
        } else if let Some(record) = self.stakes.get_mut(participant) {
            record.principal = remaining;
            record.staked_at = now;
        }
        self.total_staked = new_total;

        tracing::info!(
            participant = %participant,
            amount,
            reward,
            remaining,
            "unstake paid out"
        );
        Ok(UnstakeReceipt {
            principal: amount,
            reward,
            paid,
        })
    }

    // ── Views ────────────────────────────────────────────────────────

    /// Reward the participant's full position would earn if withdrawn now.
    pub fn accrued_reward(
        &self,
        participant: &AccountAddress,
        now: Timestamp,
    ) -> Result<u128, StakeError> {
        let record = self
            .stakes
            .get(participant)
            .ok_or_else(|| StakeError::NoSuchStake(participant.clone()))?;
        let elapsed = elapsed_or_die(record.staked_at, now);
        reward::accrual(record.principal, elapsed, &self.params).ok_or(StakeError::Overflow)
    }

    pub fn stake_of(&self, participant: &AccountAddress) -> Option<&StakeRecord> {
        self.stakes.get(participant)
    }

    /// All open positions, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = (&AccountAddress, &StakeRecord)> {
        self.stakes.iter()
    }

    /// Sum of all staked principal.
    pub fn total_staked(&self) -> u128 {
        self.total_staked
    }

    pub fn pool(&self) -> &RewardPool {
        &self.pool
    }

    pub fn params(&self) -> &StakeParams {
        &self.params
    }

    pub fn admin(&self) -> &AccountAddress {
        &self.admin
    }

    pub fn custodian(&self) -> &AccountAddress {
        &self.custodian
    }

    /// Check the conservation invariant against the token service:
    /// the custodian's balance must equal staked principal plus unspent
    /// reward backing. A mismatch means custody accounting is corrupt
    /// and callers should treat it as fatal.
    pub fn verify_custody(&self, token: &dyn TokenLedger) -> Result<(), StakeError> {
        let expected = self
            .total_staked
            .checked_add(self.pool.available())
            .ok_or(StakeError::Overflow)?;
        let actual = token.balance_of(&self.custodian);
        if expected != actual {
            return Err(StakeError::CustodyMismatch { expected, actual });
        }
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Pay `total` out of custody after `reserved` has been taken from
    /// the pool. Custody accounting guarantees the balance is there; a
    /// failure here means the invariant is already broken, so this
    /// panics rather than pretending the error is recoverable.
    fn pay_from_custody(
        &mut self,
        token: &mut dyn TokenLedger,
        to: &AccountAddress,
        total: u128,
        reserved: u128,
    ) {
        if let Err(err) = token.transfer(&self.custodian, to, total) {
            self.pool.release(reserved);
            panic!("custody transfer of {total} to {to} failed: {err}");
        }
    }
}

/// Elapsed seconds from `staked_at` to `now`. A decreasing clock is a
/// corrupted precondition, not a user error — panic.
fn elapsed_or_die(staked_at: Timestamp, now: Timestamp) -> u64 {
    match staked_at.checked_elapsed_since(now) {
        Some(secs) => secs,
        None => panic!("clock went backwards: staked at {staked_at}, now {now}"),
    }
}
