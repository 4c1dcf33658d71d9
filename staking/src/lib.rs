//! The staking ledger and reward-accrual engine.
//!
//! Participants stake a fungible token into custody, accrue reward as a
//! function of amount staked and elapsed time, and withdraw principal
//! plus reward in one atomic transition. Reward is never accrued by a
//! background job — it is computed lazily, at withdrawal time, from the
//! record's start timestamp and the caller-supplied clock.
//!
//! `reward = ⌊(amount × rate_per_token + Δt × rate_per_second) / scale⌋`
//!
//! This crate handles:
//! - The reward pool backing payouts (funded by the administrator)
//! - Per-participant stake records and the custody conservation invariant
//! - Atomic stake / unstake / fund transitions (all-or-nothing)
//! - TOML deployment configuration and bincode state snapshots

pub mod config;
pub mod error;
pub mod ledger;
pub mod pool;
pub mod record;
pub mod reward;
pub mod snapshot;

pub use config::LedgerConfig;
pub use error::StakeError;
pub use ledger::{StakingLedger, UnstakeReceipt};
pub use pool::RewardPool;
pub use record::StakeRecord;
