//! Staking-ledger errors.

use concert_token::TokenError;
use concert_types::AccountAddress;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StakeError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("no stake record for {0}")]
    NoSuchStake(AccountAddress),

    #[error("insufficient stake: requested {requested}, staked {staked}")]
    InsufficientStake { requested: u128, staked: u128 },

    #[error("{0} is not the administrator")]
    Unauthorized(AccountAddress),

    #[error("insufficient reward funds: need {needed}, available {available}")]
    InsufficientRewardFunds { needed: u128, available: u128 },

    #[error("token transfer failed: {0}")]
    TransferFailed(#[from] TokenError),

    #[error("arithmetic overflow in reward computation")]
    Overflow,

    #[error("custody mismatch: expected {expected}, custodian holds {actual}")]
    CustodyMismatch { expected: u128, actual: u128 },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
