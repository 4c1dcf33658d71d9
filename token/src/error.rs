//! Token-service errors.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, approved {approved}")]
    InsufficientAllowance { needed: u128, approved: u128 },

    #[error("arithmetic overflow in token balance")]
    Overflow,
}
