//! Shared types for the staking ledger.
//!
//! Amounts are raw `u128` integers in the token's smallest unit — no
//! floating point anywhere. Timestamps are whole seconds since the Unix
//! epoch, supplied by the caller at operation time.

pub mod address;
pub mod params;
pub mod time;

pub use address::AccountAddress;
pub use params::{RestakePolicy, StakeParams};
pub use time::Timestamp;
