//! The fungible-token service the staking ledger moves custody through.
//!
//! The staking ledger never mints or burns — it only asks this service to
//! move balances. [`TokenLedger`] is the seam: the three calls the staking
//! ledger makes. [`InMemoryToken`] is a complete in-process implementation
//! with mint and approve/allowance semantics, used by tests and
//! single-process deployments.

pub mod error;
pub mod ledger;

pub use error::TokenError;
pub use ledger::{InMemoryToken, TokenLedger};
