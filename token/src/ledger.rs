//! Balance-transfer trait and the in-memory token implementation.

use std::collections::HashMap;

use concert_types::AccountAddress;
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// The balance-transfer surface the staking ledger consumes.
///
/// Transfers are all-or-nothing: an `Err` means no balance moved.
pub trait TokenLedger {
    /// Current balance of an account. Unknown accounts hold zero.
    fn balance_of(&self, account: &AccountAddress) -> u128;

    /// Move `amount` from `from` to `to` on the authority of `from` itself.
    fn transfer(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError>;

    /// Move `amount` from `from` to `to` on the authority of `spender`,
    /// consuming a prior approval from `from` to `spender`.
    fn transfer_from(
        &mut self,
        spender: &AccountAddress,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError>;
}

/// In-process fungible token with mint and approve/allowance semantics.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryToken {
    balances: HashMap<AccountAddress, u128>,
    /// (owner, spender) → approved amount remaining.
    allowances: HashMap<(AccountAddress, AccountAddress), u128>,
    total_supply: u128,
}

impl InMemoryToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Create `amount` new tokens in `to`'s balance.
    pub fn mint(&mut self, to: &AccountAddress, amount: u128) -> Result<(), TokenError> {
        if amount == 0 {
            return Err(TokenError::ZeroAmount);
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.total_supply = supply;
        self.balances.insert(to.clone(), balance);
        Ok(())
    }

    /// Authorize `spender` to move up to `amount` of `owner`'s balance.
    /// Overwrites any previous approval (no incremental semantics).
    pub fn approve(&mut self, owner: &AccountAddress, spender: &AccountAddress, amount: u128) {
        if amount == 0 {
            self.allowances.remove(&(owner.clone(), spender.clone()));
        } else {
            self.allowances
                .insert((owner.clone(), spender.clone()), amount);
        }
    }

    /// Remaining approval from `owner` to `spender`.
    pub fn allowance(&self, owner: &AccountAddress, spender: &AccountAddress) -> u128 {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Validate and apply a balance move. All checks happen before any
    /// mutation so a failed transfer leaves both balances untouched.
    fn move_balance(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError> {
        if amount == 0 {
            return Err(TokenError::ZeroAmount);
        }
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            });
        }
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.balances.insert(from.clone(), from_balance - amount);
        self.balances.insert(to.clone(), to_balance);
        Ok(())
    }
}

impl TokenLedger for InMemoryToken {
    fn balance_of(&self, account: &AccountAddress) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn transfer(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError> {
        self.move_balance(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: &AccountAddress,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: u128,
    ) -> Result<(), TokenError> {
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(TokenError::InsufficientAllowance {
                needed: amount,
                approved,
            });
        }
        self.move_balance(from, to, amount)?;
        self.approve(from, spender, approved - amount);
        Ok(())
    }
}
