//! Reward accrual arithmetic.
//!
//! `reward = ⌊(amount × rate_per_token + Δt × rate_per_second) / scale⌋`
//!
//! All intermediates are u128 with checked multiply/add — an overflow
//! surfaces as `None` rather than wrapping. The final division floors;
//! remainders below the scale's resolution are discarded, never rounded
//! up, never carried forward.

use concert_types::StakeParams;

/// Reward owed for withdrawing `amount` tokens after `elapsed` seconds.
///
/// Returns `None` on arithmetic overflow or a zero `scale` (rejected at
/// ledger construction, so unreachable in practice).
pub fn accrual(amount: u128, elapsed_secs: u64, params: &StakeParams) -> Option<u128> {
    let from_stake = amount.checked_mul(params.reward_rate_per_token)?;
    let from_time = u128::from(elapsed_secs).checked_mul(params.reward_rate_per_second)?;
    from_stake
        .checked_add(from_time)?
        .checked_div(params.reward_scale)
}
