//! Exchange-rate arithmetic. Rates are underlying units per receipt unit,
//! scaled by `RATE_PRECISION`.

use soroban_sdk::{Env, I256};

use crate::errors::ReceiptTokenError;

/// Fixed-point scale of the exchange rate (1e18 == 1.0).
pub const RATE_PRECISION: i128 = 1_000_000_000_000_000_000;

/// Returns `rate * (supply + fee) / supply`, rounded down.
///
/// The product goes through a 256-bit intermediate: a rate near 1e18 times a
/// supply in the 1e21 range already exceeds `i128`.
///
/// # Errors
/// * `NoSupply` – nothing has been minted, so there is no one to credit.
/// * `RateMustIncrease` – the fee is zero, negative, or too small to move
///   the rate after truncation.
/// * `Overflow` – the new rate does not fit in `i128`.
pub fn accrue(env: &Env, rate: i128, supply: i128, fee: i128) -> Result<i128, ReceiptTokenError> {
    if supply <= 0 {
        return Err(ReceiptTokenError::NoSupply);
    }

    let grown = supply.checked_add(fee).ok_or(ReceiptTokenError::Overflow)?;
    let next = I256::from_i128(env, rate)
        .mul(&I256::from_i128(env, grown))
        .div(&I256::from_i128(env, supply))
        .to_i128()
        .ok_or(ReceiptTokenError::Overflow)?;

    if next <= rate {
        return Err(ReceiptTokenError::RateMustIncrease);
    }
    Ok(next)
}
