use soroban_sdk::{Address, Env};

use crate::{
    errors::PoolError,
    math::{mul_div, FEE_PRECISION},
    oracle,
    storage::PoolConfig,
};

/// Flash-loan fee for borrowing `amount` of `asset`.
///
/// value = amount * price / FEE_PRECISION
/// fee   = value * fee_rate / FEE_PRECISION
///
/// Both divisions truncate, so small loans of cheap assets can cost 0.
/// Non-positive amounts are refused with `ZeroAmount`, as in `flash_loan`.
pub fn calculated_fee(
    env: &Env,
    config: &PoolConfig,
    asset: &Address,
    amount: i128,
) -> Result<i128, PoolError> {
    if amount <= 0 {
        return Err(PoolError::ZeroAmount);
    }
    let price = oracle::price_of(env, &config.oracle, asset)?;
    fee_for_price(env, amount, price, config.flash_loan_fee_rate)
}

pub fn fee_for_price(
    env: &Env,
    amount: i128,
    price: i128,
    fee_rate: i128,
) -> Result<i128, PoolError> {
    let value = mul_div(env, amount, price, FEE_PRECISION).ok_or(PoolError::Overflow)?;
    mul_div(env, value, fee_rate, FEE_PRECISION).ok_or(PoolError::Overflow)
}
