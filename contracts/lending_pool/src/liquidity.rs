use soroban_sdk::{log, token::TokenClient, Address, Env};

use crate::{
    errors::PoolError,
    events::PoolEvents,
    math::{mul_div, RATE_PRECISION},
    receipt::ReceiptTokenClient,
    registry,
};

/// Passing this as the receipt amount redeems the holder's whole balance.
pub const REDEEM_MAX: i128 = i128::MAX;

/// Mints receipts for `amount` of `asset` at the current exchange rate and
/// pulls the underlying into the receipt token's custody.
///
/// The rate is read before minting and the depositor's transfer runs last,
/// after all pool-side effects.
pub fn execute_deposit(
    env: &Env,
    depositor: &Address,
    asset: &Address,
    amount: i128,
) -> Result<i128, PoolError> {
    if amount <= 0 {
        return Err(PoolError::ZeroAmount);
    }
    let receipt = registry::require_allowed(env, asset)?;
    let receipt_client = ReceiptTokenClient::new(env, &receipt);

    let rate = receipt_client.exchange_rate();
    let minted = mul_div(env, amount, RATE_PRECISION, rate).ok_or(PoolError::Overflow)?;
    if minted == 0 {
        log!(env, "deposit: {} of {} mints nothing at rate {}", amount, asset, rate);
        return Err(PoolError::DepositTooSmall);
    }

    PoolEvents::deposit(env, depositor, asset, amount, minted);
    receipt_client.mint(depositor, &minted);

    TokenClient::new(env, asset).transfer(depositor, &receipt, &amount);
    Ok(minted)
}

/// Burns `receipt_amount` receipts from `holder` and pays out the underlying
/// at the current exchange rate.
///
/// `REDEEM_MAX` resolves to the holder's full balance at call time.
pub fn execute_redeem(
    env: &Env,
    holder: &Address,
    asset: &Address,
    receipt_amount: i128,
) -> Result<i128, PoolError> {
    if receipt_amount <= 0 {
        return Err(PoolError::ZeroAmount);
    }
    let receipt = registry::require_allowed(env, asset)?;
    let receipt_client = ReceiptTokenClient::new(env, &receipt);

    let receipt_amount = if receipt_amount == REDEEM_MAX {
        receipt_client.balance(holder)
    } else {
        receipt_amount
    };
    if receipt_amount == 0 {
        return Err(PoolError::ZeroAmount);
    }

    let rate = receipt_client.exchange_rate();
    let underlying =
        mul_div(env, receipt_amount, rate, RATE_PRECISION).ok_or(PoolError::Overflow)?;

    PoolEvents::redeem(env, holder, asset, receipt_amount, underlying);
    receipt_client.burn(holder, &receipt_amount);
    receipt_client.transfer_underlying_out(holder, &underlying);
    Ok(underlying)
}
