#![cfg_attr(not(test), no_std)]

#[cfg(test)]
extern crate std;

mod errors;
mod events;
mod rate;
mod storage;

#[cfg(test)]
mod test;

pub use errors::ReceiptTokenError;
pub use rate::RATE_PRECISION;

use events::ReceiptEvents;
use soroban_sdk::{
    contract, contractimpl, log, token::TokenClient, xdr::ToXdr, Address, Env, String,
};
use soroban_token_sdk::{metadata::TokenMetadata, TokenUtils};
use storage::ReceiptState;

/// Yield-bearing receipt for one underlying asset.
///
/// The contract's own address is the custody account for the underlying.
/// Supply, rate and custody can only be moved by the lending pool recorded
/// at initialization; holders can transfer and approve receipts freely.
#[contract]
pub struct ReceiptToken;

#[contractimpl]
impl ReceiptToken {
    pub fn initialize(
        env: Env,
        pool: Address,
        underlying: Address,
        decimals: u32,
        name: String,
        symbol: String,
    ) -> Result<(), ReceiptTokenError> {
        if storage::has_state(&env) {
            return Err(ReceiptTokenError::AlreadyInitialized);
        }
        if is_zero_address(&env, &pool) || is_zero_address(&env, &underlying) || pool == underlying
        {
            log!(&env, "receipt: rejected pool {} underlying {}", pool, underlying);
            return Err(ReceiptTokenError::InvalidAddress);
        }

        storage::set_state(
            &env,
            &ReceiptState {
                pool,
                underlying,
                exchange_rate: RATE_PRECISION,
                total_supply: 0,
            },
        );
        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal: decimals,
            name,
            symbol,
        });
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Pool-only operations
    // -----------------------------------------------------------------------

    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), ReceiptTokenError> {
        check_nonnegative(amount)?;
        let mut state = authorized_state(&env)?;

        storage::receive_balance(&env, &to, amount)?;
        state.total_supply = state
            .total_supply
            .checked_add(amount)
            .ok_or(ReceiptTokenError::Overflow)?;
        storage::set_state(&env, &state);
        storage::extend_instance_ttl(&env);

        TokenUtils::new(&env).events().mint(state.pool, to, amount);
        Ok(())
    }

    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), ReceiptTokenError> {
        check_nonnegative(amount)?;
        let mut state = authorized_state(&env)?;

        storage::spend_balance(&env, &from, amount)?;
        state.total_supply -= amount;
        storage::set_state(&env, &state);
        storage::extend_instance_ttl(&env);

        TokenUtils::new(&env).events().burn(from, amount);
        Ok(())
    }

    /// Sends `amount` of the underlying held in custody to `to`. A shortfall
    /// aborts inside the underlying token contract.
    pub fn transfer_underlying_out(
        env: Env,
        to: Address,
        amount: i128,
    ) -> Result<(), ReceiptTokenError> {
        check_nonnegative(amount)?;
        let state = authorized_state(&env)?;

        TokenClient::new(&env, &state.underlying).transfer(
            &env.current_contract_address(),
            &to,
            &amount,
        );
        Ok(())
    }

    /// Folds `fee` into the exchange rate so every outstanding receipt is
    /// worth proportionally more. Returns the new rate.
    pub fn accrue_fee(env: Env, fee: i128) -> Result<i128, ReceiptTokenError> {
        let mut state = authorized_state(&env)?;

        let old_rate = state.exchange_rate;
        let new_rate = rate::accrue(&env, old_rate, state.total_supply, fee)?;
        state.exchange_rate = new_rate;
        storage::set_state(&env, &state);
        storage::extend_instance_ttl(&env);

        ReceiptEvents::rate_updated(&env, &state.underlying, old_rate, new_rate);
        Ok(new_rate)
    }

    // -----------------------------------------------------------------------
    // Holder operations
    // -----------------------------------------------------------------------

    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ReceiptTokenError> {
        from.require_auth();
        check_nonnegative(amount)?;

        storage::spend_balance(&env, &from, amount)?;
        storage::receive_balance(&env, &to, amount)?;

        TokenUtils::new(&env).events().transfer(from, to, amount);
        Ok(())
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ReceiptTokenError> {
        spender.require_auth();
        check_nonnegative(amount)?;

        storage::spend_allowance(&env, &from, &spender, amount)?;
        storage::spend_balance(&env, &from, amount)?;
        storage::receive_balance(&env, &to, amount)?;

        TokenUtils::new(&env).events().transfer(from, to, amount);
        Ok(())
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), ReceiptTokenError> {
        from.require_auth();
        check_nonnegative(amount)?;

        storage::write_allowance(&env, &from, &spender, amount, expiration_ledger)?;

        TokenUtils::new(&env)
            .events()
            .approve(from, spender, amount, expiration_ledger);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    pub fn exchange_rate(env: Env) -> Result<i128, ReceiptTokenError> {
        Ok(read_state(&env)?.exchange_rate)
    }

    pub fn underlying(env: Env) -> Result<Address, ReceiptTokenError> {
        Ok(read_state(&env)?.underlying)
    }

    pub fn pool(env: Env) -> Result<Address, ReceiptTokenError> {
        Ok(read_state(&env)?.pool)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::get_state(&env)
            .map(|s| s.total_supply)
            .unwrap_or(0)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::read_balance(&env, &id)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::read_allowance(&env, &from, &spender).amount
    }

    pub fn decimals(env: Env) -> Result<u32, ReceiptTokenError> {
        Ok(read_metadata(&env)?.decimal)
    }

    pub fn name(env: Env) -> Result<String, ReceiptTokenError> {
        Ok(read_metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, ReceiptTokenError> {
        Ok(read_metadata(&env)?.symbol)
    }
}

fn read_state(env: &Env) -> Result<ReceiptState, ReceiptTokenError> {
    storage::get_state(env).ok_or(ReceiptTokenError::NotInitialized)
}

fn read_metadata(env: &Env) -> Result<TokenMetadata, ReceiptTokenError> {
    if !storage::has_state(env) {
        return Err(ReceiptTokenError::NotInitialized);
    }
    Ok(TokenUtils::new(env).metadata().get_metadata())
}

/// Loads state and requires the bound pool to have authorized this call.
fn authorized_state(env: &Env) -> Result<ReceiptState, ReceiptTokenError> {
    let state = read_state(env)?;
    state.pool.require_auth();
    Ok(state)
}

fn check_nonnegative(amount: i128) -> Result<(), ReceiptTokenError> {
    if amount < 0 {
        return Err(ReceiptTokenError::NegativeAmount);
    }
    Ok(())
}

/// True for an address whose 32-byte key or contract hash is all zeroes.
///
/// Both account and contract addresses end their XDR encoding with the
/// 32-byte payload.
pub(crate) fn is_zero_address(env: &Env, address: &Address) -> bool {
    let xdr = address.clone().to_xdr(env);
    let len = xdr.len();
    if len < 32 {
        return false;
    }
    xdr.slice(len - 32..).iter().all(|b| b == 0)
}
