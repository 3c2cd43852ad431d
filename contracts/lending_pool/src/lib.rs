#![no_std]

mod errors;
mod events;
mod fee;
mod flash_loan;
mod liquidity;
mod math;
mod oracle;
mod receipt;
mod reentrancy;
mod registry;
mod storage;

#[cfg(test)]
extern crate std; // soroban-sdk testutils require std; the pool is no_std so we must opt-in explicitly.


pub use errors::PoolError;
pub use liquidity::REDEEM_MAX;

use events::PoolEvents;
use registry::AssetListing;
use soroban_sdk::{contract, contractimpl, log, Address, Bytes, BytesN, Env};
use storage::{PoolConfig, DEFAULT_FLASH_LOAN_FEE_RATE};

#[contract]
pub struct LendingPool;

#[contractimpl]
impl LendingPool {
    pub fn initialize(
        env: Env,
        admin: Address,
        oracle: Address,
        receipt_token_wasm_hash: BytesN<32>,
    ) -> Result<(), PoolError> {
        if storage::has_config(&env) {
            return Err(PoolError::AlreadyInitialized);
        }

        storage::set_config(
            &env,
            &PoolConfig {
                admin,
                oracle,
                receipt_token_wasm_hash,
                flash_loan_fee_rate: DEFAULT_FLASH_LOAN_FEE_RATE,
            },
        );
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Liquidity
    // -----------------------------------------------------------------------

    /// Deposits `amount` of `asset` and mints receipts to `depositor`.
    /// Returns the number of receipts minted.
    pub fn deposit(
        env: Env,
        depositor: Address,
        asset: Address,
        amount: i128,
    ) -> Result<i128, PoolError> {
        depositor.require_auth();
        require_initialized(&env)?;
        storage::extend_instance_ttl(&env);
        liquidity::execute_deposit(&env, &depositor, &asset, amount)
    }

    /// Burns `receipt_amount` receipts (or all of them with `REDEEM_MAX`) and
    /// returns the underlying paid out.
    pub fn redeem(
        env: Env,
        holder: Address,
        asset: Address,
        receipt_amount: i128,
    ) -> Result<i128, PoolError> {
        holder.require_auth();
        require_initialized(&env)?;
        storage::extend_instance_ttl(&env);
        liquidity::execute_redeem(&env, &holder, &asset, receipt_amount)
    }

    // -----------------------------------------------------------------------
    // Flash loans
    // -----------------------------------------------------------------------

    /// Lends `amount` of `asset` to `receiver` for the duration of its
    /// `on_flash_loan` callback. Custody must grow by at least the fee.
    pub fn flash_loan(
        env: Env,
        initiator: Address,
        receiver: Address,
        asset: Address,
        amount: i128,
        params: Bytes,
    ) -> Result<(), PoolError> {
        initiator.require_auth();
        storage::extend_instance_ttl(&env);
        flash_loan::execute_flash_loan(&env, &initiator, &receiver, &asset, amount, &params)
    }

    pub fn repay(env: Env, payer: Address, asset: Address, amount: i128) -> Result<(), PoolError> {
        payer.require_auth();
        require_initialized(&env)?;
        storage::extend_instance_ttl(&env);
        flash_loan::execute_repay(&env, &payer, &asset, amount)
    }

    // -----------------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------------

    /// Allows `asset` by deploying its receipt token (or restoring the one
    /// from an earlier listing), or disallows it. Returns the receipt token
    /// address when allowing.
    pub fn set_allowed_token(
        env: Env,
        asset: Address,
        allowed: bool,
    ) -> Result<Option<Address>, PoolError> {
        let config = admin_config(&env)?;
        storage::extend_instance_ttl(&env);

        if allowed {
            let receipt = registry::allow(&env, &config, &asset)?;
            PoolEvents::allowed_token_set(&env, &asset, true, &receipt);
            Ok(Some(receipt))
        } else {
            let receipt = registry::disallow(&env, &asset)?;
            PoolEvents::allowed_token_set(&env, &asset, false, &receipt);
            Ok(None)
        }
    }

    /// Lowers the flash-loan fee rate. Raising it is refused.
    pub fn set_flash_loan_fee_rate(env: Env, new_rate: i128) -> Result<(), PoolError> {
        let mut config = admin_config(&env)?;

        if new_rate < 0 {
            return Err(PoolError::InvalidFeeRate);
        }
        if new_rate > config.flash_loan_fee_rate {
            log!(&env, "fee: {} above current {}", new_rate, config.flash_loan_fee_rate);
            return Err(PoolError::FeeMustDecrease);
        }

        let old_rate = config.flash_loan_fee_rate;
        config.flash_loan_fee_rate = new_rate;
        storage::set_config(&env, &config);
        storage::extend_instance_ttl(&env);

        PoolEvents::fee_rate_updated(&env, old_rate, new_rate);
        Ok(())
    }

    pub fn set_oracle(env: Env, oracle: Address) -> Result<(), PoolError> {
        let mut config = admin_config(&env)?;
        config.oracle = oracle;
        storage::set_config(&env, &config);
        storage::extend_instance_ttl(&env);

        PoolEvents::oracle_updated(&env, &config.oracle);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    pub fn is_allowed_token(env: Env, asset: Address) -> bool {
        registry::lookup(&env, &asset) != AssetListing::NotAllowed
    }

    pub fn get_receipt_token(env: Env, asset: Address) -> Option<Address> {
        match registry::lookup(&env, &asset) {
            AssetListing::Allowed(receipt) => Some(receipt),
            AssetListing::NotAllowed => None,
        }
    }

    pub fn get_exchange_rate(env: Env, asset: Address) -> Result<i128, PoolError> {
        let receipt = registry::require_allowed(&env, &asset)?;
        Ok(receipt::ReceiptTokenClient::new(&env, &receipt).exchange_rate())
    }

    pub fn get_calculated_fee(env: Env, asset: Address, amount: i128) -> Result<i128, PoolError> {
        let config = storage::get_config(&env).ok_or(PoolError::NotInitialized)?;
        fee::calculated_fee(&env, &config, &asset, amount)
    }

    pub fn get_flash_loan_fee_rate(env: Env) -> Result<i128, PoolError> {
        Ok(require_initialized(&env)?.flash_loan_fee_rate)
    }

    pub fn get_fee_precision(_env: Env) -> i128 {
        math::FEE_PRECISION
    }

    pub fn is_flash_loan_active(env: Env, asset: Address) -> bool {
        reentrancy::is_active(&env, &asset)
    }

    pub fn get_oracle(env: Env) -> Result<Address, PoolError> {
        Ok(require_initialized(&env)?.oracle)
    }

    pub fn get_admin(env: Env) -> Result<Address, PoolError> {
        Ok(require_initialized(&env)?.admin)
    }
}

fn require_initialized(env: &Env) -> Result<PoolConfig, PoolError> {
    storage::get_config(env).ok_or(PoolError::NotInitialized)
}

/// Loads config and requires the admin to have authorized this call.
fn admin_config(env: &Env) -> Result<PoolConfig, PoolError> {
    let config = require_initialized(env)?;
    config.admin.require_auth();
    Ok(config)
}
