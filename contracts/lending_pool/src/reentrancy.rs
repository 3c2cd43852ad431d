use soroban_sdk::{Address, Env};

use crate::{errors::PoolError, storage};

/// Marks `asset` as mid-flash-loan. Reverts with `FlashLoanActive` if a loan
/// on the same asset is already outstanding.
///
/// Loans on other assets are unaffected: the flag exists to gate `repay` and
/// to refuse a nested loan of the same liquidity. Because Soroban rolls back
/// all state on a failed invocation, the flag is cleared automatically if the
/// outer call reverts.
pub fn acquire(env: &Env, asset: &Address) -> Result<(), PoolError> {
    if storage::is_flash_loan_active(env, asset) {
        return Err(PoolError::FlashLoanActive);
    }
    storage::set_flash_loan_active(env, asset);
    Ok(())
}

/// Clears the flag after the repayment check passes.
///
/// Only called on the happy path; error paths rely on Soroban's atomic
/// state rollback.
pub fn release(env: &Env, asset: &Address) {
    storage::clear_flash_loan_active(env, asset);
}

pub fn is_active(env: &Env, asset: &Address) -> bool {
    storage::is_flash_loan_active(env, asset)
}
