use soroban_sdk::{log, token::TokenClient, xdr::ToXdr, Address, Bytes, Env};

use flashpool_flash_receiver_interface::FlashReceiverClient;

use crate::{
    errors::PoolError, events::PoolEvents, fee, receipt::ReceiptTokenClient, reentrancy,
    registry, storage,
};

/// Maximum allowed byte length for the `params` payload passed to the receiver.
pub const MAX_PAYLOAD_SIZE: u32 = 256;

/// Executes a single-asset flash loan with full solvency enforcement.
///
/// # Flow
/// 1. **Snapshot**: starting custody balance `B` of the receipt token.
/// 2. **Liquidity**: `amount <= B`.
/// 3. **Receiver**: must be a contract address.
/// 4. **Fee**: priced through the oracle.
/// 5. **Accrual**: fee folded into the exchange rate *before* funds leave
///    custody, so anything the receiver does observes the post-fee rate.
/// 6. **Event**.
/// 7. **Flag**: mark the asset as mid-loan.
/// 8. **Transfer**: `amount` from custody to `receiver`.
/// 9. **Callback**: `receiver.on_flash_loan(...)`; result ignored.
/// 10-11. **Repayment check**: ending custody `>= B + fee`.
/// 12. **Clear flag**.
///
/// # Errors
/// | Error                   | Condition                                      |
/// |-------------------------|------------------------------------------------|
/// | `PayloadTooLarge`       | `params.len() > MAX_PAYLOAD_SIZE` (256 bytes)  |
/// | `ZeroAmount`            | `amount <= 0`                                  |
/// | `NotInitialized`        | Pool config not yet written by `initialize`    |
/// | `AssetNotAllowed`       | No receipt token registered for `asset`        |
/// | `InsufficientLiquidity` | `amount` exceeds custody                       |
/// | `ReceiverNotCallable`   | `receiver` is an account, not a contract       |
/// | `FlashLoanActive`       | A loan on the same asset is outstanding        |
/// | `LoanNotRepaid`         | Ending custody `< B + fee`                     |
/// | `Overflow`              | Fee or required balance out of range           |
pub fn execute_flash_loan(
    env: &Env,
    initiator: &Address,
    receiver: &Address,
    asset: &Address,
    amount: i128,
    params: &Bytes,
) -> Result<(), PoolError> {
    // -----------------------------------------------------------------------
    // Pre-flight checks (no state access)
    // -----------------------------------------------------------------------

    if params.len() > MAX_PAYLOAD_SIZE {
        return Err(PoolError::PayloadTooLarge);
    }
    if amount <= 0 {
        return Err(PoolError::ZeroAmount);
    }

    let config = storage::get_config(env).ok_or(PoolError::NotInitialized)?;
    let receipt = registry::require_allowed(env, asset)?;
    let token = TokenClient::new(env, asset);
    let receipt_client = ReceiptTokenClient::new(env, &receipt);

    // -----------------------------------------------------------------------
    // 1-3. Snapshot custody, check liquidity and receiver
    // -----------------------------------------------------------------------

    let starting_balance = token.balance(&receipt);
    if amount > starting_balance {
        return Err(PoolError::InsufficientLiquidity);
    }
    if !is_contract(env, receiver) {
        log!(env, "flash_loan: receiver {} is not a contract", receiver);
        return Err(PoolError::ReceiverNotCallable);
    }

    // -----------------------------------------------------------------------
    // 4-6. Price the loan and lock the fee into the rate
    // -----------------------------------------------------------------------

    let fee = fee::calculated_fee(env, &config, asset, amount)?;
    receipt_client.accrue_fee(&fee);

    PoolEvents::flash_loan(env, receiver, asset, amount, fee, initiator, params);

    // -----------------------------------------------------------------------
    // 7-9. Hand out the funds and call the receiver
    // -----------------------------------------------------------------------

    reentrancy::acquire(env, asset)?;

    receipt_client.transfer_underlying_out(receiver, &amount);

    FlashReceiverClient::new(env, receiver).on_flash_loan(
        asset,
        &amount,
        &fee,
        initiator,
        &receipt, // custody = repayment destination
        params,
    );

    // -----------------------------------------------------------------------
    // 10-12. Repayment verification
    // -----------------------------------------------------------------------

    let ending_balance = token.balance(&receipt);
    let required = starting_balance
        .checked_add(fee)
        .ok_or(PoolError::Overflow)?;
    if ending_balance < required {
        log!(env, "flash_loan: custody {} below required {}", ending_balance, required);
        return Err(PoolError::LoanNotRepaid);
    }

    reentrancy::release(env, asset);

    Ok(())
}

/// Push-style repayment: moves `amount` of `asset` from `payer` into custody
/// while a loan on that asset is outstanding.
pub fn execute_repay(
    env: &Env,
    payer: &Address,
    asset: &Address,
    amount: i128,
) -> Result<(), PoolError> {
    if amount <= 0 {
        return Err(PoolError::ZeroAmount);
    }
    let receipt = registry::require_allowed(env, asset)?;
    if !reentrancy::is_active(env, asset) {
        return Err(PoolError::NoActiveFlashLoan);
    }

    PoolEvents::repay(env, payer, asset, amount);
    TokenClient::new(env, asset).transfer(payer, &receipt, &amount);
    Ok(())
}

/// True when `address` is a contract, i.e. something `on_flash_loan` can be
/// invoked on.
///
/// XDR layout: `ScVal` tag (4 bytes) then `ScAddress` tag (4 bytes), where
/// tag 1 is `SC_ADDRESS_TYPE_CONTRACT`.
pub fn is_contract(env: &Env, address: &Address) -> bool {
    address.clone().to_xdr(env).get(7) == Some(1)
}
