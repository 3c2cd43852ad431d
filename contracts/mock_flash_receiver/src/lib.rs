#![no_std]

use flashpool_flash_receiver_interface::FlashReceiver;
use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Bytes, Env};

/// Reference receiver. `params` selects the behaviour:
///
/// * `"repay"` – returns principal + fee to custody.
/// * `"principal"` – returns the principal only, leaving the fee unpaid.
/// * `"steal"` – keeps everything.
#[contract]
pub struct MockFlashReceiver;

#[contractimpl]
impl FlashReceiver for MockFlashReceiver {
    fn on_flash_loan(
        env: Env,
        asset: Address,
        amount: i128,
        fee: i128,
        _initiator: Address,
        custody: Address,
        params: Bytes,
    ) {
        let me = env.current_contract_address();
        let token = TokenClient::new(&env, &asset);

        if params == Bytes::from_slice(&env, b"repay") {
            token.transfer(&me, &custody, &(amount + fee));
        } else if params == Bytes::from_slice(&env, b"principal") {
            token.transfer(&me, &custody, &amount);
        }
        // "steal" and anything else: do nothing and let the pool's
        // repayment check fail.
    }
}
