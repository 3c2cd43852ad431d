#![no_std]

use soroban_sdk::{contractclient, Address, Bytes, Env};

/// Flash Loan Receiver Interface.
/// Contracts receiving flash loans must implement this trait.
/// The lending pool invokes `on_flash_loan` after `amount` of `asset` has
/// been sent to the receiver. Before the callback returns, the receiver must
/// move `amount + fee` of `asset` to `custody` (the asset's receipt token).
/// The return value is ignored; repayment is checked by custody balance.
#[contractclient(name = "FlashReceiverClient")]
pub trait FlashReceiver {
    fn on_flash_loan(
        env: Env,
        asset: Address,
        amount: i128,
        fee: i128,
        initiator: Address,
        custody: Address,
        params: Bytes,
    );
}
