use soroban_sdk::{contractclient, Address, Env, String};

// Surface of the receipt token contract the pool drives. Mutating calls are
// authorized by the pool as direct invoker; failures abort the pool call.
#[contractclient(name = "ReceiptTokenClient")]
pub trait ReceiptTokenInterface {
    fn initialize(
        env: Env,
        pool: Address,
        underlying: Address,
        decimals: u32,
        name: String,
        symbol: String,
    );
    fn mint(env: Env, to: Address, amount: i128);
    fn burn(env: Env, from: Address, amount: i128);
    fn transfer_underlying_out(env: Env, to: Address, amount: i128);
    fn accrue_fee(env: Env, fee: i128) -> i128;
    fn exchange_rate(env: Env) -> i128;
    fn total_supply(env: Env) -> i128;
    fn balance(env: Env, id: Address) -> i128;
}
