use soroban_sdk::{symbol_short, Address, Bytes, Env, Symbol};

pub struct PoolEvents;

impl PoolEvents {
    /// Emits a `deposit` event before the depositor's transfer executes.
    ///
    /// Topics: `("deposit", depositor, asset)`
    /// Data:   `(amount, minted)`
    pub fn deposit(env: &Env, depositor: &Address, asset: &Address, amount: i128, minted: i128) {
        env.events().publish(
            (symbol_short!("deposit"), depositor.clone(), asset.clone()),
            (amount, minted),
        );
    }

    /// Topics: `("redeem", holder, asset)`
    /// Data:   `(receipt_amount, underlying_amount)`
    pub fn redeem(
        env: &Env,
        holder: &Address,
        asset: &Address,
        receipt_amount: i128,
        underlying_amount: i128,
    ) {
        env.events().publish(
            (symbol_short!("redeem"), holder.clone(), asset.clone()),
            (receipt_amount, underlying_amount),
        );
    }

    /// Emits a `flash_loan` event once the fee is locked into the rate and
    /// before funds leave custody.
    ///
    /// Topics: `("flash_loan", receiver, asset)`
    /// Data:   `(amount, fee, initiator, params)`
    ///
    /// "flash_loan" = 10 chars → exceeds the 9-char symbol_short! limit,
    /// so we use Symbol::new for a runtime allocation.
    pub fn flash_loan(
        env: &Env,
        receiver: &Address,
        asset: &Address,
        amount: i128,
        fee: i128,
        initiator: &Address,
        params: &Bytes,
    ) {
        env.events().publish(
            (Symbol::new(env, "flash_loan"), receiver.clone(), asset.clone()),
            (amount, fee, initiator.clone(), params.clone()),
        );
    }

    pub fn repay(env: &Env, payer: &Address, asset: &Address, amount: i128) {
        env.events()
            .publish((symbol_short!("repay"), payer.clone(), asset.clone()), amount);
    }

    /// Topics: `("allowed", asset)`
    /// Data:   `(allowed, receipt_token)`
    pub fn allowed_token_set(env: &Env, asset: &Address, allowed: bool, receipt: &Address) {
        env.events().publish(
            (symbol_short!("allowed"), asset.clone()),
            (allowed, receipt.clone()),
        );
    }

    pub fn fee_rate_updated(env: &Env, old_rate: i128, new_rate: i128) {
        env.events()
            .publish((symbol_short!("fee_rate"),), (old_rate, new_rate));
    }

    pub fn oracle_updated(env: &Env, oracle: &Address) {
        env.events()
            .publish((symbol_short!("oracle"),), oracle.clone());
    }
}
