use soroban_sdk::{symbol_short, Address, Env};

pub struct ReceiptEvents;

impl ReceiptEvents {
    /// Emits a `rate` event after a fee is folded into the exchange rate.
    ///
    /// Topics: `("rate", underlying)`
    /// Data:   `(old_rate, new_rate)`
    pub fn rate_updated(env: &Env, underlying: &Address, old_rate: i128, new_rate: i128) {
        env.events()
            .publish((symbol_short!("rate"), underlying.clone()), (old_rate, new_rate));
    }
}
