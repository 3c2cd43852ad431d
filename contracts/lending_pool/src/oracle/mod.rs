use soroban_sdk::{contractclient, log, Address, Env};

use crate::errors::PoolError;

// External price feed. Quotes are in the unit of account, scaled by
// FEE_PRECISION.
#[contractclient(name = "PriceOracleClient")]
pub trait PriceOracle {
    fn price(env: Env, asset: Address) -> i128;
}

/// Reads the oracle quote for `asset`. A negative quote is treated as a
/// broken feed; oracle panics propagate unchanged.
pub fn price_of(env: &Env, oracle: &Address, asset: &Address) -> Result<i128, PoolError> {
    let price = PriceOracleClient::new(env, oracle).price(asset);
    if price < 0 {
        log!(env, "oracle: negative price {} for {}", price, asset);
        return Err(PoolError::InvalidPrice);
    }
    Ok(price)
}
