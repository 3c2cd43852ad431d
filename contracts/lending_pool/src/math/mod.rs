//! Fixed-point arithmetic helpers for fee and exchange-rate conversions.
//! Fees and rates both use 1e18 scaling; every division truncates.

use soroban_sdk::{Env, I256};

/// Scale of fee rates and oracle prices.
pub const FEE_PRECISION: i128 = 1_000_000_000_000_000_000; // 1e18
/// Scale of receipt exchange rates.
pub const RATE_PRECISION: i128 = 1_000_000_000_000_000_000; // 1e18

/// Computes `a * b / denominator`, rounding toward zero.
///
/// The product is formed in 256 bits, so only the quotient has to fit in
/// `i128`. Returns `None` on a zero denominator or an out-of-range result.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Option<i128> {
    if denominator == 0 {
        return None;
    }
    I256::from_i128(env, a)
        .mul(&I256::from_i128(env, b))
        .div(&I256::from_i128(env, denominator))
        .to_i128()
}
