#![cfg(test)]

// ---------------------------------------------------------------------------
// Receipt token test suite
//
// 1. rate_math  : pure tests for rate::accrue
// 2. lifecycle  : initialize guards, pool-only mint/burn/custody/accrual
// 3. holder     : transfer / approve / transfer_from
// ---------------------------------------------------------------------------


use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    Address, Env, String,
};

use crate::{ReceiptToken, ReceiptTokenClient, RATE_PRECISION};

const ONE: i128 = RATE_PRECISION; // 1 token at 18 decimals

pub(crate) struct Setup<'a> {
    pub env: Env,
    pub pool: Address,
    pub underlying: Address,
    pub underlying_admin: StellarAssetClient<'a>,
    pub underlying_client: TokenClient<'a>,
    pub receipt_id: Address,
    pub receipt: ReceiptTokenClient<'a>,
}

impl<'a> Setup<'a> {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let pool = Address::generate(&env);
        let underlying = env.register_stellar_asset_contract_v2(admin).address();

        let receipt_id = env.register_contract(None, ReceiptToken);
        let receipt = ReceiptTokenClient::new(&env, &receipt_id);
        receipt.initialize(
            &pool,
            &underlying,
            &18,
            &String::from_str(&env, "Flash Pool Test"),
            &String::from_str(&env, "fpTST"),
        );

        Setup {
            underlying_admin: StellarAssetClient::new(&env, &underlying),
            underlying_client: TokenClient::new(&env, &underlying),
            env,
            pool,
            underlying,
            receipt_id,
            receipt,
        }
    }
}

// ============================================================================
// 1. Rate arithmetic
// ============================================================================
mod rate_math {
    use soroban_sdk::Env;

    use super::ONE;
    use crate::{errors::ReceiptTokenError, rate::accrue};

    #[test]
    fn fee_grows_rate_proportionally() {
        let env = Env::default();
        // 1.0 * (100 + 3) / 100 = 1.03
        let next = accrue(&env, ONE, 100 * ONE, 3 * ONE).unwrap();
        assert_eq!(next, 1_030_000_000_000_000_000);
    }

    #[test]
    fn handles_products_beyond_i128() {
        let env = Env::default();
        // 1e18 * 1e24 overflows i128 without the 256-bit intermediate.
        let supply = 1_000_000 * ONE;
        let next = accrue(&env, ONE, supply, ONE).unwrap();
        assert_eq!(next, ONE + 1_000_000_000_000);
    }

    #[test]
    fn zero_supply_is_rejected() {
        let env = Env::default();
        assert_eq!(accrue(&env, ONE, 0, ONE), Err(ReceiptTokenError::NoSupply));
    }

    #[test]
    fn zero_fee_is_rejected() {
        let env = Env::default();
        assert_eq!(
            accrue(&env, ONE, 100 * ONE, 0),
            Err(ReceiptTokenError::RateMustIncrease)
        );
    }

    #[test]
    fn fee_lost_to_truncation_is_rejected() {
        let env = Env::default();
        // 1e18 * (1e30 + 1) / 1e30 floors back to 1e18.
        let supply = 1_000_000_000_000 * ONE;
        assert_eq!(
            accrue(&env, ONE, supply, 1),
            Err(ReceiptTokenError::RateMustIncrease)
        );
    }

    #[test]
    fn negative_fee_is_rejected() {
        let env = Env::default();
        assert_eq!(
            accrue(&env, ONE, 100 * ONE, -ONE),
            Err(ReceiptTokenError::RateMustIncrease)
        );
    }
}

// ============================================================================
// 2. Initialization and pool-only operations
// ============================================================================
mod lifecycle {
    use soroban_sdk::{
        symbol_short,
        testutils::{Address as _, AuthorizedFunction, AuthorizedInvocation, Events as _},
        vec, Address, Env, IntoVal, String,
    };

    use super::{Setup, ONE};
    use crate::{errors::ReceiptTokenError, ReceiptToken, ReceiptTokenClient, RATE_PRECISION};

    const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";
    const ZERO_CONTRACT: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";

    fn fresh_receipt(env: &Env) -> ReceiptTokenClient<'static> {
        let id = env.register_contract(None, ReceiptToken);
        ReceiptTokenClient::new(env, &id)
    }

    #[test]
    fn initialize_sets_unit_rate_and_metadata() {
        let s = Setup::new();

        assert_eq!(s.receipt.exchange_rate(), RATE_PRECISION);
        assert_eq!(s.receipt.total_supply(), 0);
        assert_eq!(s.receipt.underlying(), s.underlying);
        assert_eq!(s.receipt.pool(), s.pool);
        assert_eq!(s.receipt.decimals(), 18);
        assert_eq!(s.receipt.symbol(), String::from_str(&s.env, "fpTST"));
    }

    #[test]
    fn initialize_twice_fails() {
        let s = Setup::new();
        let result = s.receipt.try_initialize(
            &s.pool,
            &s.underlying,
            &7,
            &String::from_str(&s.env, "again"),
            &String::from_str(&s.env, "AG"),
        );
        assert_eq!(result, Err(Ok(ReceiptTokenError::AlreadyInitialized)));
        assert_eq!(s.receipt.decimals(), 18);
    }

    #[test]
    fn zero_pool_address_is_rejected() {
        let env = Env::default();
        let receipt = fresh_receipt(&env);
        let zero = Address::from_string(&String::from_str(&env, ZERO_ACCOUNT));

        let result = receipt.try_initialize(
            &zero,
            &Address::generate(&env),
            &7,
            &String::from_str(&env, "x"),
            &String::from_str(&env, "x"),
        );
        assert_eq!(result, Err(Ok(ReceiptTokenError::InvalidAddress)));
    }

    #[test]
    fn zero_underlying_address_is_rejected() {
        let env = Env::default();
        let receipt = fresh_receipt(&env);
        let zero = Address::from_string(&String::from_str(&env, ZERO_CONTRACT));

        let result = receipt.try_initialize(
            &Address::generate(&env),
            &zero,
            &7,
            &String::from_str(&env, "x"),
            &String::from_str(&env, "x"),
        );
        assert_eq!(result, Err(Ok(ReceiptTokenError::InvalidAddress)));
    }

    #[test]
    fn pool_equal_to_underlying_is_rejected() {
        let env = Env::default();
        let receipt = fresh_receipt(&env);
        let same = Address::generate(&env);

        let result = receipt.try_initialize(
            &same,
            &same,
            &7,
            &String::from_str(&env, "x"),
            &String::from_str(&env, "x"),
        );
        assert_eq!(result, Err(Ok(ReceiptTokenError::InvalidAddress)));
    }

    #[test]
    fn views_before_initialize_fail() {
        let env = Env::default();
        let receipt = fresh_receipt(&env);
        assert_eq!(
            receipt.try_exchange_rate(),
            Err(Ok(ReceiptTokenError::NotInitialized))
        );
        assert_eq!(receipt.total_supply(), 0);
    }

    #[test]
    fn mint_is_authorized_by_pool() {
        let s = Setup::new();
        let holder = Address::generate(&s.env);

        s.receipt.mint(&holder, &(5 * ONE));

        assert_eq!(
            s.env.auths(),
            std::vec![(
                s.pool.clone(),
                AuthorizedInvocation {
                    function: AuthorizedFunction::Contract((
                        s.receipt_id.clone(),
                        symbol_short!("mint"),
                        (&holder, 5 * ONE).into_val(&s.env),
                    )),
                    sub_invocations: std::vec![],
                }
            )]
        );
    }

    #[test]
    fn mint_without_pool_auth_fails() {
        let env = Env::default();
        let pool = Address::generate(&env);
        let underlying = Address::generate(&env);
        let receipt = fresh_receipt(&env);
        receipt.initialize(
            &pool,
            &underlying,
            &7,
            &String::from_str(&env, "x"),
            &String::from_str(&env, "x"),
        );

        let result = receipt.try_mint(&Address::generate(&env), &100);
        assert!(result.is_err(), "mint must require the pool's authorization");
        assert_eq!(receipt.total_supply(), 0);
    }

    #[test]
    fn mint_and_burn_track_supply() {
        let s = Setup::new();
        let alice = Address::generate(&s.env);
        let bob = Address::generate(&s.env);

        s.receipt.mint(&alice, &(100 * ONE));
        s.receipt.mint(&bob, &(50 * ONE));
        assert_eq!(s.receipt.total_supply(), 150 * ONE);

        s.receipt.burn(&alice, &(40 * ONE));
        assert_eq!(s.receipt.balance(&alice), 60 * ONE);
        assert_eq!(s.receipt.balance(&bob), 50 * ONE);
        assert_eq!(s.receipt.total_supply(), 110 * ONE);
    }

    #[test]
    fn burn_more_than_balance_fails() {
        let s = Setup::new();
        let alice = Address::generate(&s.env);
        s.receipt.mint(&alice, &ONE);

        let result = s.receipt.try_burn(&alice, &(ONE + 1));
        assert_eq!(result, Err(Ok(ReceiptTokenError::InsufficientBalance)));
        assert_eq!(s.receipt.total_supply(), ONE);
        assert_eq!(s.receipt.balance(&alice), ONE);
    }

    #[test]
    fn negative_mint_fails() {
        let s = Setup::new();
        let alice = Address::generate(&s.env);
        let result = s.receipt.try_mint(&alice, &-1);
        assert_eq!(result, Err(Ok(ReceiptTokenError::NegativeAmount)));
    }

    #[test]
    fn accrue_fee_without_supply_fails() {
        let s = Setup::new();
        assert_eq!(
            s.receipt.try_accrue_fee(&ONE),
            Err(Ok(ReceiptTokenError::NoSupply))
        );
    }

    #[test]
    fn accrue_zero_fee_fails_and_keeps_rate() {
        let s = Setup::new();
        s.receipt.mint(&Address::generate(&s.env), &(100 * ONE));

        assert_eq!(
            s.receipt.try_accrue_fee(&0),
            Err(Ok(ReceiptTokenError::RateMustIncrease))
        );
        assert_eq!(s.receipt.exchange_rate(), RATE_PRECISION);
    }

    #[test]
    fn rate_never_decreases_across_accruals() {
        let s = Setup::new();
        let alice = Address::generate(&s.env);
        s.receipt.mint(&alice, &(1_000 * ONE));

        let mut last = s.receipt.exchange_rate();
        for fee in [3 * ONE, ONE / 2, ONE / 1_000, 250 * ONE] {
            let next = s.receipt.accrue_fee(&fee);
            assert!(next > last, "rate must strictly increase on accrual");
            assert_eq!(s.receipt.exchange_rate(), next);
            last = next;
        }

        // Burning receipts leaves the rate untouched.
        s.receipt.burn(&alice, &(500 * ONE));
        assert_eq!(s.receipt.exchange_rate(), last);
    }

    #[test]
    fn accrue_fee_publishes_rate_event() {
        let s = Setup::new();
        s.receipt.mint(&Address::generate(&s.env), &(100 * ONE));

        s.receipt.accrue_fee(&(3 * ONE));

        let all = s.env.events().all();
        let last = all.slice(all.len() - 1..);
        assert_eq!(
            last,
            vec![
                &s.env,
                (
                    s.receipt_id.clone(),
                    (symbol_short!("rate"), s.underlying.clone()).into_val(&s.env),
                    (ONE, 1_030_000_000_000_000_000_i128).into_val(&s.env),
                )
            ]
        );
    }

    #[test]
    fn transfer_underlying_out_moves_custody() {
        let s = Setup::new();
        let to = Address::generate(&s.env);
        s.underlying_admin.mint(&s.receipt_id, &(10 * ONE));

        s.receipt.transfer_underlying_out(&to, &(4 * ONE));

        assert_eq!(s.underlying_client.balance(&s.receipt_id), 6 * ONE);
        assert_eq!(s.underlying_client.balance(&to), 4 * ONE);
    }

    #[test]
    fn transfer_underlying_out_beyond_custody_fails() {
        let s = Setup::new();
        let to = Address::generate(&s.env);
        s.underlying_admin.mint(&s.receipt_id, &ONE);

        let result = s.receipt.try_transfer_underlying_out(&to, &(2 * ONE));
        assert!(result.is_err(), "ledger shortfall must abort");
        assert_eq!(s.underlying_client.balance(&s.receipt_id), ONE);
    }
}
