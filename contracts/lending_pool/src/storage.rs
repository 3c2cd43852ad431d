use soroban_sdk::{contracttype, Address, BytesN, Env};

pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = 17280; // ~1 day in 5s ledgers
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 518400; // ~30 days in 5s ledgers
const REGISTRY_LIFETIME_THRESHOLD: u32 = 17280;
const REGISTRY_BUMP_AMOUNT: u32 = 518400;

/// Default flash-loan fee: 0.3% of the borrowed value.
pub const DEFAULT_FLASH_LOAN_FEE_RATE: i128 = 3_000_000_000_000_000; // 3e15

#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolConfig {
    pub admin: Address,
    pub oracle: Address,
    pub receipt_token_wasm_hash: BytesN<32>,
    /// Fraction of the borrowed value charged per loan, scaled by
    /// `FEE_PRECISION`. Only ever lowered.
    pub flash_loan_fee_rate: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Config,
    ReceiptToken(Address),
    /// Receipt token of an asset that was allowed once and later removed.
    Delisted(Address),
    FlashLoanActive(Address),
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Option<PoolConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_receipt_token(env: &Env, asset: &Address) -> Option<Address> {
    let key = DataKey::ReceiptToken(asset.clone());
    let receipt = env.storage().persistent().get(&key);
    if receipt.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, REGISTRY_LIFETIME_THRESHOLD, REGISTRY_BUMP_AMOUNT);
    }
    receipt
}

pub fn set_receipt_token(env: &Env, asset: &Address, receipt: &Address) {
    let key = DataKey::ReceiptToken(asset.clone());
    env.storage().persistent().set(&key, receipt);
    env.storage()
        .persistent()
        .extend_ttl(&key, REGISTRY_LIFETIME_THRESHOLD, REGISTRY_BUMP_AMOUNT);
}

pub fn remove_receipt_token(env: &Env, asset: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::ReceiptToken(asset.clone()));
}

pub fn get_delisted_receipt(env: &Env, asset: &Address) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Delisted(asset.clone()))
}

pub fn set_delisted_receipt(env: &Env, asset: &Address, receipt: &Address) {
    let key = DataKey::Delisted(asset.clone());
    env.storage().persistent().set(&key, receipt);
    env.storage()
        .persistent()
        .extend_ttl(&key, REGISTRY_LIFETIME_THRESHOLD, REGISTRY_BUMP_AMOUNT);
}

pub fn remove_delisted_receipt(env: &Env, asset: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Delisted(asset.clone()));
}

pub fn is_flash_loan_active(env: &Env, asset: &Address) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::FlashLoanActive(asset.clone()))
        .unwrap_or(false)
}

pub fn set_flash_loan_active(env: &Env, asset: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::FlashLoanActive(asset.clone()), &true);
}

pub fn clear_flash_loan_active(env: &Env, asset: &Address) {
    env.storage()
        .instance()
        .remove(&DataKey::FlashLoanActive(asset.clone()));
}

/// Extend instance storage TTL to keep contract alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
