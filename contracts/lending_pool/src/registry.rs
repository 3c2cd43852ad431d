//! Asset allow-list. An asset is allowed exactly when it has a receipt token
//! registered under `DataKey::ReceiptToken(asset)`.

use soroban_sdk::{log, token::TokenClient, xdr::ToXdr, Address, Env, String};

use crate::{errors::PoolError, receipt::ReceiptTokenClient, storage, storage::PoolConfig};

const NAME_PREFIX: &[u8] = b"Flash Pool ";
const SYMBOL_PREFIX: &[u8] = b"fp";
const MAX_METADATA_LEN: usize = 128;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssetListing {
    Allowed(Address),
    NotAllowed,
}

pub fn lookup(env: &Env, asset: &Address) -> AssetListing {
    match storage::get_receipt_token(env, asset) {
        Some(receipt) => AssetListing::Allowed(receipt),
        None => AssetListing::NotAllowed,
    }
}

/// Returns the receipt token of an allowed asset.
pub fn require_allowed(env: &Env, asset: &Address) -> Result<Address, PoolError> {
    match lookup(env, asset) {
        AssetListing::Allowed(receipt) => Ok(receipt),
        AssetListing::NotAllowed => Err(PoolError::AssetNotAllowed),
    }
}

/// Registers a receipt token bound to this pool.
///
/// The deploy salt is derived from the asset, so each asset maps to one
/// deterministic receipt address. An asset that was delisted gets its old
/// receipt token back: the contract still exists at that address, has no
/// supply, and keeps its exchange rate.
pub fn allow(env: &Env, config: &PoolConfig, asset: &Address) -> Result<Address, PoolError> {
    if let AssetListing::Allowed(_) = lookup(env, asset) {
        return Err(PoolError::AlreadyAllowed);
    }

    if let Some(receipt) = storage::get_delisted_receipt(env, asset) {
        storage::remove_delisted_receipt(env, asset);
        storage::set_receipt_token(env, asset, &receipt);
        return Ok(receipt);
    }

    let (decimals, name, symbol) = receipt_metadata(env, asset)?;

    let salt = env.crypto().sha256(&asset.clone().to_xdr(env)).to_bytes();
    let receipt = env
        .deployer()
        .with_current_contract(salt)
        .deploy(config.receipt_token_wasm_hash.clone());

    ReceiptTokenClient::new(env, &receipt).initialize(
        &env.current_contract_address(),
        asset,
        &decimals,
        &name,
        &symbol,
    );

    storage::set_receipt_token(env, asset, &receipt);
    Ok(receipt)
}

/// Removes `asset` from the allow-list and returns its receipt token.
///
/// Refused while receipts are outstanding: once unlisted, holders would have
/// no pool-mediated way to redeem. The receipt token is remembered so a
/// later `allow` reuses it.
pub fn disallow(env: &Env, asset: &Address) -> Result<Address, PoolError> {
    let receipt = require_allowed(env, asset)?;

    let outstanding = ReceiptTokenClient::new(env, &receipt).total_supply();
    if outstanding > 0 {
        log!(env, "registry: {} receipts outstanding for {}", outstanding, asset);
        return Err(PoolError::ReceiptsOutstanding);
    }

    storage::remove_receipt_token(env, asset);
    storage::set_delisted_receipt(env, asset, &receipt);
    Ok(receipt)
}

/// Receipt metadata derived from the underlying token: same decimals,
/// name `"Flash Pool <name>"`, symbol `"fp<symbol>"`.
pub fn receipt_metadata(env: &Env, asset: &Address) -> Result<(u32, String, String), PoolError> {
    let token = TokenClient::new(env, asset);
    let name = prefixed(env, NAME_PREFIX, &token.name())?;
    let symbol = prefixed(env, SYMBOL_PREFIX, &token.symbol())?;
    Ok((token.decimals(), name, symbol))
}

pub(crate) fn prefixed(env: &Env, prefix: &[u8], text: &String) -> Result<String, PoolError> {
    let total = prefix.len() + text.len() as usize;
    if total > MAX_METADATA_LEN {
        return Err(PoolError::InvalidMetadata);
    }

    let mut buf = [0u8; MAX_METADATA_LEN];
    buf[..prefix.len()].copy_from_slice(prefix);
    text.copy_into_slice(&mut buf[prefix.len()..total]);

    let joined = core::str::from_utf8(&buf[..total]).map_err(|_| PoolError::InvalidMetadata)?;
    Ok(String::from_str(env, joined))
}
