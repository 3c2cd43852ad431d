use soroban_sdk::{contracttype, Address, Env};

use crate::errors::ReceiptTokenError;

const DAY_IN_LEDGERS: u32 = 17280; // ~1 day in 5s ledgers
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;
const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const BALANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;
const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// Accounting state of one receipt token. `pool` and `underlying` never
/// change after `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiptState {
    pub pool: Address,
    pub underlying: Address,
    pub exchange_rate: i128,
    pub total_supply: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowanceEntry {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contracttype]
pub enum ReceiptKey {
    State,
    Balance(Address),
    Allowance(Address, Address),
}

pub fn has_state(env: &Env) -> bool {
    env.storage().instance().has(&ReceiptKey::State)
}

pub fn get_state(env: &Env) -> Option<ReceiptState> {
    env.storage().instance().get(&ReceiptKey::State)
}

pub fn set_state(env: &Env, state: &ReceiptState) {
    env.storage().instance().set(&ReceiptKey::State, state);
}

/// Extend instance storage TTL to keep the token alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn read_balance(env: &Env, id: &Address) -> i128 {
    let key = ReceiptKey::Balance(id.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(balance) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
            balance
        }
        None => 0,
    }
}

fn write_balance(env: &Env, id: &Address, amount: i128) {
    let key = ReceiptKey::Balance(id.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

pub fn receive_balance(env: &Env, id: &Address, amount: i128) -> Result<(), ReceiptTokenError> {
    let balance = read_balance(env, id)
        .checked_add(amount)
        .ok_or(ReceiptTokenError::Overflow)?;
    write_balance(env, id, balance);
    Ok(())
}

pub fn spend_balance(env: &Env, id: &Address, amount: i128) -> Result<(), ReceiptTokenError> {
    let balance = read_balance(env, id);
    if balance < amount {
        return Err(ReceiptTokenError::InsufficientBalance);
    }
    write_balance(env, id, balance - amount);
    Ok(())
}

/// Expired allowances read as zero but keep their expiration ledger.
pub fn read_allowance(env: &Env, from: &Address, spender: &Address) -> AllowanceEntry {
    let key = ReceiptKey::Allowance(from.clone(), spender.clone());
    match env.storage().temporary().get::<_, AllowanceEntry>(&key) {
        Some(entry) if entry.expiration_ledger >= env.ledger().sequence() => entry,
        Some(entry) => AllowanceEntry {
            amount: 0,
            expiration_ledger: entry.expiration_ledger,
        },
        None => AllowanceEntry {
            amount: 0,
            expiration_ledger: 0,
        },
    }
}

pub fn write_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
    expiration_ledger: u32,
) -> Result<(), ReceiptTokenError> {
    let current = env.ledger().sequence();
    if amount > 0 && expiration_ledger < current {
        return Err(ReceiptTokenError::InvalidExpiration);
    }

    let key = ReceiptKey::Allowance(from.clone(), spender.clone());
    env.storage().temporary().set(
        &key,
        &AllowanceEntry {
            amount,
            expiration_ledger,
        },
    );

    if amount > 0 {
        let live_for = expiration_ledger - current;
        env.storage().temporary().extend_ttl(&key, live_for, live_for);
    }
    Ok(())
}

pub fn spend_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), ReceiptTokenError> {
    let allowance = read_allowance(env, from, spender);
    if allowance.amount < amount {
        return Err(ReceiptTokenError::InsufficientAllowance);
    }
    if amount > 0 {
        write_allowance(
            env,
            from,
            spender,
            allowance.amount - amount,
            allowance.expiration_ledger,
        )?;
    }
    Ok(())
}
