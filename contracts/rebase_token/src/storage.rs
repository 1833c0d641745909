use soroban_sdk::{contracttype, Address, Env};

// Constants
pub const PRECISION: i128 = 1_000_000_000_000_000_000; // 1e18
pub const UNLIMITED_ALLOWANCE: i128 = i128::MAX;

/// Per-holder accrual record
///
/// Never removed once written: a holder that burns to zero keeps a dormant
/// record with its last locked rate.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Account {
    /// Last-realized minted amount, excluding unrealized interest
    pub principal: i128,
    /// Rate per second scaled by PRECISION, captured at issuance or inheritance
    pub locked_rate: i128,
    /// Ledger timestamp of the last realization (0 = never accrued)
    pub last_accrual: u64,
}

/// Amount argument for burn and transfer
///
/// `All` resolves to the holder's effective balance right after realization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Amount {
    Exact(i128),
    All,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    Name,
    Symbol,
    Decimals,
    GlobalRate,
    TotalPrincipal,
    Minter(Address),
    Account(Address),
    Allowance(Address, Address), // (from, spender)
}

pub fn read_account(env: &Env, user: &Address) -> Account {
    env.storage()
        .persistent()
        .get(&DataKey::Account(user.clone()))
        .unwrap_or_default()
}

pub fn write_account(env: &Env, user: &Address, account: &Account) {
    env.storage()
        .persistent()
        .set(&DataKey::Account(user.clone()), account);
}

pub fn read_allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Allowance(from.clone(), spender.clone()))
        .unwrap_or(0)
}

pub fn write_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
    }
}

pub fn read_total_principal(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalPrincipal)
        .unwrap_or(0)
}

pub fn write_total_principal(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalPrincipal, &total);
}

pub fn has_minter_role(env: &Env, account: &Address) -> bool {
    env.storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Minter(account.clone()))
        .unwrap_or(false)
}
