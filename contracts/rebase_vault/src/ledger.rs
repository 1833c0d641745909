//! Client-side view of the rebase token contract.

use soroban_sdk::{contractclient, contracttype, Address, Env};

/// Mirrors the ledger's amount argument; `All` means the full effective balance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Amount {
    Exact(i128),
    All,
}

#[contractclient(name = "LedgerClient")]
pub trait LedgerInterface {
    fn balance(env: Env, id: Address) -> i128;
    fn global_rate(env: Env) -> i128;
    fn issue(env: Env, minter: Address, to: Address, amount: i128, rate: i128);
    fn burn(env: Env, minter: Address, from: Address, amount: Amount) -> i128;
}
