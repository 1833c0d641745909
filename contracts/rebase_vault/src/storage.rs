use soroban_sdk::contracttype;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    BaseAsset,
    Ledger,
    Initialized,
    Paused,
}
