use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct SentEvent {
    pub nonce: u64,
    pub dest_domain: u32,
    pub origin: Address,
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ReceivedEvent {
    pub source_domain: u32,
    pub nonce: u64,
    pub recipient: Address,
    pub amount: i128,
    pub rate: i128,
}
