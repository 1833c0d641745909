use soroban_sdk::{contracttype, Address};

/// Value leaving one ledger for another
///
/// `(source_domain, nonce)` identifies the message; the relay may deliver it
/// more than once.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BridgeMessage {
    pub source_domain: u32,
    pub dest_domain: u32,
    pub nonce: u64,
    /// Holder whose balance was burned on the source ledger
    pub origin: Address,
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Ledger,
    Relayer,
    Domain,
    NextNonce,
    Outbound(u64),
    Processed(u32, u64), // (source_domain, nonce)
    Initialized,
}
