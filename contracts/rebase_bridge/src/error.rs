use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AMOUNT ERRORS (20-29)
    // ============================================
    /// Nothing was burned for the outbound message
    ZeroAmount = 20,
    /// Relayed message carries a non-positive amount
    InvalidAmount = 21,

    // ============================================
    // MESSAGE ERRORS (30-39)
    // ============================================
    /// Message is addressed to another domain
    WrongDomain = 30,
    /// No outbound message with this nonce
    MessageNotFound = 31,
}
