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
    /// Deposit, redemption or funding of zero units
    ZeroAmount = 20,
    /// Amount must not be negative
    InvalidAmount = 21,

    // ============================================
    // SETTLEMENT ERRORS (30-39)
    // ============================================
    /// Base asset could not be released; the paired burn is rolled back
    ReleaseFailed = 30,

    // ============================================
    // OPERATIONAL ERRORS (40-49)
    // ============================================
    /// Contract is paused
    ContractPaused = 40,
}
