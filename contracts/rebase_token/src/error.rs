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
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller does not hold the mint-and-burn role
    Unauthorized = 10,

    // ============================================
    // AMOUNT/BALANCE ERRORS (20-29)
    // ============================================
    /// Resolved amount exceeds principal after realization
    InsufficientBalance = 20,
    /// Spender allowance is below the resolved amount
    InsufficientAllowance = 21,
    /// Amount must not be negative
    InvalidAmount = 22,

    // ============================================
    // RATE ERRORS (30-39)
    // ============================================
    /// Global rate may only stay the same or decrease
    RateIncreaseRejected = 30,
    /// Rate must not be negative
    InvalidRate = 31,

    // ============================================
    // ARITHMETIC ERRORS (40-49)
    // ============================================
    /// Balance or growth factor does not fit in i128
    ArithmeticOverflow = 40,
}
