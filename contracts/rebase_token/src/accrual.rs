use crate::error::Error;
use crate::storage::{Account, PRECISION};
use soroban_sdk::{Env, U256};

/// Linear growth multiplier since the last realization
///
/// Formula: growth = PRECISION + locked_rate × (now − last_accrual)
///
/// Example:
/// - locked_rate: 5e10 (per second), elapsed: 1 day (86,400s)
/// - growth: 1e18 + 5e10 × 86,400 = 1.00432e18 (0.432%)
///
/// Frozen at PRECISION for an account that never accrued, and for a
/// timestamp that has not moved past `last_accrual`.
pub fn growth_factor(account: &Account, now: u64) -> Result<i128, Error> {
    if account.last_accrual == 0 || now <= account.last_accrual {
        return Ok(PRECISION);
    }

    let elapsed = (now - account.last_accrual) as i128;
    account
        .locked_rate
        .checked_mul(elapsed)
        .and_then(|interest| interest.checked_add(PRECISION))
        .ok_or(Error::ArithmeticOverflow)
}

/// Principal scaled by the accrued growth factor
///
/// Formula: effective = principal × growth / PRECISION (rounded down)
pub fn effective_balance(env: &Env, account: &Account, now: u64) -> Result<i128, Error> {
    if account.principal == 0 {
        return Ok(0);
    }

    let growth = growth_factor(account, now)?;
    mul_div_floor(env, account.principal, growth, PRECISION)
}

/// `a × b / denominator` for non-negative operands, widening to 256 bits
/// when the product does not fit in i128.
pub fn mul_div_floor(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, Error> {
    if a < 0 || b < 0 || denominator <= 0 {
        return Err(Error::ArithmeticOverflow);
    }

    if let Some(product) = a.checked_mul(b) {
        return Ok(product / denominator);
    }

    let product = U256::from_u128(env, a as u128).mul(&U256::from_u128(env, b as u128));
    let quotient = product.div(&U256::from_u128(env, denominator as u128));

    quotient
        .to_u128()
        .and_then(|value| i128::try_from(value).ok())
        .ok_or(Error::ArithmeticOverflow)
}
