//! Liquidity ↔ token amount conversions over a sqrt‑price range.
//!
//! Every function accepts its two sqrt‑price bounds in either order and
//! normalizes them so that `a < b`. Equal bounds describe an empty range
//! and fail with `StateError::InvalidRange`. All divisions floor.

use crate::Q96;
use crate::error::{Error, MathError, StateError};
use crate::math::math_helpers::{U512, mul_div, narrow};
use alloy_primitives::U256;
use tracing::trace;

#[inline]
fn sorted_range(sqrt_price_a_x96: U256, sqrt_price_b_x96: U256) -> Result<(U256, U256), StateError> {
    if sqrt_price_a_x96 == sqrt_price_b_x96 {
        return Err(StateError::InvalidRange);
    }
    if sqrt_price_a_x96 > sqrt_price_b_x96 {
        Ok((sqrt_price_b_x96, sqrt_price_a_x96))
    } else {
        Ok((sqrt_price_a_x96, sqrt_price_b_x96))
    }
}

#[inline]
fn to_liquidity(value: U256) -> Result<u128, MathError> {
    u128::try_from(value).map_err(|_| MathError::Overflow)
}

/// Liquidity backed by `amount0` of token0 over `[a, b]`:
///
/// `floor(amount0 * a * b / 2^96 / (b - a))`
///
/// The product is kept whole in 512 bits so no fraction of `a * b / 2^96`
/// is lost before scaling by `amount0`.
pub fn liquidity_from_amount_0(
    amount0: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
) -> Result<u128, Error> {
    let (lower, upper) = sorted_range(sqrt_price_a_x96, sqrt_price_b_x96)?;

    // past 512 bits the quotient is at least 2^160, never a u128
    let numerator = (U512::from(lower) * U512::from(upper))
        .checked_mul(U512::from(amount0))
        .ok_or(MathError::Overflow)?;
    let denominator = U512::from(Q96) * U512::from(upper - lower);

    Ok(to_liquidity(narrow(numerator / denominator)?)?)
}

/// Liquidity backed by `amount1` of token1 over `[a, b]`:
///
/// `floor(amount1 * 2^96 / (b - a))`
pub fn liquidity_from_amount_1(
    amount1: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
) -> Result<u128, Error> {
    let (lower, upper) = sorted_range(sqrt_price_a_x96, sqrt_price_b_x96)?;
    Ok(to_liquidity(mul_div(amount1, Q96, upper - lower)?)?)
}

/// Amount of token0 represented by `liquidity` over `[a, b]`:
///
/// `floor(floor(L * 2^96 * (b - a) / b) / a)`
///
/// A zero lower bound has no token0 value and yields `StateError::InvalidPrice`.
pub fn amount_0_delta(
    liquidity: u128,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
) -> Result<U256, Error> {
    let (lower, upper) = sorted_range(sqrt_price_a_x96, sqrt_price_b_x96)?;
    if lower.is_zero() {
        return Err(StateError::InvalidPrice.into());
    }

    let numerator1 = U256::from(liquidity) << crate::RESOLUTION;
    let numerator2 = upper - lower;

    Ok(mul_div(numerator1, numerator2, upper)? / lower)
}

/// Amount of token1 represented by `liquidity` over `[a, b]`:
///
/// `floor(L * (b - a) / 2^96)`
pub fn amount_1_delta(
    liquidity: u128,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
) -> Result<U256, Error> {
    let (lower, upper) = sorted_range(sqrt_price_a_x96, sqrt_price_b_x96)?;
    Ok(mul_div(U256::from(liquidity), upper - lower, Q96)?)
}

/// Largest liquidity that the deposit `(amount0, amount1)` can back over
/// `[a, b]` at the current sqrt price.
///
/// Inside the range token0 covers `[current, upper]` and token1 covers
/// `[lower, current]`; the smaller of the two liquidities binds. Below the
/// range only token0 is used, above it only token1.
pub fn liquidity_for_amounts(
    sqrt_price_current_x96: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    amount0: U256,
    amount1: U256,
) -> Result<u128, Error> {
    let (lower, upper) = sorted_range(sqrt_price_a_x96, sqrt_price_b_x96)?;

    if sqrt_price_current_x96 <= lower {
        return liquidity_from_amount_0(amount0, lower, upper);
    }
    if sqrt_price_current_x96 >= upper {
        return liquidity_from_amount_1(amount1, lower, upper);
    }

    let liquidity0 = liquidity_from_amount_0(amount0, sqrt_price_current_x96, upper)?;
    let liquidity1 = liquidity_from_amount_1(amount1, lower, sqrt_price_current_x96)?;
    trace!(liquidity0, liquidity1, "liquidity from deposit");

    Ok(liquidity0.min(liquidity1))
}

/// Token amounts `(amount0, amount1)` that `liquidity` holds over `[a, b]`
/// at the current sqrt price, split the same way as [`liquidity_for_amounts`].
pub fn amounts_for_liquidity(
    sqrt_price_current_x96: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
) -> Result<(U256, U256), Error> {
    let (lower, upper) = sorted_range(sqrt_price_a_x96, sqrt_price_b_x96)?;

    if sqrt_price_current_x96 <= lower {
        return Ok((amount_0_delta(liquidity, lower, upper)?, U256::ZERO));
    }
    if sqrt_price_current_x96 >= upper {
        return Ok((U256::ZERO, amount_1_delta(liquidity, lower, upper)?));
    }

    Ok((
        amount_0_delta(liquidity, sqrt_price_current_x96, upper)?,
        amount_1_delta(liquidity, lower, sqrt_price_current_x96)?,
    ))
}
