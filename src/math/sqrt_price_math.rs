use crate::math::math_helpers::{U512, mul_div, narrow, sqrt_scaled, u256_to_f64};
use crate::price::Price;
use crate::{
    Q96, RESOLUTION, U160_MAX,
    error::{Error, MathError, StateError},
};
use alloy_primitives::U256;

/// Encodes a price as a Q64.96 sqrt price: `floor(sqrt(price) * 2^96)`.
///
/// A zero price encodes to zero; negative prices cannot be constructed.
pub fn price_to_sqrt_price_x96(price: &Price) -> Result<U256, Error> {
    Ok(sqrt_scaled(price.numerator(), price.denominator())?)
}

/// Decodes a Q64.96 sqrt price into `(sqrt_price_x96 / 2^96)^2`.
///
/// The result is a display value and is never fed back into the math.
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256) -> f64 {
    let sqrt_price = u256_to_f64(sqrt_price_x96) / u256_to_f64(Q96);
    sqrt_price * sqrt_price
}

#[inline]
fn check_inputs(liquidity: u128, sqrt_price_x96: U256) -> Result<(), StateError> {
    if sqrt_price_x96.is_zero() {
        return Err(StateError::InvalidPrice);
    }
    if liquidity == 0 {
        return Err(StateError::InvalidLiquidity);
    }
    Ok(())
}

/// Computes the sqrt price after `amount_in` of token0 (the base token)
/// is added to the pool:
///
/// `floor(L * 2^96 * P / (L * 2^96 + amount_in * P))`
///
/// Selling the base token always moves the price down.
pub fn next_sqrt_price_from_amount_0(
    liquidity: u128,
    sqrt_price_x96: U256,
    amount_in: U256,
) -> Result<U256, Error> {
    check_inputs(liquidity, sqrt_price_x96)?;
    if amount_in.is_zero() {
        return Ok(sqrt_price_x96);
    }

    let numerator1: U256 = U256::from(liquidity) << RESOLUTION;

    if let Some(denominator) = amount_in
        .checked_mul(sqrt_price_x96)
        .and_then(|product| numerator1.checked_add(product))
    {
        return Ok(mul_div(numerator1, sqrt_price_x96, denominator)?);
    }

    // amount_in * P no longer fits in 256 bits, redo it in 512
    let numerator1 = U512::from(numerator1);
    let sqrt_price = U512::from(sqrt_price_x96);
    let denominator = numerator1 + U512::from(amount_in) * sqrt_price;
    Ok(narrow((numerator1 * sqrt_price) / denominator)?)
}

/// Computes the sqrt price after `amount_in` of token1 (the quote token)
/// is added to the pool:
///
/// `P + floor(amount_in * 2^96 / L)`
///
/// Selling the quote token always moves the price up. The result must stay
/// within the 160‑bit sqrt‑price domain.
pub fn next_sqrt_price_from_amount_1(
    liquidity: u128,
    sqrt_price_x96: U256,
    amount_in: U256,
) -> Result<U256, Error> {
    check_inputs(liquidity, sqrt_price_x96)?;
    let liquidity = U256::from(liquidity);

    let quotient: U256 = if amount_in <= U160_MAX {
        (amount_in << RESOLUTION) / liquidity
    } else {
        mul_div(amount_in, Q96, liquidity)?
    };

    match sqrt_price_x96.checked_add(quotient) {
        Some(result) if result <= U160_MAX => Ok(result),
        _ => Err(MathError::Overflow.into()),
    }
}
