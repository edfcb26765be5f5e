use crate::error::MathError;
use alloy_primitives::{U256, Uint};

/// 512‑bit scratch integer for products that do not fit in a `U256`.
pub(crate) type U512 = Uint<512, 8>;

const U256_ONE: U256 = U256::ONE;
const U256_TWO: U256 = U256::from_limbs([2, 0, 0, 0]);
const U256_THREE: U256 = U256::from_limbs([3, 0, 0, 0]);

/// `2 * RESOLUTION`: scaling `value` by `2^192` before the square root
/// yields `sqrt(value) * 2^96`.
const SQRT_SCALE_SHIFT: usize = 192;

/// Computes `floor(a * b / denominator)` with full 512‑bit intermediate
/// precision, returning a `MathError` on overflow or division by zero.
///
/// This mirrors the Solidity `FullMath.mulDiv` behavior and underpins
/// every liquidity and sqrt‑price calculation in the crate.
pub fn mul_div(a: U256, b: U256, mut denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    // 512-bit product as prod1 * 2^256 + prod0
    let mm = a.mul_mod(b, U256::MAX);
    let mut prod0 = a.wrapping_mul(b);

    let (mut prod1, borrow1) = mm.overflowing_sub(prod0);
    if borrow1 {
        prod1 = prod1.wrapping_sub(U256_ONE);
    }

    if prod1.is_zero() {
        return Ok(prod0.wrapping_div(denominator));
    }

    if denominator <= prod1 {
        return Err(MathError::Overflow);
    }

    let remainder = a.mul_mod(b, denominator);
    let (prod0_new, borrow2) = prod0.overflowing_sub(remainder);
    prod0 = prod0_new;
    if borrow2 {
        prod1 = prod1.wrapping_sub(U256_ONE);
    }

    let twos = denominator & denominator.wrapping_neg();
    denominator = denominator.wrapping_div(twos);
    prod0 = prod0.wrapping_div(twos);

    let twos_adj = twos
        .wrapping_neg()
        .wrapping_div(twos)
        .wrapping_add(U256_ONE);
    prod0 |= prod1.wrapping_mul(twos_adj);

    // modular inverse of denominator mod 2^256, correct to 4 bits then doubled each step
    let mut inv = U256_THREE.wrapping_mul(denominator) ^ U256_TWO;
    for _ in 0..6 {
        inv = inv.wrapping_mul(U256_TWO.wrapping_sub(denominator.wrapping_mul(inv)));
    }

    Ok(prod0.wrapping_mul(inv))
}

/// Computes `floor(sqrt(numerator / denominator) * 2^96)` exactly.
///
/// The rational is scaled by `2^192` and floor‑divided on a 512‑bit
/// integer before taking the integer square root, so the result never
/// depends on floating point. Since `isqrt(floor(x)) == floor(sqrt(x))`
/// for any non‑negative real `x`, the two floors compose exactly.
pub fn sqrt_scaled(numerator: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    if numerator.is_zero() {
        return Ok(U256::ZERO);
    }

    let scaled = (U512::from(numerator) << SQRT_SCALE_SHIFT) / U512::from(denominator);
    narrow(scaled.root(2))
}

/// Narrows a 512‑bit value back into a `U256`.
pub(crate) fn narrow(value: U512) -> Result<U256, MathError> {
    if value.bit_len() > 256 {
        return Err(MathError::Overflow);
    }
    let limbs = value.as_limbs();
    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Converts a `U256` into the nearest `f64`. Display use only.
pub(crate) fn u256_to_f64(value: U256) -> f64 {
    value
        .as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * 18_446_744_073_709_551_616.0 + *limb as f64)
}
