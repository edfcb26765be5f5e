use crate::TICK_BASE;
use crate::error::{Error, MathError, StateError};
use crate::math::math_helpers::U512;
use crate::math::sqrt_price_math::price_to_sqrt_price_x96;
use crate::price::Price;
use alloy_primitives::{I256, U256, Uint};

type U1024 = Uint<1024, 16>;

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

// log_sqrt(1.0001)(2) in Q128.128
const SQRT_10001: I256 = I256::from_raw(U256::from_limbs([11745905768312294533, 13863, 0, 0]));
const TICK_LOW: I256 = I256::from_raw(U256::from_limbs([
    6552757943157144234,
    184476617836266586,
    0,
    0,
]));
const TICK_HIGH: I256 = I256::from_raw(U256::from_limbs([
    4998474450511881007,
    15793544031827761793,
    0,
    0,
]));

const SHIFT_32: usize = 32;
const SHIFT_64: usize = 64;
const SHIFT_127: usize = 127;
const SHIFT_128: usize = 128;

const TICK_BASE_NUMERATOR: u64 = 10001;
const TICK_BASE_DENOMINATOR: u64 = 10000;
// 10001^19 is the largest power below 2^256
const EXACT_POWER_MAX_EXPONENT: u32 = 19;
const POWER_FRACTION_BITS: usize = 384;

/// Converts a price into its tick: `floor(log_1.0001(price))`.
///
/// The log is evaluated without floating point. The price is taken to its
/// floored Q64.96 square root and located on the tick ladder. The ladder
/// ratios are rounded, so a price whose root lies within `2^-64` (relative)
/// of a tick boundary is settled by comparing it against `1.0001^tick`
/// directly: exactly for `|tick| <= 19`, where an exact power of 1.0001 can
/// be written as a 256‑bit ratio, and otherwise against a lower bound
/// carrying 384 fractional bits.
///
/// # Errors
///
/// * `StateError::InvalidPrice` for a zero price.
/// * `StateError::SqrtPriceOutOfBounds` when the price lies outside the
///   `[MIN_TICK, MAX_TICK]` grid (its sqrt price is outside
///   `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`). The tick grid is the only range
///   limit this conversion has.
pub fn price_to_tick(price: &Price) -> Result<i32, Error> {
    if price.is_zero() {
        return Err(StateError::InvalidPrice.into());
    }
    let sqrt_price_x96 = price_to_sqrt_price_x96(price)?;
    let tick = get_tick_at_sqrt_ratio(sqrt_price_x96)?;

    let margin = (sqrt_price_x96 >> SHIFT_64) + U256::from(2u8);

    if tick < MAX_TICK
        && get_sqrt_ratio_at_tick(tick + 1)? <= sqrt_price_x96 + margin
        && price_at_or_above_tick(price, tick + 1)?
    {
        return Ok(tick + 1);
    }
    if sqrt_price_x96 - get_sqrt_ratio_at_tick(tick)? < margin
        && !price_at_or_above_tick(price, tick)?
    {
        if tick == MIN_TICK {
            return Err(StateError::SqrtPriceOutOfBounds.into());
        }
        return Ok(tick - 1);
    }
    Ok(tick)
}

/// Whether `price >= 1.0001^tick`.
fn price_at_or_above_tick(price: &Price, tick: i32) -> Result<bool, MathError> {
    let exponent = tick.unsigned_abs();
    let (up, down) = if tick >= 0 {
        (TICK_BASE_NUMERATOR, TICK_BASE_DENOMINATOR)
    } else {
        (TICK_BASE_DENOMINATOR, TICK_BASE_NUMERATOR)
    };

    if exponent <= EXACT_POWER_MAX_EXPONENT {
        let exponent = U512::from(exponent);
        let lhs = U512::from(price.numerator()) * U512::from(down).pow(exponent);
        let rhs = U512::from(price.denominator()) * U512::from(up).pow(exponent);
        return Ok(lhs >= rhs);
    }

    // no 256-bit ratio equals 1.0001^tick here; a price inside the
    // lower bound's error is taken to be on the boundary
    let lower_bound = power_floor(up, down, exponent)?;
    let scaled_price = U1024::from(price.numerator()) << POWER_FRACTION_BITS;
    Ok(scaled_price >= U1024::from(price.denominator()) * lower_bound)
}

/// `(up / down)^exponent` scaled by `2^POWER_FRACTION_BITS`, rounded down at
/// every step.
fn power_floor(up: u64, down: u64, mut exponent: u32) -> Result<U1024, MathError> {
    let mut base = (U1024::from(up) << POWER_FRACTION_BITS) / U1024::from(down);
    let mut power = U1024::ONE << POWER_FRACTION_BITS;

    loop {
        if exponent & 1 != 0 {
            power = power.checked_mul(base).ok_or(MathError::Overflow)? >> POWER_FRACTION_BITS;
        }
        exponent >>= 1;
        if exponent == 0 {
            return Ok(power);
        }
        base = base.checked_mul(base).ok_or(MathError::Overflow)? >> POWER_FRACTION_BITS;
    }
}

/// Returns `1.0001^tick` as a display value. No tick bounds are applied.
#[inline]
pub fn tick_to_price(tick: i32) -> f64 {
    TICK_BASE.powi(tick)
}

/// Returns the tick unchanged if it lies within `[MIN_TICK, MAX_TICK]`.
#[inline]
pub fn check_tick(tick: i32) -> Result<i32, StateError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(StateError::TickOutOfBounds);
    }
    Ok(tick)
}

/// Floors `tick` onto the `tick_spacing` grid, keeping the result inside
/// the usable tick bounds.
pub fn align_tick(tick: i32, tick_spacing: i32) -> Result<i32, StateError> {
    if tick_spacing <= 0 {
        return Err(StateError::InvalidTickSpacing);
    }
    let tick = check_tick(tick)?;

    let aligned = tick - tick.rem_euclid(tick_spacing);
    if aligned < MIN_TICK {
        Ok(aligned + tick_spacing)
    } else {
        Ok(aligned)
    }
}

/// Returns the sqrt price (Q64.96 fixed‑point) at a given tick index,
/// or `StateError::TickOutOfBounds` if the tick is invalid.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, StateError> {
    let abs_tick = check_tick(tick)?.unsigned_abs();

    let mut ratio = if abs_tick & 1 != 0 {
        U256::from_limbs([12262481743371124737, 18445821805675392311, 0, 0])
    } else {
        U256::from_limbs([0, 0, 1, 0])
    };

    macro_rules! apply_multiplier {
        ($bit:expr, $l0:expr, $l1:expr) => {
            if abs_tick & $bit != 0 {
                ratio = ratio.wrapping_mul(U256::from_limbs([$l0, $l1, 0, 0])) >> SHIFT_128;
            }
        };
    }

    apply_multiplier!(2, 6459403834229662010, 18444899583751176498);
    apply_multiplier!(4, 17226890335427755468, 18443055278223354162);
    apply_multiplier!(8, 2032852871939366096, 18439367220385604838);
    apply_multiplier!(16, 14545316742740207172, 18431993317065449817);
    apply_multiplier!(32, 5129152022828963008, 18417254355718160513);
    apply_multiplier!(64, 4894419605888772193, 18387811781193591352);
    apply_multiplier!(128, 1280255884321894483, 18329067761203520168);
    apply_multiplier!(256, 15924666964335305636, 18212142134806087854);
    apply_multiplier!(512, 8010504389359918676, 17980523815641551639);
    apply_multiplier!(1024, 10668036004952895731, 17526086738831147013);
    apply_multiplier!(2048, 4878133418470705625, 16651378430235024244);
    apply_multiplier!(4096, 9537173718739605541, 15030750278693429944);
    apply_multiplier!(8192, 9972618978014552549, 12247334978882834399);
    apply_multiplier!(16384, 10428997489610666743, 8131365268884726200);
    apply_multiplier!(32768, 9305304367709015974, 3584323654723342297);
    apply_multiplier!(65536, 14301143598189091785, 696457651847595233);
    apply_multiplier!(131072, 7393154844743099908, 26294789957452057);
    apply_multiplier!(262144, 2209338891292245656, 37481735321082);
    apply_multiplier!(524288, 10518117631919034274, 76158723);

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up so that get_tick_at_sqrt_ratio inverts exactly
    let lower_32_bits = ratio.as_limbs()[0] & 0xFFFF_FFFF;
    Ok((ratio >> SHIFT_32) + U256::from((lower_32_bits != 0) as u64))
}

/// Computes the greatest tick whose sqrt ratio is at or below the given
/// sqrt price (Q64.96 fixed‑point), enforcing the tick grid bounds.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32, StateError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(StateError::SqrtPriceOutOfBounds);
    }

    let ratio = sqrt_price_x96 << SHIFT_32;
    let msb = ratio.bit_len() - 1;

    let mut r = if msb >= SHIFT_127 {
        ratio >> (msb - SHIFT_127)
    } else {
        ratio << (SHIFT_127 - msb)
    };

    let mut log_2: I256 =
        (I256::from_raw(U256::from(msb)) - I256::from_raw(U256::from(SHIFT_128))) << SHIFT_64;

    // fractional bits of log2, one squaring per bit
    for shift in (50..=63usize).rev() {
        r = r.wrapping_mul(r) >> SHIFT_127;
        let f = r >> SHIFT_128;
        log_2 |= I256::from_raw(f << shift);
        r >>= f.as_limbs()[0] as usize;
    }

    let log_sqrt10001 = log_2.wrapping_mul(SQRT_10001);
    let tick_low = (log_sqrt10001 - TICK_LOW).asr(SHIFT_128).low_i32();
    let tick_high = (log_sqrt10001 + TICK_HIGH).asr(SHIFT_128).low_i32();

    Ok(if tick_low == tick_high {
        tick_low
    } else if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x96 {
        tick_high
    } else {
        tick_low
    })
}
