//! End‑to‑end walkthrough through the public API: a 4545–5500 ETH/USDC
//! position opened at 5000, followed by one swap in each direction.

use clmm_liquidity_math::math::liquidity_math::{
    amounts_for_liquidity, liquidity_for_amounts, liquidity_from_amount_0,
    liquidity_from_amount_1,
};
use clmm_liquidity_math::math::sqrt_price_math::{
    price_to_sqrt_price_x96, sqrt_price_x96_to_price,
};
use clmm_liquidity_math::math::tick_math::{get_tick_at_sqrt_ratio, price_to_tick};
use clmm_liquidity_math::{Price, SwapDirection, SwapStep, U256};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn ether(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(18u8))
}

fn sqrt_price(price: u64) -> U256 {
    price_to_sqrt_price_x96(&Price::from(price)).unwrap()
}

struct Position {
    sqrt_cur: U256,
    sqrt_low: U256,
    sqrt_upp: U256,
    liquidity: u128,
}

fn open_position() -> Position {
    let sqrt_cur = sqrt_price(5000);
    let sqrt_low = sqrt_price(4545);
    let sqrt_upp = sqrt_price(5500);
    let liquidity =
        liquidity_for_amounts(sqrt_cur, sqrt_low, sqrt_upp, ether(1), ether(5000)).unwrap();
    Position {
        sqrt_cur,
        sqrt_low,
        sqrt_upp,
        liquidity,
    }
}

// ---------------------------------------------------------------------------
// Position setup
// ---------------------------------------------------------------------------

#[test]
fn ticks_of_the_position_bounds() {
    assert_eq!(price_to_tick(&Price::from(5000u64)).unwrap(), 85176);
    assert_eq!(price_to_tick(&Price::from(4545u64)).unwrap(), 84222);
    assert_eq!(price_to_tick(&Price::from(5500u64)).unwrap(), 86129);
    // the tick for half the price unit sits below zero
    assert_eq!(price_to_tick(&Price::from_str("0.5").unwrap()).unwrap(), -6932);
}

#[test]
fn sqrt_price_of_5000_is_the_floored_root() {
    let sqrt_cur = sqrt_price(5000);
    let target = U256::from(5000u64) << 192;
    assert!(sqrt_cur * sqrt_cur <= target);
    assert!((sqrt_cur + U256::ONE) * (sqrt_cur + U256::ONE) > target);

    // the float approximation agrees to ~50 significant bits
    let float_estimate = U256::from_str("5602277097478614198912276234240").unwrap();
    let diff = if float_estimate > sqrt_cur {
        float_estimate - sqrt_cur
    } else {
        sqrt_cur - float_estimate
    };
    assert!(diff < U256::ONE << 52);
}

#[test]
fn deposit_binds_to_the_smaller_liquidity() {
    let position = open_position();

    let liquidity0 =
        liquidity_from_amount_0(ether(1), position.sqrt_cur, position.sqrt_upp).unwrap();
    let liquidity1 =
        liquidity_from_amount_1(ether(5000), position.sqrt_cur, position.sqrt_low).unwrap();

    assert_eq!(liquidity0, 1519437308014768571712);
    assert_eq!(liquidity1, 1517882343751510417954);
    assert_eq!(position.liquidity, liquidity0.min(liquidity1));

    // the two sides agree to within 0.2%
    assert!((liquidity0 - liquidity1) * 500 < liquidity1);
}

#[test]
fn deposit_amounts_recomputed_from_liquidity() {
    let position = open_position();
    let (amount0, amount1) = amounts_for_liquidity(
        position.sqrt_cur,
        position.sqrt_low,
        position.sqrt_upp,
        position.liquidity,
    )
    .unwrap();

    // token1 binds and comes back minus rounding, token0 is partly unused
    assert_eq!(amount0, U256::from(998976618347426388u64));
    assert_eq!(amount1, U256::from_str("4999999999999999999997").unwrap());
    assert!(amount0 <= ether(1));
    assert!(amount1 <= ether(5000));
}

// ---------------------------------------------------------------------------
// Swaps
// ---------------------------------------------------------------------------

#[test]
fn selling_42_usdc_moves_the_price_up() {
    let position = open_position();
    let amount_in = ether(42);

    let result = SwapStep::new(
        position.liquidity,
        position.sqrt_cur,
        amount_in,
        SwapDirection::SellQuote,
    )
    .execute()
    .unwrap();

    assert_eq!(
        result.sqrt_price_next(),
        U256::from_str("5604469350942327681612156855642").unwrap()
    );
    assert_eq!(get_tick_at_sqrt_ratio(result.sqrt_price_next()).unwrap(), 85184);
    assert!((sqrt_price_x96_to_price(result.sqrt_price_next()) - 5003.9139).abs() < 1e-3);

    assert_eq!(
        result.amount_in(),
        U256::from_str("41999999999999999999").unwrap()
    );
    assert_eq!(result.amount_out(), U256::from(8396714242162445u64));
}

#[test]
fn selling_0_01337_eth_moves_the_price_down() {
    let position = open_position();
    let amount_in = U256::from(13_370_000_000_000_000u64);

    let result = SwapStep::new(
        position.liquidity,
        position.sqrt_cur,
        amount_in,
        SwapDirection::SellBase,
    )
    .execute()
    .unwrap();

    assert_eq!(
        result.sqrt_price_next(),
        U256::from_str("5598789932670288495994550426723").unwrap()
    );
    assert_eq!(get_tick_at_sqrt_ratio(result.sqrt_price_next()).unwrap(), 85163);
    assert!((sqrt_price_x96_to_price(result.sqrt_price_next()) - 4993.7774).abs() < 1e-3);

    assert_eq!(result.amount_in(), amount_in);
    assert_eq!(
        result.amount_out(),
        U256::from_str("66808388890199401762").unwrap()
    );
}

#[test]
fn opposite_directions_move_the_price_apart() {
    let position = open_position();

    let up = SwapStep::new(
        position.liquidity,
        position.sqrt_cur,
        ether(42),
        SwapDirection::SellQuote,
    )
    .compute_next_price()
    .unwrap();
    let down = SwapStep::new(
        position.liquidity,
        position.sqrt_cur,
        U256::from(13_370_000_000_000_000u64),
        SwapDirection::SellBase,
    )
    .compute_next_price()
    .unwrap();

    assert!(up.sqrt_price_next() > position.sqrt_cur);
    assert!(down.sqrt_price_next() < position.sqrt_cur);
}

#[test]
fn swaps_past_the_position_range_are_extrapolated() {
    let position = open_position();

    // far more USDC than the range holds: no clamping at the upper bound
    let result = SwapStep::new(
        position.liquidity,
        position.sqrt_cur,
        ether(1_000_000),
        SwapDirection::SellQuote,
    )
    .execute()
    .unwrap();

    assert!(result.sqrt_price_next() > position.sqrt_upp);
}
