#![allow(dead_code)]

use clmm_liquidity_math::math::liquidity_math::{
    amounts_for_liquidity, liquidity_for_amounts, liquidity_from_amount_0,
};
use clmm_liquidity_math::math::math_helpers::{mul_div, sqrt_scaled};
use clmm_liquidity_math::math::sqrt_price_math::{
    next_sqrt_price_from_amount_0, next_sqrt_price_from_amount_1, price_to_sqrt_price_x96,
};
use clmm_liquidity_math::math::tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, price_to_tick,
};
use clmm_liquidity_math::{Price, Q96, SwapDirection, SwapStep, U256};
use criterion::{Criterion, black_box};
use std::str::FromStr;

const ONE_E18: u128 = 1_000_000_000_000_000_000;

fn position() -> (U256, U256, U256) {
    let sqrt = |price: u64| price_to_sqrt_price_x96(&Price::from(price)).unwrap();
    (sqrt(5000), sqrt(4545), sqrt(5500))
}

pub fn bench_math_helpers(c: &mut Criterion) {
    let a = U256::from_str("1025574284609383690408304870162715216695788925244").unwrap();
    let b = U256::from(50015962439936049619261659728067971248u128);

    c.bench_function("mul_div", |bencher| {
        bencher.iter(|| mul_div(black_box(a), black_box(b), black_box(Q96)))
    });
    c.bench_function("sqrt_scaled", |bencher| {
        bencher.iter(|| sqrt_scaled(black_box(U256::from(5000u64)), black_box(U256::ONE)))
    });
}

pub fn bench_tick_math(c: &mut Criterion) {
    let sqrt_price = get_sqrt_ratio_at_tick(85176).unwrap();
    let price = Price::from(5000u64);

    c.bench_function("get_sqrt_ratio_at_tick", |bencher| {
        bencher.iter(|| get_sqrt_ratio_at_tick(black_box(-85176)))
    });
    c.bench_function("get_tick_at_sqrt_ratio", |bencher| {
        bencher.iter(|| get_tick_at_sqrt_ratio(black_box(sqrt_price)))
    });
    c.bench_function("price_to_tick", |bencher| {
        bencher.iter(|| price_to_tick(black_box(&price)))
    });
}

pub fn bench_sqrt_price_math(c: &mut Criterion) {
    let price = Price::from_str("4999.75").unwrap();
    let amount_in = U256::from(ONE_E18 / 10);

    c.bench_function("price_to_sqrt_price_x96", |bencher| {
        bencher.iter(|| price_to_sqrt_price_x96(black_box(&price)))
    });
    c.bench_function("next_sqrt_price_from_amount_0", |bencher| {
        bencher.iter(|| {
            next_sqrt_price_from_amount_0(black_box(ONE_E18), black_box(Q96), black_box(amount_in))
        })
    });
    c.bench_function("next_sqrt_price_from_amount_1", |bencher| {
        bencher.iter(|| {
            next_sqrt_price_from_amount_1(black_box(ONE_E18), black_box(Q96), black_box(amount_in))
        })
    });
}

pub fn bench_liquidity_math(c: &mut Criterion) {
    let (current, lower, upper) = position();
    let amount0 = U256::from(ONE_E18);
    let amount1 = U256::from(5000 * ONE_E18);

    c.bench_function("liquidity_from_amount_0", |bencher| {
        bencher.iter(|| liquidity_from_amount_0(black_box(amount0), current, upper))
    });
    c.bench_function("liquidity_for_amounts", |bencher| {
        bencher.iter(|| {
            liquidity_for_amounts(
                black_box(current),
                lower,
                upper,
                black_box(amount0),
                black_box(amount1),
            )
        })
    });
    c.bench_function("amounts_for_liquidity", |bencher| {
        bencher.iter(|| {
            amounts_for_liquidity(
                black_box(current),
                lower,
                upper,
                black_box(1_517_882_343_751_510_417_954),
            )
        })
    });
}

pub fn bench_swap(c: &mut Criterion) {
    let (current, lower, upper) = position();
    let liquidity = liquidity_for_amounts(
        current,
        lower,
        upper,
        U256::from(ONE_E18),
        U256::from(5000 * ONE_E18),
    )
    .unwrap();

    c.bench_function("swap_step_sell_quote", |bencher| {
        bencher.iter(|| {
            SwapStep::new(
                black_box(liquidity),
                black_box(current),
                black_box(U256::from(42 * ONE_E18)),
                SwapDirection::SellQuote,
            )
            .execute()
        })
    });
    c.bench_function("swap_step_sell_base", |bencher| {
        bencher.iter(|| {
            SwapStep::new(
                black_box(liquidity),
                black_box(current),
                black_box(U256::from(13_370_000_000_000_000u64)),
                SwapDirection::SellBase,
            )
            .execute()
        })
    });
}
