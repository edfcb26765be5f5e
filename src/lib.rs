//! Concentrated-liquidity (Uniswap V3–style) AMM math in pure Rust.
//!
//! This crate exposes:
//! - Fixed‑point primitives (`math::math_helpers`) with floor semantics.
//! - Price ↔ tick and price ↔ Q64.96 sqrt‑price conversions.
//! - Liquidity derivation from deposits and token amounts for a liquidity.
//! - A single‑step swap engine (`swap`) that moves the price along the curve.
//!
//! Every function is pure: inputs in, fresh values out.
//!
//! # Examples
//!
//! ## Providing liquidity and swapping against it
//! ```
//! use clmm_liquidity_math::{
//!     math::{liquidity_math, sqrt_price_math::price_to_sqrt_price_x96, tick_math::price_to_tick},
//!     swap::{SwapDirection, SwapStep},
//!     Price, U256,
//! };
//!
//! let current = Price::from(5000u64);
//! assert_eq!(price_to_tick(&current).unwrap(), 85176);
//!
//! let sqrt_cur = price_to_sqrt_price_x96(&current).unwrap();
//! let sqrt_low = price_to_sqrt_price_x96(&Price::from(4545u64)).unwrap();
//! let sqrt_upp = price_to_sqrt_price_x96(&Price::from(5500u64)).unwrap();
//!
//! let eth = U256::from(10u128.pow(18));
//! let usdc = U256::from(5000u128 * 10u128.pow(18));
//! let liquidity =
//!     liquidity_math::liquidity_for_amounts(sqrt_cur, sqrt_low, sqrt_upp, eth, usdc).unwrap();
//!
//! // Sell 42 USDC into the pool: the price goes up.
//! let result = SwapStep::new(
//!     liquidity,
//!     sqrt_cur,
//!     U256::from(42u128 * 10u128.pow(18)),
//!     SwapDirection::SellQuote,
//! )
//! .execute()
//! .unwrap();
//! assert!(result.sqrt_price_next() > sqrt_cur);
//! assert!(result.amount_in() <= U256::from(42u128 * 10u128.pow(18)));
//! ```

pub use alloy_primitives::{I256, U256};

pub mod error;
pub mod math;
pub mod price;
pub mod swap;

pub use error::{Error, MathError, StateError};
pub use price::Price;
pub use swap::{PricedSwapStep, SwapDirection, SwapStep, SwapStepResult};

const U160_MAX: U256 = U256::from_limbs([u64::MAX, u64::MAX, u32::MAX as u64, 0]);

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);

/// Base of the tick grid: `price = TICK_BASE^tick`. Used for display values only.
pub const TICK_BASE: f64 = 1.0001;
