//! Single‑step swap engine.
//!
//! A step moves through three states, each a distinct value:
//!
//! ```text
//! SwapStep (idle) --compute_next_price--> PricedSwapStep --compute_amounts--> SwapStepResult
//! ```
//!
//! Liquidity stays constant for the step and the price is not clamped to
//! any position range: the curve is extrapolated as far as the input
//! pushes it. Errors from the underlying math are returned unchanged.

use crate::error::{Error, MathError};
use crate::math::liquidity_math::{amount_0_delta, amount_1_delta};
use crate::math::sqrt_price_math::{next_sqrt_price_from_amount_0, next_sqrt_price_from_amount_1};
use alloy_primitives::{I256, U256};
use tracing::{debug, trace};

/// Which token the trader pays into the pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Token0 in, token1 out. Moves the price down.
    SellBase,
    /// Token1 in, token0 out. Moves the price up.
    SellQuote,
}

impl SwapDirection {
    /// `true` for token0 → token1, matching the Uniswap `zeroForOne` flag.
    #[inline]
    pub fn zero_for_one(self) -> bool {
        matches!(self, SwapDirection::SellBase)
    }
}

/// Computes the sqrt price reached after paying `amount_in` into the pool
/// in the given direction.
pub fn compute_next_price(
    liquidity: u128,
    sqrt_price_current_x96: U256,
    amount_in: U256,
    direction: SwapDirection,
) -> Result<U256, Error> {
    match direction {
        SwapDirection::SellBase => {
            next_sqrt_price_from_amount_0(liquidity, sqrt_price_current_x96, amount_in)
        }
        SwapDirection::SellQuote => {
            next_sqrt_price_from_amount_1(liquidity, sqrt_price_current_x96, amount_in)
        }
    }
}

/// Computes `(amount_in, amount_out)` for a price move from
/// `sqrt_price_current_x96` to `sqrt_price_next_x96`.
///
/// The input token is the one the direction sells: token0 for `SellBase`,
/// token1 for `SellQuote`. Both amounts are floored.
pub fn compute_swap_amounts(
    liquidity: u128,
    sqrt_price_current_x96: U256,
    sqrt_price_next_x96: U256,
    direction: SwapDirection,
) -> Result<(U256, U256), Error> {
    let amount0 = amount_0_delta(liquidity, sqrt_price_current_x96, sqrt_price_next_x96)?;
    let amount1 = amount_1_delta(liquidity, sqrt_price_current_x96, sqrt_price_next_x96)?;

    Ok(if direction.zero_for_one() {
        (amount0, amount1)
    } else {
        (amount1, amount0)
    })
}

/// A swap step that has not been evaluated yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwapStep {
    liquidity: u128,
    sqrt_price_current_x96: U256,
    amount_in: U256,
    direction: SwapDirection,
}

impl SwapStep {
    #[inline]
    pub fn new(
        liquidity: u128,
        sqrt_price_current_x96: U256,
        amount_in: U256,
        direction: SwapDirection,
    ) -> Self {
        Self {
            liquidity,
            sqrt_price_current_x96,
            amount_in,
            direction,
        }
    }

    #[inline]
    pub fn direction(&self) -> SwapDirection {
        self.direction
    }

    #[inline]
    pub fn amount_in(&self) -> U256 {
        self.amount_in
    }

    /// Moves the step to the price‑computed state.
    pub fn compute_next_price(self) -> Result<PricedSwapStep, Error> {
        let sqrt_price_next_x96 = compute_next_price(
            self.liquidity,
            self.sqrt_price_current_x96,
            self.amount_in,
            self.direction,
        )?;
        trace!(
            direction = ?self.direction,
            liquidity = self.liquidity,
            amount_in = %self.amount_in,
            sqrt_price_current = %self.sqrt_price_current_x96,
            sqrt_price_next = %sqrt_price_next_x96,
            "computed next sqrt price"
        );

        Ok(PricedSwapStep {
            liquidity: self.liquidity,
            sqrt_price_current_x96: self.sqrt_price_current_x96,
            sqrt_price_next_x96,
            direction: self.direction,
        })
    }

    /// Runs both transitions.
    pub fn execute(self) -> Result<SwapStepResult, Error> {
        self.compute_next_price()?.compute_amounts()
    }
}

/// A swap step whose target price is known but whose amounts are not.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PricedSwapStep {
    liquidity: u128,
    sqrt_price_current_x96: U256,
    sqrt_price_next_x96: U256,
    direction: SwapDirection,
}

impl PricedSwapStep {
    #[inline]
    pub fn sqrt_price_next(&self) -> U256 {
        self.sqrt_price_next_x96
    }

    /// Moves the step to its terminal state.
    pub fn compute_amounts(self) -> Result<SwapStepResult, Error> {
        let (amount_in, amount_out) = compute_swap_amounts(
            self.liquidity,
            self.sqrt_price_current_x96,
            self.sqrt_price_next_x96,
            self.direction,
        )?;
        debug!(
            direction = ?self.direction,
            amount_in = %amount_in,
            amount_out = %amount_out,
            "swap step complete"
        );

        Ok(SwapStepResult {
            direction: self.direction,
            sqrt_price_start_x96: self.sqrt_price_current_x96,
            sqrt_price_next_x96: self.sqrt_price_next_x96,
            amount_in,
            amount_out,
        })
    }
}

/// Outcome of a fully evaluated swap step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapStepResult {
    direction: SwapDirection,
    sqrt_price_start_x96: U256,
    sqrt_price_next_x96: U256,
    amount_in: U256,
    amount_out: U256,
}

impl SwapStepResult {
    #[inline]
    pub fn direction(&self) -> SwapDirection {
        self.direction
    }

    #[inline]
    pub fn sqrt_price_start(&self) -> U256 {
        self.sqrt_price_start_x96
    }

    #[inline]
    pub fn sqrt_price_next(&self) -> U256 {
        self.sqrt_price_next_x96
    }

    /// Amount of the sold token the price move actually absorbs.
    #[inline]
    pub fn amount_in(&self) -> U256 {
        self.amount_in
    }

    /// Amount of the bought token released by the pool.
    #[inline]
    pub fn amount_out(&self) -> U256 {
        self.amount_out
    }

    /// Signed token deltas `(amount0, amount1)` from the pool's point of
    /// view: positive is paid in, negative is paid out.
    pub fn deltas(&self) -> Result<(I256, I256), MathError> {
        let paid_in = to_signed(self.amount_in)?;
        let paid_out = -to_signed(self.amount_out)?;

        Ok(if self.direction.zero_for_one() {
            (paid_in, paid_out)
        } else {
            (paid_out, paid_in)
        })
    }
}

#[inline]
fn to_signed(value: U256) -> Result<I256, MathError> {
    if value.bit_len() >= 256 {
        return Err(MathError::Overflow);
    }
    Ok(I256::from_raw(value))
}
