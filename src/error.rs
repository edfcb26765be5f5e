use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("State error - invalid or zero price")]
    InvalidPrice,
    #[error("State error - liquidity is 0")]
    InvalidLiquidity,
    #[error("State error - sqrt price bounds are equal")]
    InvalidRange,
    #[error("State error - tick spacing must be positive")]
    InvalidTickSpacing,

    #[error("State error - tick out of bounds")]
    TickOutOfBounds,
    #[error("State error - sqrtPrice out of bounds")]
    SqrtPriceOutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error(transparent)]
    StateError(#[from] crate::error::StateError),
}
