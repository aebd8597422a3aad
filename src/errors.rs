use rust_decimal::Decimal;
use thiserror::Error;

use crate::market_data::MarketDataError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the library
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error(
        "Insufficient quantity for {symbol}: available {available}, requested {requested}"
    )]
    InsufficientQuantity {
        symbol: String,
        available: Decimal,
        requested: Decimal,
    },
}
