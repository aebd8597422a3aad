use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, ValidationError};
use crate::utils::decimal_serde::decimal_serde;

/// Kind of a recorded operation.
///
/// `Sell` is the only kind that depletes lots; every other kind opens one
/// (savings-plan style `RoundUp` and `SaveBack` executions behave exactly
/// like a regular purchase as far as the ledger is concerned).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    Purchase,
    Sale,
    RoundUp,
    SaveBack,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        use crate::transactions::transactions_constants::*;
        match self {
            OperationKind::Purchase => OPERATION_KIND_PURCHASE,
            OperationKind::Sale => OPERATION_KIND_SALE,
            OperationKind::RoundUp => OPERATION_KIND_ROUND_UP,
            OperationKind::SaveBack => OPERATION_KIND_SAVE_BACK,
        }
    }

    /// Whether this kind reduces a position. Everything else is
    /// acquisition-like and creates a lot.
    pub fn is_sale(&self) -> bool {
        matches!(self, OperationKind::Sale)
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        use crate::transactions::transactions_constants::*;
        match s {
            s if s == OPERATION_KIND_PURCHASE => Ok(OperationKind::Purchase),
            s if s == OPERATION_KIND_SALE => Ok(OperationKind::Sale),
            s if s == OPERATION_KIND_ROUND_UP => Ok(OperationKind::RoundUp),
            s if s == OPERATION_KIND_SAVE_BACK => Ok(OperationKind::SaveBack),
            _ => Err(format!("Unknown operation kind: {}", s)),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded purchase or sale of a symbol.
///
/// Quantities are always stored positive; the direction comes from
/// `operation_kind`. `gross_amount` is trusted as recorded (quantity times
/// unit price at transaction time) and never re-derived.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: NaiveDate,
    pub symbol: String,
    pub operation_kind: OperationKind,
    #[serde(with = "decimal_serde")]
    pub quantity: Decimal,
    #[serde(with = "decimal_serde")]
    pub unit_price: Decimal,
    #[serde(with = "decimal_serde")]
    pub gross_amount: Decimal,
    #[serde(default)]
    pub out_of_budget: bool,
}

impl Transaction {
    /// Builds a validated transaction. The symbol is trimmed and uppercased;
    /// quantity, unit price and gross amount must all be strictly positive.
    pub fn new(
        date: NaiveDate,
        symbol: &str,
        operation_kind: OperationKind,
        quantity: Decimal,
        unit_price: Decimal,
        gross_amount: Decimal,
        out_of_budget: bool,
    ) -> Result<Self> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        if quantity <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "quantity must be greater than zero, got {}",
                quantity
            ))
            .into());
        }
        if unit_price <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "unit price must be greater than zero, got {}",
                unit_price
            ))
            .into());
        }
        if gross_amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "gross amount must be greater than zero, got {}",
                gross_amount
            ))
            .into());
        }

        Ok(Transaction {
            date,
            symbol,
            operation_kind,
            quantity,
            unit_price,
            gross_amount,
            out_of_budget,
        })
    }

    /// Records a purchase from the amount actually spent, deriving the
    /// quantity from the unit price.
    pub fn purchase(
        date: NaiveDate,
        symbol: &str,
        amount: Decimal,
        unit_price: Decimal,
        out_of_budget: bool,
    ) -> Result<Self> {
        let quantity = derive_quantity(amount, unit_price)?;
        Self::new(
            date,
            symbol,
            OperationKind::Purchase,
            quantity,
            unit_price,
            amount,
            out_of_budget,
        )
    }

    /// Records a sale from its proceeds. Sales never consume budget, so the
    /// out-of-budget flag is always set.
    pub fn sale(date: NaiveDate, symbol: &str, amount: Decimal, unit_price: Decimal) -> Result<Self> {
        let quantity = derive_quantity(amount, unit_price)?;
        Self::new(
            date,
            symbol,
            OperationKind::Sale,
            quantity,
            unit_price,
            amount,
            true,
        )
    }

    pub fn is_sale(&self) -> bool {
        self.operation_kind.is_sale()
    }

    /// Case-insensitive symbol comparison.
    pub fn matches_symbol(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol.trim())
    }
}

/// Derives the quantity bought or sold from an amount and a unit price.
/// Fails on a non-positive price, which would make the division meaningless.
pub fn derive_quantity(amount: Decimal, unit_price: Decimal) -> Result<Decimal> {
    if unit_price <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "unit price must be greater than zero, got {}",
            unit_price
        ))
        .into());
    }
    Ok(amount / unit_price)
}
