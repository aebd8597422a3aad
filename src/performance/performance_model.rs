use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::Transaction;
use crate::utils::decimal_serde::{decimal_serde, decimal_serde_option};

/// A transaction with its live valuation attached.
///
/// Sale rows always carry zero current value and P&L here: once sold, a
/// position no longer exists, and the meaningful realized figure is the
/// symbol-level FIFO one from the ledger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPerformance {
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(with = "decimal_serde_option")]
    pub current_price: Option<Decimal>,
    #[serde(with = "decimal_serde")]
    pub current_value: Decimal,
    #[serde(with = "decimal_serde")]
    pub pnl_amount: Decimal,
    #[serde(with = "decimal_serde")]
    pub pnl_percentage: Decimal,
    /// False when no feed could price the symbol; the row then falls back
    /// to its recorded gross amount.
    pub price_resolved: bool,
}

/// Performance roll-up for one asset class.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssetClassPerformance {
    /// Sum of purchase gross amounts. Sales never count as invested money.
    #[serde(with = "decimal_serde")]
    pub initial_value: Decimal,
    /// Sum of live valuations of the purchase rows.
    #[serde(with = "decimal_serde")]
    pub current_value: Decimal,
    #[serde(with = "decimal_serde")]
    pub realized_pnl: Decimal,
    #[serde(with = "decimal_serde")]
    pub unrealized_pnl: Decimal,
    #[serde(with = "decimal_serde")]
    pub total_pnl: Decimal,
    /// Total P&L relative to the initial value, zero when nothing was
    /// invested.
    #[serde(with = "decimal_serde")]
    pub pnl_percentage: Decimal,
}

/// Portfolio-wide summary: both asset classes plus their combination.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub crypto: AssetClassPerformance,
    pub equity: AssetClassPerformance,
    pub total: AssetClassPerformance,
}
