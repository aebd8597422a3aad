use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::{OperationKind, Transaction};
use crate::utils::decimal_serde::decimal_serde;

pub const ROUNDING_SCALE: u32 = 8;

/// One purchase lot, as reconstructed from the transaction history.
///
/// `initial_*` is fixed at creation; `remaining_*` shrinks as sales are
/// matched against the lot. A fully depleted lot stays around so callers can
/// show how much of each purchase line has been sold.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    pub origin_date: NaiveDate,
    pub operation_kind: OperationKind,
    #[serde(with = "decimal_serde")]
    pub unit_price: Decimal,
    #[serde(with = "decimal_serde")]
    pub initial_quantity: Decimal,
    #[serde(with = "decimal_serde")]
    pub remaining_quantity: Decimal,
    #[serde(with = "decimal_serde")]
    pub initial_amount: Decimal,
    #[serde(with = "decimal_serde")]
    pub remaining_amount: Decimal,
}

impl Lot {
    /// Opens a lot from an acquisition-like transaction.
    pub fn open(transaction: &Transaction) -> Self {
        Lot {
            origin_date: transaction.date,
            operation_kind: transaction.operation_kind,
            unit_price: transaction.unit_price,
            initial_quantity: transaction.quantity,
            remaining_quantity: transaction.quantity,
            initial_amount: transaction.gross_amount,
            remaining_amount: transaction.gross_amount,
        }
    }

    /// Removes `quantity` from the lot and recomputes the remaining amount
    /// at the lot's purchase price. Callers must not consume more than
    /// `remaining_quantity`.
    pub fn consume(&mut self, quantity: Decimal) {
        self.remaining_quantity -= quantity;
        self.remaining_amount =
            (self.remaining_quantity * self.unit_price).round_dp(ROUNDING_SCALE);
    }

    pub fn is_depleted(&self) -> bool {
        self.remaining_quantity <= Decimal::ZERO
    }

    /// Fraction of the lot already sold, in [0, 1]. Zero for a lot with no
    /// initial quantity.
    pub fn percent_sold(&self) -> Decimal {
        if self.initial_quantity.is_zero() {
            return Decimal::ZERO;
        }
        (self.initial_quantity - self.remaining_quantity) / self.initial_quantity
    }
}

/// Realized profit and loss for one symbol, aggregated over all of its
/// sales with FIFO cost-basis matching. Recomputed on demand, never stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RealizedPnl {
    #[serde(with = "decimal_serde")]
    pub total_pnl: Decimal,
    /// Realized gain as a percentage of the matched cost basis.
    #[serde(with = "decimal_serde")]
    pub pnl_percentage: Decimal,
    /// Nominal quantity sold, not reduced when sales exceed open lots.
    #[serde(with = "decimal_serde")]
    pub total_quantity_sold: Decimal,
    #[serde(with = "decimal_serde")]
    pub avg_sale_price: Decimal,
    #[serde(with = "decimal_serde")]
    pub avg_cost_basis_price: Decimal,
}
