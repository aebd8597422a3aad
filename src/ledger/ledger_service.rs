use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::{Result, ValidationError};
use crate::ledger::ledger_model::{Lot, RealizedPnl};
use crate::transactions::Transaction;

/// Quantity consumed from one lot by one sale during the FIFO walk.
struct FifoMatch {
    quantity: Decimal,
    cost_price: Decimal,
    sale_price: Decimal,
}

/// Reconstructs FIFO lot state and realized P&L for a single symbol from its
/// full transaction history.
///
/// The ledger is a pure fold over a sorted copy of the input: it holds no
/// state of its own, never mutates the caller's data, and running it twice
/// on the same history yields identical results.
#[derive(Default, Debug, Clone)]
pub struct LotLedger {}

impl LotLedger {
    pub fn new() -> Self {
        LotLedger {}
    }

    /// Quantity currently held for `symbol`: acquisitions minus sales,
    /// floored at zero so an oversold history never reports a negative
    /// position.
    pub fn available_quantity(&self, transactions: &[Transaction], symbol: &str) -> Decimal {
        let mut total = Decimal::ZERO;
        for tx in transactions.iter().filter(|tx| tx.matches_symbol(symbol)) {
            if tx.is_sale() {
                total -= tx.quantity;
            } else {
                total += tx.quantity;
            }
        }
        total.max(Decimal::ZERO)
    }

    /// Rebuilds the purchase lots for `symbol` with sales applied in FIFO
    /// order. Fully depleted lots are kept in the result, in the same
    /// chronological order used for matching.
    pub fn remaining_lots(&self, transactions: &[Transaction], symbol: &str) -> Vec<Lot> {
        let history = self.chronological(transactions, symbol);
        let (mut lots, sales) = Self::open_lots(&history);
        Self::apply_sales_fifo(&mut lots, &sales);
        lots.retain(|lot| lot.initial_quantity > Decimal::ZERO);
        lots
    }

    /// Realized P&L for `symbol`, matching every sale against the purchase
    /// lots FIFO and comparing sale value to the matched cost basis.
    /// Returns a zero-valued record when the symbol has no sales.
    pub fn realized_pnl(&self, transactions: &[Transaction], symbol: &str) -> RealizedPnl {
        let history = self.chronological(transactions, symbol);
        let (mut lots, sales) = Self::open_lots(&history);
        if sales.is_empty() {
            return RealizedPnl::default();
        }
        debug!(
            "Computing realized P&L for {}: {} lots, {} sales",
            symbol,
            lots.len(),
            sales.len()
        );

        let matches = Self::apply_sales_fifo(&mut lots, &sales);

        let mut cost_basis_total = Decimal::ZERO;
        let mut sale_value_total = Decimal::ZERO;
        for m in &matches {
            cost_basis_total += m.quantity * m.cost_price;
            sale_value_total += m.quantity * m.sale_price;
        }
        let total_pnl = sale_value_total - cost_basis_total;

        let total_quantity_sold: Decimal = sales.iter().map(|sale| sale.quantity).sum();
        let sale_gross_total: Decimal = sales.iter().map(|sale| sale.gross_amount).sum();

        let avg_sale_price = if total_quantity_sold.is_zero() {
            Decimal::ZERO
        } else {
            sale_gross_total / total_quantity_sold
        };
        let avg_cost_basis_price = if total_quantity_sold.is_zero() {
            Decimal::ZERO
        } else {
            cost_basis_total / total_quantity_sold
        };
        let pnl_percentage = if cost_basis_total.is_zero() {
            Decimal::ZERO
        } else {
            total_pnl / cost_basis_total * dec!(100)
        };

        RealizedPnl {
            total_pnl,
            pnl_percentage,
            total_quantity_sold,
            avg_sale_price,
            avg_cost_basis_price,
        }
    }

    /// Whether the history holds at least `quantity` of `symbol`.
    pub fn has_sufficient_position(
        &self,
        transactions: &[Transaction],
        symbol: &str,
        quantity: Decimal,
    ) -> bool {
        quantity <= self.available_quantity(transactions, symbol)
    }

    /// Entry-time oversell check for callers recording a new sale. The
    /// ledger itself tolerates oversold histories; this is the hard
    /// validation to run before one is created.
    pub fn ensure_sufficient_position(
        &self,
        transactions: &[Transaction],
        symbol: &str,
        quantity: Decimal,
    ) -> Result<()> {
        let available = self.available_quantity(transactions, symbol);
        if quantity > available {
            return Err(ValidationError::InsufficientQuantity {
                symbol: symbol.trim().to_uppercase(),
                available,
                requested: quantity,
            }
            .into());
        }
        Ok(())
    }

    /// Transactions for `symbol`, sorted ascending by date. The sort is
    /// stable: same-day entries keep their insertion order.
    fn chronological<'a>(
        &self,
        transactions: &'a [Transaction],
        symbol: &str,
    ) -> Vec<&'a Transaction> {
        let mut history: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| tx.matches_symbol(symbol))
            .collect();
        history.sort_by_key(|tx| tx.date);
        history
    }

    /// Splits a chronological history into open lots and the sales to match
    /// against them, preserving order on both sides.
    fn open_lots<'a>(history: &[&'a Transaction]) -> (Vec<Lot>, Vec<&'a Transaction>) {
        let mut lots = Vec::new();
        let mut sales = Vec::new();
        for tx in history {
            if tx.is_sale() {
                sales.push(*tx);
            } else {
                lots.push(Lot::open(tx));
            }
        }
        (lots, sales)
    }

    /// Applies each sale against the lots from the oldest onward, consuming
    /// `min(lot remaining, sale outstanding)` at every step. Sale volume
    /// left over once every lot is empty is dropped.
    fn apply_sales_fifo(lots: &mut [Lot], sales: &[&Transaction]) -> Vec<FifoMatch> {
        let mut matches = Vec::new();
        for sale in sales {
            let mut outstanding = sale.quantity;
            for lot in lots.iter_mut() {
                if outstanding <= Decimal::ZERO {
                    break;
                }
                if lot.remaining_quantity <= Decimal::ZERO {
                    continue;
                }
                let matched = std::cmp::min(lot.remaining_quantity, outstanding);
                lot.consume(matched);
                outstanding -= matched;
                matches.push(FifoMatch {
                    quantity: matched,
                    cost_price: lot.unit_price,
                    sale_price: sale.unit_price,
                });
            }
            if outstanding > Decimal::ZERO {
                warn!(
                    "Sale of {} {} on {} exceeds open lots; {} left unmatched",
                    sale.quantity, sale.symbol, sale.date, outstanding
                );
            }
        }
        matches
    }
}
