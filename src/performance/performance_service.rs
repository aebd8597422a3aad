use futures::future::join_all;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

use crate::ledger::LotLedger;
use crate::market_data::{AssetClass, PriceLookupTrait};
use crate::performance::performance_model::{
    AssetClassPerformance, PortfolioSummary, TransactionPerformance,
};
use crate::transactions::Transaction;

/// Attaches live valuations to transaction batches and rolls per-symbol
/// figures up into asset-class and portfolio totals.
///
/// Prices come from the injected lookup; everything else is pure
/// arithmetic over the caller's transaction lists.
pub struct PerformanceService {
    price_lookup: Arc<dyn PriceLookupTrait>,
}

impl PerformanceService {
    pub fn new(price_lookup: Arc<dyn PriceLookupTrait>) -> Self {
        PerformanceService { price_lookup }
    }

    /// Enriches every transaction in the batch with its current valuation.
    ///
    /// The lookup is called once per distinct symbol, never once per
    /// transaction. Symbols the feeds cannot price fall back to their
    /// recorded gross amount with `price_resolved` unset.
    pub async fn enrich_with_performance(
        &self,
        transactions: &[Transaction],
        asset_class: AssetClass,
    ) -> Vec<TransactionPerformance> {
        let mut symbols: Vec<String> = Vec::new();
        for tx in transactions {
            if !symbols.contains(&tx.symbol) {
                symbols.push(tx.symbol.clone());
            }
        }
        debug!(
            "Enriching {} {} transactions across {} symbols",
            transactions.len(),
            asset_class,
            symbols.len()
        );

        let fetches = symbols.iter().map(|symbol| async {
            let price = self
                .price_lookup
                .get_current_price(symbol, asset_class)
                .await;
            (symbol.clone(), price)
        });
        let prices: HashMap<String, Option<Decimal>> =
            join_all(fetches).await.into_iter().collect();

        transactions
            .iter()
            .map(|tx| {
                let price = prices.get(&tx.symbol).copied().flatten();
                Self::valued(tx, price)
            })
            .collect()
    }

    /// Combines both enriched asset classes into a portfolio summary. Every
    /// field of an empty class is zero, so the cross-class totals are
    /// always well-defined.
    pub fn portfolio_summary(
        &self,
        crypto: &[TransactionPerformance],
        equity: &[TransactionPerformance],
    ) -> PortfolioSummary {
        let crypto_summary = Self::summarize_asset_class(crypto);
        let equity_summary = Self::summarize_asset_class(equity);

        let initial_value = crypto_summary.initial_value + equity_summary.initial_value;
        let current_value = crypto_summary.current_value + equity_summary.current_value;
        let realized_pnl = crypto_summary.realized_pnl + equity_summary.realized_pnl;
        let unrealized_pnl = crypto_summary.unrealized_pnl + equity_summary.unrealized_pnl;
        let total_pnl = realized_pnl + unrealized_pnl;

        let total = AssetClassPerformance {
            initial_value,
            current_value,
            realized_pnl,
            unrealized_pnl,
            total_pnl,
            // Recomputed from the summed totals; averaging the per-class
            // percentages would weight them wrong.
            pnl_percentage: Self::percentage_of(total_pnl, initial_value),
        };

        PortfolioSummary {
            crypto: crypto_summary,
            equity: equity_summary,
            total,
        }
    }

    fn valued(tx: &Transaction, current_price: Option<Decimal>) -> TransactionPerformance {
        if tx.is_sale() {
            // The position behind a sale no longer exists; realized P&L is
            // only meaningful at symbol level, via the FIFO ledger.
            return TransactionPerformance {
                transaction: tx.clone(),
                current_price,
                current_value: Decimal::ZERO,
                pnl_amount: Decimal::ZERO,
                pnl_percentage: Decimal::ZERO,
                price_resolved: current_price.is_some(),
            };
        }

        match current_price {
            Some(price) => {
                let current_value = tx.quantity * price;
                TransactionPerformance {
                    transaction: tx.clone(),
                    current_price: Some(price),
                    current_value,
                    pnl_amount: current_value - tx.gross_amount,
                    pnl_percentage: Self::percentage_of(price - tx.unit_price, tx.unit_price),
                    price_resolved: true,
                }
            }
            None => TransactionPerformance {
                transaction: tx.clone(),
                current_price: None,
                current_value: tx.gross_amount,
                pnl_amount: Decimal::ZERO,
                pnl_percentage: Decimal::ZERO,
                price_resolved: false,
            },
        }
    }

    fn summarize_asset_class(enriched: &[TransactionPerformance]) -> AssetClassPerformance {
        let mut initial_value = Decimal::ZERO;
        let mut current_value = Decimal::ZERO;
        for row in enriched {
            if !row.transaction.is_sale() {
                initial_value += row.transaction.gross_amount;
                current_value += row.current_value;
            }
        }
        let unrealized_pnl = current_value - initial_value;

        let transactions: Vec<Transaction> =
            enriched.iter().map(|row| row.transaction.clone()).collect();
        let mut symbols: Vec<&str> = Vec::new();
        for tx in &transactions {
            if !symbols.contains(&tx.symbol.as_str()) {
                symbols.push(&tx.symbol);
            }
        }
        let ledger = LotLedger::new();
        let realized_pnl: Decimal = symbols
            .iter()
            .map(|symbol| ledger.realized_pnl(&transactions, symbol).total_pnl)
            .sum();

        let total_pnl = realized_pnl + unrealized_pnl;

        AssetClassPerformance {
            initial_value,
            current_value,
            realized_pnl,
            unrealized_pnl,
            total_pnl,
            pnl_percentage: Self::percentage_of(total_pnl, initial_value),
        }
    }

    fn percentage_of(amount: Decimal, base: Decimal) -> Decimal {
        if base.is_zero() {
            Decimal::ZERO
        } else {
            amount / base * dec!(100)
        }
    }
}
