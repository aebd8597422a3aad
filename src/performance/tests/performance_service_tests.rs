use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::market_data::{AssetClass, PriceLookupTrait};
use crate::performance::PerformanceService;
use crate::transactions::Transaction;

/// Price lookup backed by a fixed table, recording every symbol it is
/// asked for.
struct MockPriceLookup {
    prices: HashMap<String, Decimal>,
    calls: Mutex<Vec<String>>,
}

impl MockPriceLookup {
    fn new(prices: &[(&str, Decimal)]) -> Arc<Self> {
        Arc::new(MockPriceLookup {
            prices: prices
                .iter()
                .map(|(symbol, price)| (symbol.to_string(), *price))
                .collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PriceLookupTrait for MockPriceLookup {
    async fn get_current_price(&self, symbol: &str, _asset_class: AssetClass) -> Option<Decimal> {
        self.calls.lock().unwrap().push(symbol.to_string());
        self.prices.get(symbol).copied()
    }
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn purchase(date: &str, symbol: &str, amount: Decimal, price: Decimal) -> Transaction {
    Transaction::purchase(day(date), symbol, amount, price, false).unwrap()
}

fn sale(date: &str, symbol: &str, amount: Decimal, price: Decimal) -> Transaction {
    Transaction::sale(day(date), symbol, amount, price).unwrap()
}

#[tokio::test]
async fn enrich_attaches_gain_and_loss() {
    let lookup = MockPriceLookup::new(&[("GAIN", dec!(15)), ("LOSS", dec!(15))]);
    let service = PerformanceService::new(lookup);

    let transactions = vec![
        purchase("2024-01-01", "GAIN", dec!(100), dec!(10)),
        purchase("2024-01-01", "LOSS", dec!(100), dec!(20)),
    ];
    let enriched = service
        .enrich_with_performance(&transactions, AssetClass::Equity)
        .await;

    let gain = &enriched[0];
    assert_eq!(gain.current_price, Some(dec!(15)));
    assert_eq!(gain.current_value, dec!(150));
    assert_eq!(gain.pnl_amount, dec!(50));
    assert_eq!(gain.pnl_percentage, dec!(50));
    assert!(gain.price_resolved);

    let loss = &enriched[1];
    assert_eq!(loss.current_value, dec!(75));
    assert_eq!(loss.pnl_amount, dec!(-25));
    assert_eq!(loss.pnl_percentage, dec!(-25));
}

#[tokio::test]
async fn enrich_zeroes_sale_rows() {
    let lookup = MockPriceLookup::new(&[("AAPL", dec!(150))]);
    let service = PerformanceService::new(lookup);

    let transactions = vec![
        purchase("2024-01-15", "AAPL", dec!(200), dec!(100)),
        sale("2024-02-15", "AAPL", dec!(150), dec!(150)),
    ];
    let enriched = service
        .enrich_with_performance(&transactions, AssetClass::Equity)
        .await;

    let sale_row = &enriched[1];
    assert!(sale_row.transaction.is_sale());
    assert_eq!(sale_row.current_value, Decimal::ZERO);
    assert_eq!(sale_row.pnl_amount, Decimal::ZERO);
    assert_eq!(sale_row.pnl_percentage, Decimal::ZERO);
}

#[tokio::test]
async fn enrich_degrades_gracefully_without_a_price() {
    let lookup = MockPriceLookup::new(&[]);
    let service = PerformanceService::new(lookup);

    let transactions = vec![purchase("2024-01-01", "OBSCURE", dec!(120), dec!(60))];
    let enriched = service
        .enrich_with_performance(&transactions, AssetClass::Equity)
        .await;

    let row = &enriched[0];
    assert_eq!(row.current_price, None);
    assert_eq!(row.current_value, dec!(120));
    assert_eq!(row.pnl_amount, Decimal::ZERO);
    assert_eq!(row.pnl_percentage, Decimal::ZERO);
    assert!(!row.price_resolved);
}

#[tokio::test]
async fn enrich_resolves_each_symbol_once() {
    let lookup = MockPriceLookup::new(&[("AAPL", dec!(150)), ("MSFT", dec!(400))]);
    let service = PerformanceService::new(Arc::clone(&lookup) as Arc<dyn PriceLookupTrait>);

    let transactions = vec![
        purchase("2024-01-01", "AAPL", dec!(100), dec!(100)),
        purchase("2024-02-01", "AAPL", dec!(100), dec!(120)),
        purchase("2024-03-01", "MSFT", dec!(400), dec!(400)),
        sale("2024-04-01", "AAPL", dec!(50), dec!(150)),
    ];
    let enriched = service
        .enrich_with_performance(&transactions, AssetClass::Equity)
        .await;

    assert_eq!(enriched.len(), 4);
    assert_eq!(lookup.call_count(), 2);
}

#[tokio::test]
async fn summary_splits_realized_and_unrealized() {
    let lookup = MockPriceLookup::new(&[("AAPL", dec!(150))]);
    let service = PerformanceService::new(lookup);

    let transactions = vec![
        purchase("2024-01-15", "AAPL", dec!(200), dec!(100)),
        sale("2024-02-15", "AAPL", dec!(150), dec!(150)),
    ];
    let equity = service
        .enrich_with_performance(&transactions, AssetClass::Equity)
        .await;
    let summary = service.portfolio_summary(&[], &equity);

    assert_eq!(summary.equity.initial_value, dec!(200));
    assert_eq!(summary.equity.current_value, dec!(300));
    assert_eq!(summary.equity.unrealized_pnl, dec!(100));
    assert_eq!(summary.equity.realized_pnl, dec!(50));
    assert_eq!(summary.equity.total_pnl, dec!(150));
    assert_eq!(summary.equity.pnl_percentage, dec!(75));
}

#[tokio::test]
async fn summary_of_empty_class_is_all_zeros() {
    let lookup = MockPriceLookup::new(&[("AAPL", dec!(12))]);
    let service = PerformanceService::new(lookup);

    let equity = service
        .enrich_with_performance(
            &[purchase("2024-01-01", "AAPL", dec!(300), dec!(10))],
            AssetClass::Equity,
        )
        .await;
    let summary = service.portfolio_summary(&[], &equity);

    assert_eq!(summary.crypto.initial_value, Decimal::ZERO);
    assert_eq!(summary.crypto.current_value, Decimal::ZERO);
    assert_eq!(summary.crypto.total_pnl, Decimal::ZERO);
    assert_eq!(summary.crypto.pnl_percentage, Decimal::ZERO);

    // With one side empty the totals are exactly the other side's figures.
    assert_eq!(summary.total, summary.equity);
}

#[tokio::test]
async fn cross_class_percentage_is_recomputed_from_totals() {
    let lookup = MockPriceLookup::new(&[("BTC", dec!(44000)), ("ACME", dec!(12))]);
    let service = PerformanceService::new(lookup);

    // Crypto: 100 invested, +10 (10%). Equity: 300 invested, +60 (20%).
    let crypto = service
        .enrich_with_performance(
            &[purchase("2024-01-01", "BTC", dec!(100), dec!(40000))],
            AssetClass::Crypto,
        )
        .await;
    let equity = service
        .enrich_with_performance(
            &[purchase("2024-01-01", "ACME", dec!(300), dec!(10))],
            AssetClass::Equity,
        )
        .await;
    let summary = service.portfolio_summary(&crypto, &equity);

    assert_eq!(summary.crypto.pnl_percentage, dec!(10));
    assert_eq!(summary.equity.pnl_percentage, dec!(20));
    assert_eq!(summary.total.initial_value, dec!(400));
    assert_eq!(summary.total.total_pnl, dec!(70));
    // 70 / 400, not the average of 10% and 20%.
    assert_eq!(summary.total.pnl_percentage, dec!(17.5));
}
