use async_trait::async_trait;
use rust_decimal::Decimal;

use super::market_data_model::AssetClass;

/// Current-price lookup consumed by the performance aggregator.
///
/// A missing price is a normal outcome, not an error: implementations must
/// absorb feed failures and return `None`. Lookups may be slow and may be
/// repeated safely.
#[async_trait]
pub trait PriceLookupTrait: Send + Sync {
    async fn get_current_price(&self, symbol: &str, asset_class: AssetClass) -> Option<Decimal>;
}
