//! In-memory price cache with TTL using moka

use moka::future::Cache;
use rust_decimal::Decimal;
use std::time::Duration;

use crate::constants::{PRICE_CACHE_CAPACITY, PRICE_CACHE_TTL_SECS};

use super::market_data_model::AssetClass;

/// Explicit, injectable cache for resolved prices. Entries expire after the
/// TTL; a lookup within the window never re-hits the feed.
pub struct PriceCache {
    cache: Cache<String, Decimal>,
}

impl PriceCache {
    /// Creates a cache with the default 5-minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(PRICE_CACHE_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        PriceCache {
            cache: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(PRICE_CACHE_CAPACITY)
                .build(),
        }
    }

    pub async fn get(&self, symbol: &str, asset_class: AssetClass) -> Option<Decimal> {
        self.cache.get(&Self::key(symbol, asset_class)).await
    }

    pub async fn set(&self, symbol: &str, asset_class: AssetClass, price: Decimal) {
        self.cache.insert(Self::key(symbol, asset_class), price).await;
    }

    /// Drops every cached price.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    fn key(symbol: &str, asset_class: AssetClass) -> String {
        format!("{}:{}", asset_class.as_str(), symbol.trim().to_uppercase())
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn caches_per_symbol_and_asset_class() {
        let cache = PriceCache::new();
        cache.set("btc", AssetClass::Crypto, dec!(45000)).await;

        assert_eq!(cache.get("BTC", AssetClass::Crypto).await, Some(dec!(45000)));
        assert_eq!(cache.get("BTC", AssetClass::Equity).await, None);
        assert_eq!(cache.get("ETH", AssetClass::Crypto).await, None);
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = PriceCache::with_ttl(Duration::from_millis(50));
        cache.set("AAPL", AssetClass::Equity, dec!(150)).await;
        assert_eq!(cache.get("AAPL", AssetClass::Equity).await, Some(dec!(150)));

        std::thread::sleep(Duration::from_millis(80));
        assert_eq!(cache.get("AAPL", AssetClass::Equity).await, None);
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache = PriceCache::new();
        cache.set("AAPL", AssetClass::Equity, dec!(150)).await;
        cache.clear();
        // Invalidation is applied lazily; reads see it immediately.
        assert_eq!(cache.get("AAPL", AssetClass::Equity).await, None);
    }
}
