use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::market_data_errors::MarketDataError;
use super::market_data_model::AssetClass;
use super::market_data_traits::PriceLookupTrait;
use super::price_cache::PriceCache;
use super::providers::{CoinGeckoProvider, YahooProvider};
use super::symbol_mapping_repository::SymbolMappingRepositoryTrait;

/// Exchange suffixes tried when a raw equity symbol returns nothing.
/// European listings are commonly entered without their venue suffix.
const EQUITY_SYMBOL_SUFFIXES: [&str; 6] = [".PA", ".L", ".F", ".MI", ".MC", ".AS"];

/// Facade over the price feeds: routes by asset class, caches resolved
/// prices, and remembers which feed symbol a user symbol resolved to.
///
/// Feed failures and unknown symbols are absorbed into `None` — a missing
/// price is a degraded result for the caller, never an error.
pub struct PriceService {
    yahoo_provider: YahooProvider,
    coingecko_provider: CoinGeckoProvider,
    price_cache: PriceCache,
    symbol_mappings: Arc<dyn SymbolMappingRepositoryTrait>,
}

impl PriceService {
    pub fn new(
        symbol_mappings: Arc<dyn SymbolMappingRepositoryTrait>,
    ) -> Result<Self, MarketDataError> {
        Ok(PriceService {
            yahoo_provider: YahooProvider::new()?,
            coingecko_provider: CoinGeckoProvider::new(),
            price_cache: PriceCache::new(),
            symbol_mappings,
        })
    }

    pub fn with_cache(
        symbol_mappings: Arc<dyn SymbolMappingRepositoryTrait>,
        price_cache: PriceCache,
    ) -> Result<Self, MarketDataError> {
        Ok(PriceService {
            yahoo_provider: YahooProvider::new()?,
            coingecko_provider: CoinGeckoProvider::new(),
            price_cache,
            symbol_mappings,
        })
    }

    /// Drops every cached price, forcing fresh lookups.
    pub fn clear_cache(&self) {
        self.price_cache.clear();
    }

    async fn crypto_price(&self, symbol: &str) -> Result<Decimal, MarketDataError> {
        self.coingecko_provider.get_latest_price(symbol).await
    }

    /// Resolves an equity price: learned mapping first, then the raw
    /// symbol, then the exchange-suffix variants. A hit through a variant
    /// is remembered for next time.
    async fn equity_price(&self, symbol: &str) -> Result<Decimal, MarketDataError> {
        let symbol = symbol.trim().to_uppercase();

        if let Some(mapped) = self.symbol_mappings.get_mapping(&symbol) {
            match self.yahoo_provider.get_latest_price(&mapped).await {
                Ok(price) => return Ok(price),
                Err(e) => {
                    warn!(
                        "Learned mapping {} -> {} no longer resolves: {}",
                        symbol, mapped, e
                    );
                }
            }
        }

        let mut variants = vec![symbol.clone()];
        variants.extend(
            EQUITY_SYMBOL_SUFFIXES
                .iter()
                .map(|suffix| format!("{}{}", symbol, suffix)),
        );

        for variant in &variants {
            match self.yahoo_provider.get_latest_price(variant).await {
                Ok(price) => {
                    debug!("Resolved {} via {}", symbol, variant);
                    if *variant != symbol {
                        self.symbol_mappings.save_mapping(&symbol, variant);
                    }
                    return Ok(price);
                }
                Err(_) => continue,
            }
        }

        Err(MarketDataError::NotFound(symbol))
    }
}

#[async_trait]
impl PriceLookupTrait for PriceService {
    async fn get_current_price(&self, symbol: &str, asset_class: AssetClass) -> Option<Decimal> {
        if let Some(price) = self.price_cache.get(symbol, asset_class).await {
            return Some(price);
        }

        let resolved = match asset_class {
            AssetClass::Crypto => self.crypto_price(symbol).await,
            AssetClass::Equity => self.equity_price(symbol).await,
        };

        match resolved {
            Ok(price) => {
                self.price_cache.set(symbol, asset_class, price).await;
                Some(price)
            }
            Err(e) => {
                warn!("No {} price for {}: {}", asset_class, symbol, e);
                None
            }
        }
    }
}
