use lazy_static::lazy_static;
use num_traits::FromPrimitive;
use reqwest::Client;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::market_data::market_data_errors::MarketDataError;

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

lazy_static! {
    /// Ticker-style symbols mapped to CoinGecko coin ids. Symbols outside
    /// the table are passed through lowercased, which works for coins whose
    /// id equals their ticker.
    static ref COINGECKO_IDS: HashMap<&'static str, &'static str> = {
        let mut ids = HashMap::new();
        ids.insert("btc", "bitcoin");
        ids.insert("eth", "ethereum");
        ids.insert("ada", "cardano");
        ids.insert("sol", "solana");
        ids.insert("dot", "polkadot");
        ids.insert("matic", "polygon");
        ids.insert("avax", "avalanche-2");
        ids.insert("atom", "cosmos");
        ids.insert("link", "chainlink");
        ids
    };
}

/// Resolves a user-entered crypto symbol to the CoinGecko coin id.
pub fn coingecko_id(symbol: &str) -> String {
    let symbol_lower = symbol.trim().to_lowercase();
    COINGECKO_IDS
        .get(symbol_lower.as_str())
        .map(|id| id.to_string())
        .unwrap_or(symbol_lower)
}

/// Spot prices for cryptocurrencies via the CoinGecko simple-price API,
/// quoted in EUR.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        CoinGeckoProvider {
            client: Client::new(),
            base_url: COINGECKO_BASE_URL.to_string(),
        }
    }

    pub async fn get_latest_price(&self, symbol: &str) -> Result<Decimal, MarketDataError> {
        let id = coingecko_id(symbol);
        let url = format!("{}/simple/price", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", id.as_str()), ("vs_currencies", "eur")])
            .send()
            .await?
            .error_for_status()?;

        let data: HashMap<String, HashMap<String, f64>> = response.json().await?;

        let price = data
            .get(&id)
            .and_then(|quotes| quotes.get("eur"))
            .copied()
            .ok_or_else(|| MarketDataError::NotFound(symbol.to_string()))?;

        Decimal::from_f64(price).ok_or_else(|| {
            MarketDataError::InvalidData(format!("Non-finite price for {}: {}", symbol, price))
        })
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbols_map_to_coin_ids() {
        assert_eq!(coingecko_id("BTC"), "bitcoin");
        assert_eq!(coingecko_id("eth"), "ethereum");
        assert_eq!(coingecko_id(" AVAX "), "avalanche-2");
    }

    #[test]
    fn unknown_symbols_pass_through_lowercased() {
        assert_eq!(coingecko_id("DOGE"), "doge");
    }
}
