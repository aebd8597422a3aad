use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use yahoo_finance_api as yahoo;

use crate::market_data::market_data_errors::MarketDataError;

/// Latest equity close prices via Yahoo Finance.
pub struct YahooProvider {
    provider: yahoo::YahooConnector,
}

impl YahooProvider {
    pub fn new() -> Result<Self, MarketDataError> {
        let provider = yahoo::YahooConnector::new()?;
        Ok(YahooProvider { provider })
    }

    pub async fn get_latest_price(&self, symbol: &str) -> Result<Decimal, MarketDataError> {
        let response = self.provider.get_latest_quotes(symbol, "1d").await?;
        let quote = response.last_quote()?;

        Decimal::from_f64(quote.close).ok_or_else(|| {
            MarketDataError::InvalidData(format!(
                "Non-finite close for {}: {}",
                symbol, quote.close
            ))
        })
    }
}
