pub mod coingecko_provider;
pub mod yahoo_provider;

pub use coingecko_provider::CoinGeckoProvider;
pub use yahoo_provider::YahooProvider;
