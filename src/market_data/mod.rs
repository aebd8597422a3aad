pub mod market_data_errors;
pub mod market_data_model;
pub mod market_data_service;
pub mod market_data_traits;
pub mod price_cache;
pub mod providers;
pub mod symbol_mapping_repository;

pub use market_data_errors::MarketDataError;
pub use market_data_model::AssetClass;
pub use market_data_service::PriceService;
pub use market_data_traits::PriceLookupTrait;
pub use price_cache::PriceCache;
pub use symbol_mapping_repository::{
    InMemorySymbolMappingRepository, SymbolMappingRepositoryTrait,
};
