/// Decimal precision for valuation calculations
pub const DECIMAL_PRECISION: u32 = 8;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// How long a fetched price stays valid in the cache, in seconds
pub const PRICE_CACHE_TTL_SECS: u64 = 300;

/// Maximum number of distinct symbols kept in the price cache
pub const PRICE_CACHE_CAPACITY: u64 = 1000;
