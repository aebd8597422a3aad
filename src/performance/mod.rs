pub mod performance_model;
pub mod performance_service;

pub use performance_model::{AssetClassPerformance, PortfolioSummary, TransactionPerformance};
pub use performance_service::PerformanceService;

#[cfg(test)]
pub(crate) mod tests;
