pub mod constants;
pub mod errors;
pub mod ledger;
pub mod market_data;
pub mod performance;
pub mod transactions;
pub mod utils;

pub use ledger::*;
pub use performance::*;
pub use transactions::*;
