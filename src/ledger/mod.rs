pub mod ledger_model;
pub mod ledger_service;

pub use ledger_model::{Lot, RealizedPnl, ROUNDING_SCALE};
pub use ledger_service::LotLedger;
