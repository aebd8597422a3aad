pub mod transactions_constants;
pub mod transactions_model;

pub use transactions_model::{derive_quantity, OperationKind, Transaction};
