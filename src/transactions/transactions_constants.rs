pub const OPERATION_KIND_PURCHASE: &str = "PURCHASE";
pub const OPERATION_KIND_SALE: &str = "SALE";
pub const OPERATION_KIND_ROUND_UP: &str = "ROUND_UP";
pub const OPERATION_KIND_SAVE_BACK: &str = "SAVE_BACK";
