pub mod listing;
pub mod order;
pub mod vendor_order;
