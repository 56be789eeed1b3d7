pub mod api;
pub mod order;
pub mod vendor_order;
