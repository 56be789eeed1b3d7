pub mod order;
pub mod vendor_order;
