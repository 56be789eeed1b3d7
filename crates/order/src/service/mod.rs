pub mod aggregator;
pub mod order;
pub mod vendor_order;
