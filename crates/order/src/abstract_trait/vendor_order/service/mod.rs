mod command;
mod query;

pub use self::command::{DynVendorOrderCommandService, VendorOrderCommandServiceTrait};
pub use self::query::{DynVendorOrderQueryService, VendorOrderQueryServiceTrait};
