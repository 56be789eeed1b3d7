mod command;
mod query;

pub use self::command::{VendorOrderCommandService, VendorOrderCommandServiceDeps};
pub use self::query::VendorOrderQueryService;
