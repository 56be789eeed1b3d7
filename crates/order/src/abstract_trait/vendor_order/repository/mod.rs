mod command;
mod query;

pub use self::command::{DynVendorOrderCommandRepository, VendorOrderCommandRepositoryTrait};
pub use self::query::{DynVendorOrderQueryRepository, VendorOrderQueryRepositoryTrait};
