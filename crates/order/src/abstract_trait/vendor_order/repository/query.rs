use crate::model::vendor_order::VendorOrder;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynVendorOrderQueryRepository = Arc<dyn VendorOrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait VendorOrderQueryRepositoryTrait {
    async fn find_by_id(&self, vendor_order_id: i32)
    -> Result<Option<VendorOrder>, RepositoryError>;
    /// Sub-orders of one parent order, oldest first.
    async fn find_by_order(&self, order_id: i32) -> Result<Vec<VendorOrder>, RepositoryError>;
    /// Newest first.
    async fn find_by_vendor(&self, vendor_id: i32) -> Result<Vec<VendorOrder>, RepositoryError>;
    async fn count_pending_by_vendor(&self, vendor_id: i32) -> Result<i64, RepositoryError>;
}
