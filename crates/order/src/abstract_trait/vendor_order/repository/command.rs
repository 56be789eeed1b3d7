use crate::{
    domain::requests::vendor_order::UpdateItemStatusRecordRequest,
    model::vendor_order::VendorOrder,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynVendorOrderCommandRepository =
    Arc<dyn VendorOrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait VendorOrderCommandRepositoryTrait {
    /// Writes the item statuses and re-derives `vendor_status` from the
    /// stored items in the same transaction.
    async fn update_item_statuses(
        &self,
        req: &UpdateItemStatusRecordRequest,
    ) -> Result<VendorOrder, RepositoryError>;
}
