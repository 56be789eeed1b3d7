use crate::domain::{
    actor::Actor,
    requests::vendor_order::{BulkItemStatusRequest, UpdateItemStatusRequest},
    response::{api::ApiResponse, vendor_order::VendorOrderResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynVendorOrderCommandService = Arc<dyn VendorOrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait VendorOrderCommandServiceTrait {
    async fn update_item_status(
        &self,
        actor: &Actor,
        vendor_order_id: i32,
        item_id: i32,
        req: &UpdateItemStatusRequest,
    ) -> Result<ApiResponse<VendorOrderResponse>, ServiceError>;
    async fn update_item_statuses(
        &self,
        actor: &Actor,
        vendor_order_id: i32,
        req: &BulkItemStatusRequest,
    ) -> Result<ApiResponse<VendorOrderResponse>, ServiceError>;
}
