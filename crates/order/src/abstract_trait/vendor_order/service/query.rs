use crate::domain::{
    actor::Actor,
    response::{
        api::ApiResponse,
        vendor_order::{VendorDashboardResponse, VendorOrderResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynVendorOrderQueryService = Arc<dyn VendorOrderQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait VendorOrderQueryServiceTrait {
    async fn find_my_vendor_orders(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<VendorOrderResponse>>, ServiceError>;
    async fn dashboard(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<VendorDashboardResponse>, ServiceError>;
}
