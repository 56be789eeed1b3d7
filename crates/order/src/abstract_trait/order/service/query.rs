use crate::domain::{
    actor::Actor,
    response::{api::ApiResponse, order::OrderResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_my_orders(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        actor: &Actor,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
