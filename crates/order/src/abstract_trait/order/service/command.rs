use crate::domain::{
    actor::Actor,
    requests::order::{CreateOrderRequest, UpdateOrderStatusRequest},
    response::{
        api::ApiResponse,
        order::{CreateOrderResponse, OrderResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(
        &self,
        actor: &Actor,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<CreateOrderResponse>, ServiceError>;
    async fn update_order_status(
        &self,
        actor: &Actor,
        order_id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
