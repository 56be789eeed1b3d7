use crate::{
    domain::{requests::order::CreateOrderRecordRequest, status::OrderStatus},
    model::{order::Order, vendor_order::VendorOrder},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Persists the parent order, its items and every sub-order atomically.
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<(Order, Vec<VendorOrder>), RepositoryError>;
    async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError>;
    /// Sets `status` only while the stored status is still `expected`.
    /// `None` means the order has moved on.
    async fn transition_status(
        &self,
        order_id: i32,
        expected: OrderStatus,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError>;
}
