use crate::{
    abstract_trait::{
        order::repository::DynOrderCommandRepository,
        vendor_order::repository::DynVendorOrderQueryRepository,
    },
    domain::{aggregate::derive_order_status, status::OrderStatus},
    model::vendor_order::VendorOrder,
};
use shared::errors::ServiceError;
use tracing::info;

/// Keeps the parent order status in line with its sub-orders. Reads every
/// sub-order and overwrites the stored status, so running it again without
/// intervening item writes changes nothing.
#[derive(Clone)]
pub struct OrderStatusAggregator {
    vendor_order_query: DynVendorOrderQueryRepository,
    order_command: DynOrderCommandRepository,
}

impl OrderStatusAggregator {
    pub fn new(
        vendor_order_query: DynVendorOrderQueryRepository,
        order_command: DynOrderCommandRepository,
    ) -> Self {
        Self {
            vendor_order_query,
            order_command,
        }
    }

    /// Returns the stored status, or `None` when the order has no
    /// sub-orders and was left untouched.
    pub async fn recompute(&self, order_id: i32) -> Result<Option<OrderStatus>, ServiceError> {
        let vendor_orders = self.vendor_order_query.find_by_order(order_id).await?;
        let states: Vec<_> = vendor_orders.iter().map(VendorOrder::state).collect();

        let Some(status) = derive_order_status(&states) else {
            info!("ℹ️ Order {} has no sub-orders, status left as is", order_id);
            return Ok(None);
        };

        self.order_command.update_status(order_id, status).await?;

        info!(
            "🧮 Order {} recomputed from {} sub-order(s): {}",
            order_id,
            vendor_orders.len(),
            status
        );
        Ok(Some(status))
    }
}
