use crate::{
    domain::{
        delivery::Delivery,
        item_view::attach_item_statuses,
        response::vendor_order::VendorOrderResponse,
        status::{ItemStatus, OrderStatus},
    },
    model::{order::Order, vendor_order::VendorOrder},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderItemResponse {
    pub id: i32,
    pub listing_id: i32,
    pub title: String,
    pub price: i64,
    pub quantity: i32,
    pub status: ItemStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub items: Vec<OrderItemResponse>,
    pub delivery: Delivery,
    pub total: i64,
    pub status: OrderStatus,
    pub vendor_orders: Vec<i32>,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated_at")]
    pub updated_at: Option<String>,
}

impl OrderResponse {
    /// Builds the customer view; item statuses are read through from the
    /// sub-orders.
    pub fn with_item_statuses(order: Order, vendor_orders: &[VendorOrder]) -> Self {
        let items = attach_item_statuses(&order.items, vendor_orders)
            .into_iter()
            .map(|(item, status)| OrderItemResponse {
                id: item.order_item_id,
                listing_id: item.listing_id,
                title: item.title,
                price: item.price,
                quantity: item.quantity,
                status,
            })
            .collect();

        OrderResponse {
            id: order.order_id,
            user_id: order.user_id,
            items,
            delivery: order.delivery,
            total: order.total,
            status: order.status,
            vendor_orders: order.vendor_order_ids,
            created_at: order.created_at.map(|dt| dt.to_string()),
            updated_at: order.updated_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CreateOrderResponse {
    pub order: OrderResponse,
    pub vendor_orders: Vec<VendorOrderResponse>,
}
