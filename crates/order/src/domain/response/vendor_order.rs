use crate::{
    domain::{
        delivery::Delivery,
        status::{ItemStatus, VendorOrderStatus},
    },
    model::vendor_order::{VendorOrder, VendorOrderItem},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct VendorOrderItemResponse {
    pub id: i32,
    pub listing_id: i32,
    pub title: String,
    pub price: i64,
    pub quantity: i32,
    pub status: ItemStatus,
}

impl From<VendorOrderItem> for VendorOrderItemResponse {
    fn from(value: VendorOrderItem) -> Self {
        VendorOrderItemResponse {
            id: value.vendor_order_item_id,
            listing_id: value.listing_id,
            title: value.title,
            price: value.price,
            quantity: value.quantity,
            status: value.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct VendorOrderResponse {
    pub id: i32,
    pub order_id: i32,
    pub vendor_id: i32,
    pub buyer_id: i32,
    pub items: Vec<VendorOrderItemResponse>,
    pub subtotal: i64,
    pub vendor_status: VendorOrderStatus,
    pub delivery: Delivery,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated_at")]
    pub updated_at: Option<String>,
}

impl From<VendorOrder> for VendorOrderResponse {
    fn from(value: VendorOrder) -> Self {
        VendorOrderResponse {
            id: value.vendor_order_id,
            order_id: value.order_id,
            vendor_id: value.vendor_id,
            buyer_id: value.buyer_id,
            items: value.items.into_iter().map(Into::into).collect(),
            subtotal: value.subtotal,
            vendor_status: value.vendor_status,
            delivery: value.delivery,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct VendorDashboardResponse {
    pub total_products: i64,
    pub active_products: i64,
    pub pending_orders: i64,
}
