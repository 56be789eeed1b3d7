use crate::domain::{
    delivery::Delivery,
    fan_out::{OrderLine, VendorGroup},
    status::OrderStatus,
};
use serde::{Deserialize, Serialize};
use shared::errors::ServiceError;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CreateOrderItemRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "listingId")]
    pub listing_id: i32,

    #[serde(default)]
    pub title: String,

    #[validate(range(min = 0))]
    pub price: i64,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

impl From<&CreateOrderItemRequest> for OrderLine {
    fn from(value: &CreateOrderItemRequest) -> Self {
        OrderLine {
            listing_id: value.listing_id,
            title: value.title.clone(),
            price: value.price,
            quantity: value.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<CreateOrderItemRequest>,

    #[serde(default)]
    pub delivery: Delivery,

    #[validate(range(min = 0))]
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct UpdateOrderStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
}

impl UpdateOrderStatusRequest {
    pub fn parsed(&self) -> Result<OrderStatus, ServiceError> {
        self.status
            .parse::<OrderStatus>()
            .map_err(|_| ServiceError::BadRequest(format!("Invalid status: {}", self.status)))
    }
}

/// Everything the command repository persists for one checkout.
#[derive(Debug, Clone)]
pub struct CreateOrderRecordRequest {
    pub user_id: i32,
    pub items: Vec<OrderLine>,
    pub delivery: Delivery,
    pub total: i64,
    pub vendor_orders: Vec<VendorGroup>,
}
