use crate::domain::{delivery::Delivery, status::OrderStatus};
use chrono::NaiveDateTime;
use shared::errors::RepositoryError;
use sqlx::{FromRow, types::Json};

#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub order_id: i32,
    pub user_id: i32,
    pub total: i64,
    pub status: String,
    pub delivery: Json<Delivery>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, FromRow)]
pub struct OrderItemRow {
    pub order_item_id: i32,
    pub order_id: i32,
    pub listing_id: i32,
    pub title: String,
    pub price: i64,
    pub quantity: i32,
}

/// A parent line item. Immutable once the order exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub order_item_id: i32,
    pub listing_id: i32,
    pub title: String,
    pub price: i64,
    pub quantity: i32,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            order_item_id: row.order_item_id,
            listing_id: row.listing_id,
            title: row.title,
            price: row.price,
            quantity: row.quantity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    pub items: Vec<OrderItem>,
    pub delivery: Delivery,
    pub total: i64,
    pub status: OrderStatus,
    /// Sub-order ids in creation order.
    pub vendor_order_ids: Vec<i32>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl OrderRow {
    pub fn into_order(
        self,
        items: Vec<OrderItem>,
        vendor_order_ids: Vec<i32>,
    ) -> Result<Order, RepositoryError> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|e| RepositoryError::Custom(e.to_string()))?;

        Ok(Order {
            order_id: self.order_id,
            user_id: self.user_id,
            items,
            delivery: self.delivery.0,
            total: self.total,
            status,
            vendor_order_ids,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
