use crate::domain::{
    aggregate::VendorOrderState,
    delivery::Delivery,
    status::{ItemStatus, VendorOrderStatus},
};
use chrono::NaiveDateTime;
use shared::errors::RepositoryError;
use sqlx::{FromRow, types::Json};

#[derive(Debug, Clone, FromRow)]
pub struct VendorOrderRow {
    pub vendor_order_id: i32,
    pub order_id: i32,
    pub vendor_id: i32,
    pub buyer_id: i32,
    pub subtotal: i64,
    pub vendor_status: String,
    pub delivery: Json<Delivery>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, FromRow)]
pub struct VendorOrderItemRow {
    pub vendor_order_item_id: i32,
    pub vendor_order_id: i32,
    pub listing_id: i32,
    pub title: String,
    pub price: i64,
    pub quantity: i32,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorOrderItem {
    pub vendor_order_item_id: i32,
    pub listing_id: i32,
    pub title: String,
    pub price: i64,
    pub quantity: i32,
    pub status: ItemStatus,
}

impl TryFrom<VendorOrderItemRow> for VendorOrderItem {
    type Error = RepositoryError;

    fn try_from(row: VendorOrderItemRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ItemStatus>()
            .map_err(|e| RepositoryError::Custom(e.to_string()))?;

        Ok(Self {
            vendor_order_item_id: row.vendor_order_item_id,
            listing_id: row.listing_id,
            title: row.title,
            price: row.price,
            quantity: row.quantity,
            status,
        })
    }
}

/// The slice of one order owned by a single vendor.
#[derive(Debug, Clone)]
pub struct VendorOrder {
    pub vendor_order_id: i32,
    pub order_id: i32,
    pub vendor_id: i32,
    pub buyer_id: i32,
    pub items: Vec<VendorOrderItem>,
    pub subtotal: i64,
    pub vendor_status: VendorOrderStatus,
    pub delivery: Delivery,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl VendorOrder {
    pub fn item_statuses(&self) -> Vec<ItemStatus> {
        self.items.iter().map(|item| item.status).collect()
    }

    pub fn state(&self) -> VendorOrderState {
        let mut state = VendorOrderState::from_items(&self.item_statuses());
        state.status = self.vendor_status;
        state
    }

    pub fn find_item(&self, item_id: i32) -> Option<&VendorOrderItem> {
        self.items
            .iter()
            .find(|item| item.vendor_order_item_id == item_id)
    }
}

impl VendorOrderRow {
    pub fn into_vendor_order(
        self,
        items: Vec<VendorOrderItem>,
    ) -> Result<VendorOrder, RepositoryError> {
        let vendor_status = self
            .vendor_status
            .parse::<VendorOrderStatus>()
            .map_err(|e| RepositoryError::Custom(e.to_string()))?;

        Ok(VendorOrder {
            vendor_order_id: self.vendor_order_id,
            order_id: self.order_id,
            vendor_id: self.vendor_id,
            buyer_id: self.buyer_id,
            items,
            subtotal: self.subtotal,
            vendor_status,
            delivery: self.delivery.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
