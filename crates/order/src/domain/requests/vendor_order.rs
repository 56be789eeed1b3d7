use crate::domain::status::ItemStatus;
use serde::{Deserialize, Serialize};
use shared::errors::ServiceError;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct UpdateItemStatusRequest {
    pub status: String,
}

impl UpdateItemStatusRequest {
    pub fn parsed(&self) -> Result<ItemStatus, ServiceError> {
        self.status
            .parse::<ItemStatus>()
            .map_err(|_| ServiceError::BadRequest("Invalid status".into()))
    }
}

/// Bulk entries keep the raw status; invalid ones are skipped, not rejected.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct BulkItemStatusEntry {
    #[serde(alias = "_id")]
    pub item_id: i32,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct BulkItemStatusRequest {
    #[validate(length(min = 1, message = "No items provided for update"))]
    pub items: Vec<BulkItemStatusEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStatusUpdate {
    pub item_id: i32,
    pub status: ItemStatus,
}

#[derive(Debug, Clone)]
pub struct UpdateItemStatusRecordRequest {
    pub vendor_order_id: i32,
    pub updates: Vec<ItemStatusUpdate>,
}
