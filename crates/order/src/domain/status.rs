use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} status: {value}")]
pub struct ParseStatusError {
    pub kind: &'static str,
    pub value: String,
}

/// Fulfillment decision a vendor makes on a single line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Pending,
    Accepted,
    Rejected,
    OutOfStock,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Pending,
        ItemStatus::Accepted,
        ItemStatus::Rejected,
        ItemStatus::OutOfStock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Accepted => "accepted",
            ItemStatus::Rejected => "rejected",
            ItemStatus::OutOfStock => "out_of_stock",
        }
    }

    /// Everything except `pending` is a vendor decision.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ItemStatus::Pending)
    }
}

impl FromStr for ItemStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "accepted" => Ok(ItemStatus::Accepted),
            "rejected" => Ok(ItemStatus::Rejected),
            "out_of_stock" => Ok(ItemStatus::OutOfStock),
            other => Err(ParseStatusError {
                kind: "item",
                value: other.to_string(),
            }),
        }
    }
}

/// Derived summary of one vendor sub-order. Never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VendorOrderStatus {
    Pending,
    Accepted,
    Rejected,
    PartiallyAccepted,
}

impl VendorOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorOrderStatus::Pending => "pending",
            VendorOrderStatus::Accepted => "accepted",
            VendorOrderStatus::Rejected => "rejected",
            VendorOrderStatus::PartiallyAccepted => "partially_accepted",
        }
    }
}

impl FromStr for VendorOrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VendorOrderStatus::Pending),
            "accepted" => Ok(VendorOrderStatus::Accepted),
            "rejected" => Ok(VendorOrderStatus::Rejected),
            "partially_accepted" => Ok(VendorOrderStatus::PartiallyAccepted),
            other => Err(ParseStatusError {
                kind: "vendor order",
                value: other.to_string(),
            }),
        }
    }
}

/// Customer-facing order status, derived from the sub-orders except for
/// customer cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
    PartiallyCompleted,
    PartiallyRejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::PartiallyCompleted => "partially_completed",
            OrderStatus::PartiallyRejected => "partially_rejected",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "partially_completed" => Ok(OrderStatus::PartiallyCompleted),
            "partially_rejected" => Ok(OrderStatus::PartiallyRejected),
            other => Err(ParseStatusError {
                kind: "order",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for VendorOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
