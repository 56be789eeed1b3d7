//! Pure status derivations. Both functions are evaluated top to bottom and
//! the first matching rule wins.

use crate::domain::status::{ItemStatus, OrderStatus, VendorOrderStatus};

/// Derives a sub-order's `vendor_status` from its items.
///
/// Mixtures without any accepted item (only `pending` and `out_of_stock`,
/// say) fall back to `pending`.
pub fn derive_vendor_status(items: &[ItemStatus]) -> VendorOrderStatus {
    if items.is_empty() {
        return VendorOrderStatus::Pending;
    }

    let all = |status: ItemStatus| items.iter().all(|s| *s == status);
    let has = |status: ItemStatus| items.contains(&status);

    if all(ItemStatus::Accepted) {
        VendorOrderStatus::Accepted
    } else if all(ItemStatus::Rejected) {
        VendorOrderStatus::Rejected
    } else if all(ItemStatus::Pending) {
        VendorOrderStatus::Pending
    } else if has(ItemStatus::Accepted) && has(ItemStatus::Rejected) {
        VendorOrderStatus::PartiallyAccepted
    } else if has(ItemStatus::Accepted)
        && (has(ItemStatus::Pending) || has(ItemStatus::OutOfStock))
    {
        VendorOrderStatus::PartiallyAccepted
    } else {
        VendorOrderStatus::Pending
    }
}

/// What the order aggregator sees of one sub-order.
///
/// `out_of_stock` marks a sub-order that is settled without any acceptance
/// (no item pending, none accepted, at least one out of stock). Its
/// `status` is still the `pending` fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorOrderState {
    pub status: VendorOrderStatus,
    pub out_of_stock: bool,
}

impl VendorOrderState {
    pub fn new(status: VendorOrderStatus) -> Self {
        Self {
            status,
            out_of_stock: false,
        }
    }

    pub fn from_items(items: &[ItemStatus]) -> Self {
        let status = derive_vendor_status(items);
        let out_of_stock = status == VendorOrderStatus::Pending
            && items.iter().all(ItemStatus::is_terminal)
            && items.contains(&ItemStatus::OutOfStock);

        Self {
            status,
            out_of_stock,
        }
    }
}

/// Derives the parent order status. `None` means "leave the stored status
/// alone", which happens only when the order has no sub-orders.
pub fn derive_order_status(states: &[VendorOrderState]) -> Option<OrderStatus> {
    if states.is_empty() {
        return None;
    }

    let all = |status: VendorOrderStatus| states.iter().all(|s| s.status == status);
    let has = |status: VendorOrderStatus| states.iter().any(|s| s.status == status);
    let has_out_of_stock = states.iter().any(|s| s.out_of_stock);

    let has_accepted = has(VendorOrderStatus::Accepted);

    let status = if all(VendorOrderStatus::Accepted) {
        OrderStatus::Completed
    } else if all(VendorOrderStatus::Rejected) {
        OrderStatus::Cancelled
    } else if all(VendorOrderStatus::Pending) {
        OrderStatus::Pending
    } else if has(VendorOrderStatus::PartiallyAccepted) {
        OrderStatus::PartiallyCompleted
    } else if (has_accepted && has(VendorOrderStatus::Rejected))
        || (has_accepted && has_out_of_stock)
    {
        OrderStatus::PartiallyRejected
    } else if has_accepted && has(VendorOrderStatus::Pending) {
        OrderStatus::PartiallyCompleted
    } else {
        OrderStatus::Pending
    };

    Some(status)
}
