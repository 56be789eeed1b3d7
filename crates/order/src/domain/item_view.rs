use crate::{
    domain::status::ItemStatus,
    model::{order::OrderItem, vendor_order::VendorOrder},
};

/// Status of a parent line item as seen by the customer: the status of the
/// first sub-order item with the same listing, or `pending` when the line
/// was never fanned out.
pub fn item_status_for(listing_id: i32, vendor_orders: &[VendorOrder]) -> ItemStatus {
    vendor_orders
        .iter()
        .flat_map(|vendor_order| vendor_order.items.iter())
        .find(|item| item.listing_id == listing_id)
        .map(|item| item.status)
        .unwrap_or(ItemStatus::Pending)
}

pub fn attach_item_statuses(
    items: &[OrderItem],
    vendor_orders: &[VendorOrder],
) -> Vec<(OrderItem, ItemStatus)> {
    items
        .iter()
        .map(|item| (item.clone(), item_status_for(item.listing_id, vendor_orders)))
        .collect()
}
