mod common;

use async_trait::async_trait;
use common::{Harness, InMemoryStore, VENDOR_A, VENDOR_B, customer, item, vendor};
use order::{
    abstract_trait::vendor_order::{
        repository::VendorOrderQueryRepositoryTrait, service::VendorOrderCommandServiceTrait,
    },
    domain::{
        aggregate::derive_vendor_status,
        requests::vendor_order::{
            BulkItemStatusEntry, BulkItemStatusRequest, UpdateItemStatusRequest,
        },
        response::vendor_order::VendorOrderResponse,
        status::{ItemStatus, OrderStatus, VendorOrderStatus},
    },
    model::vendor_order::VendorOrder,
};
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;

/// Serves one sub-order as it looked at a fixed point in time, the way a
/// read racing another writer would see it.
struct FrozenVendorOrder {
    store: Arc<InMemoryStore>,
    snapshot: VendorOrder,
}

#[async_trait]
impl VendorOrderQueryRepositoryTrait for FrozenVendorOrder {
    async fn find_by_id(
        &self,
        vendor_order_id: i32,
    ) -> Result<Option<VendorOrder>, RepositoryError> {
        if vendor_order_id == self.snapshot.vendor_order_id {
            return Ok(Some(self.snapshot.clone()));
        }
        VendorOrderQueryRepositoryTrait::find_by_id(self.store.as_ref(), vendor_order_id).await
    }

    async fn find_by_order(&self, order_id: i32) -> Result<Vec<VendorOrder>, RepositoryError> {
        self.store.find_by_order(order_id).await
    }

    async fn find_by_vendor(&self, vendor_id: i32) -> Result<Vec<VendorOrder>, RepositoryError> {
        self.store.find_by_vendor(vendor_id).await
    }

    async fn count_pending_by_vendor(&self, vendor_id: i32) -> Result<i64, RepositoryError> {
        self.store.count_pending_by_vendor(vendor_id).await
    }
}

fn status(value: &str) -> UpdateItemStatusRequest {
    UpdateItemStatusRequest {
        status: value.into(),
    }
}

fn bulk(entries: &[(i32, &str)]) -> BulkItemStatusRequest {
    BulkItemStatusRequest {
        items: entries
            .iter()
            .map(|(item_id, status)| BulkItemStatusEntry {
                item_id: *item_id,
                status: status.to_string(),
            })
            .collect(),
    }
}

async fn set(
    harness: &Harness,
    vendor_order: &VendorOrderResponse,
    index: usize,
    value: &str,
) -> VendorOrderResponse {
    harness
        .deps
        .vendor_order_command
        .update_item_status(
            &vendor(vendor_order.vendor_id),
            vendor_order.id,
            vendor_order.items[index].id,
            &status(value),
        )
        .await
        .unwrap()
        .data
}

#[tokio::test]
async fn test_single_vendor_accepts_everything() {
    let harness = Harness::new(false);
    let created = harness
        .checkout(vec![item(1, 1_500, 1), item(2, 2_000, 1)])
        .await;
    let sub = &created.vendor_orders[0];

    let after_first = set(&harness, sub, 0, "accepted").await;
    assert_eq!(after_first.vendor_status, VendorOrderStatus::PartiallyAccepted);
    assert_eq!(
        harness.order_status(created.order.id),
        OrderStatus::PartiallyCompleted
    );

    let after_second = set(&harness, sub, 1, "accepted").await;
    assert_eq!(after_second.vendor_status, VendorOrderStatus::Accepted);
    assert!(
        after_second
            .items
            .iter()
            .all(|i| i.status == ItemStatus::Accepted)
    );
    assert_eq!(harness.order_status(created.order.id), OrderStatus::Completed);
}

#[tokio::test]
async fn test_one_vendor_accepts_other_rejects() {
    let harness = Harness::new(false);
    let created = harness
        .checkout(vec![item(1, 1_500, 1), item(4, 3_200, 1)])
        .await;

    set(&harness, &created.vendor_orders[0], 0, "accepted").await;
    let rejected = set(&harness, &created.vendor_orders[1], 0, "rejected").await;

    assert_eq!(rejected.vendor_status, VendorOrderStatus::Rejected);
    assert_eq!(
        harness.vendor_status(created.vendor_orders[0].id),
        VendorOrderStatus::Accepted
    );
    assert_eq!(
        harness.order_status(created.order.id),
        OrderStatus::PartiallyRejected
    );
}

#[tokio::test]
async fn test_partial_progress_on_single_vendor() {
    let harness = Harness::new(false);
    let created = harness
        .checkout(vec![item(1, 1_500, 1), item(2, 2_000, 1), item(3, 700, 1)])
        .await;

    let updated = set(&harness, &created.vendor_orders[0], 0, "accepted").await;

    assert_eq!(updated.vendor_status, VendorOrderStatus::PartiallyAccepted);
    assert_eq!(
        harness.order_status(created.order.id),
        OrderStatus::PartiallyCompleted
    );
}

#[tokio::test]
async fn test_every_vendor_rejecting_cancels_order() {
    let harness = Harness::new(false);
    let created = harness
        .checkout(vec![item(1, 1_500, 1), item(4, 3_200, 1)])
        .await;

    set(&harness, &created.vendor_orders[0], 0, "rejected").await;
    set(&harness, &created.vendor_orders[1], 0, "rejected").await;

    assert_eq!(harness.order_status(created.order.id), OrderStatus::Cancelled);
}

#[tokio::test]
async fn test_out_of_stock_vendor_next_to_accepted_vendor() {
    let harness = Harness::new(false);
    let created = harness
        .checkout(vec![item(1, 1_500, 1), item(4, 3_200, 1)])
        .await;

    set(&harness, &created.vendor_orders[0], 0, "accepted").await;
    let out = set(&harness, &created.vendor_orders[1], 0, "out_of_stock").await;

    assert_eq!(out.vendor_status, VendorOrderStatus::Pending);
    assert_eq!(
        harness.order_status(created.order.id),
        OrderStatus::PartiallyRejected
    );
}

#[tokio::test]
async fn test_settled_mix_across_vendors_is_not_pending() {
    let harness = Harness::new(false);
    let created = harness
        .checkout(vec![
            item(1, 1_500, 1),
            item(2, 2_000, 1),
            item(4, 3_200, 1),
            item(5, 900, 1),
        ])
        .await;
    let (a, b) = (&created.vendor_orders[0], &created.vendor_orders[1]);

    set(&harness, a, 0, "accepted").await;
    set(&harness, a, 1, "out_of_stock").await;
    set(&harness, b, 0, "rejected").await;
    set(&harness, b, 1, "rejected").await;

    assert_eq!(
        harness.vendor_status(a.id),
        VendorOrderStatus::PartiallyAccepted
    );
    assert_eq!(harness.vendor_status(b.id), VendorOrderStatus::Rejected);
    assert_eq!(
        harness.order_status(created.order.id),
        OrderStatus::PartiallyCompleted
    );
}

#[tokio::test]
async fn test_bulk_update_with_only_invalid_status_changes_nothing() {
    let harness = Harness::new(false);
    let created = harness.checkout(vec![item(1, 1_500, 1)]).await;
    let sub = &created.vendor_orders[0];

    let result = harness
        .deps
        .vendor_order_command
        .update_item_statuses(
            &vendor(VENDOR_A),
            sub.id,
            &bulk(&[(sub.items[0].id, "bogus")]),
        )
        .await;

    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    assert_eq!(harness.store.item_writes(), 0);
    assert_eq!(harness.vendor_status(sub.id), VendorOrderStatus::Pending);
    assert_eq!(harness.order_status(created.order.id), OrderStatus::Pending);
}

#[tokio::test]
async fn test_bulk_update_skips_invalid_entries() {
    let harness = Harness::new(false);
    let created = harness
        .checkout(vec![item(1, 1_500, 1), item(2, 2_000, 1), item(3, 700, 1)])
        .await;
    let sub = &created.vendor_orders[0];

    let updated = harness
        .deps
        .vendor_order_command
        .update_item_statuses(
            &vendor(VENDOR_A),
            sub.id,
            &bulk(&[
                (sub.items[0].id, "accepted"),
                (9_999, "rejected"),
                (sub.items[1].id, "nope"),
            ]),
        )
        .await
        .unwrap()
        .data;

    let statuses: Vec<ItemStatus> = updated.items.iter().map(|i| i.status).collect();
    assert_eq!(
        statuses,
        vec![ItemStatus::Accepted, ItemStatus::Pending, ItemStatus::Pending]
    );
    assert_eq!(updated.vendor_status, VendorOrderStatus::PartiallyAccepted);
    assert_eq!(
        harness.order_status(created.order.id),
        OrderStatus::PartiallyCompleted
    );
}

#[tokio::test]
async fn test_bulk_update_settles_whole_sub_order_at_once() {
    let harness = Harness::new(false);
    let created = harness
        .checkout(vec![item(1, 1_500, 1), item(2, 2_000, 1)])
        .await;
    let sub = &created.vendor_orders[0];

    let updated = harness
        .deps
        .vendor_order_command
        .update_item_statuses(
            &vendor(VENDOR_A),
            sub.id,
            &bulk(&[(sub.items[0].id, "accepted"), (sub.items[1].id, "accepted")]),
        )
        .await
        .unwrap()
        .data;

    assert_eq!(updated.vendor_status, VendorOrderStatus::Accepted);
    assert_eq!(harness.store.item_writes(), 1);
    assert_eq!(harness.order_status(created.order.id), OrderStatus::Completed);
}

#[tokio::test]
async fn test_bulk_update_last_entry_for_an_item_wins() {
    let harness = Harness::new(false);
    let created = harness.checkout(vec![item(1, 1_500, 1)]).await;
    let sub = &created.vendor_orders[0];
    let id = sub.items[0].id;

    let updated = harness
        .deps
        .vendor_order_command
        .update_item_statuses(
            &vendor(VENDOR_A),
            sub.id,
            &bulk(&[(id, "accepted"), (id, "rejected")]),
        )
        .await
        .unwrap()
        .data;

    assert_eq!(updated.items[0].status, ItemStatus::Rejected);
    assert_eq!(updated.vendor_status, VendorOrderStatus::Rejected);
}

#[tokio::test]
async fn test_empty_bulk_update_is_rejected() {
    let harness = Harness::new(false);
    let created = harness.checkout(vec![item(1, 1_500, 1)]).await;

    let result = harness
        .deps
        .vendor_order_command
        .update_item_statuses(&vendor(VENDOR_A), created.vendor_orders[0].id, &bulk(&[]))
        .await;

    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
}

#[tokio::test]
async fn test_invalid_single_status_is_bad_request() {
    let harness = Harness::new(false);
    let created = harness.checkout(vec![item(1, 1_500, 1)]).await;
    let sub = &created.vendor_orders[0];

    let result = harness
        .deps
        .vendor_order_command
        .update_item_status(&vendor(VENDOR_A), sub.id, sub.items[0].id, &status("done"))
        .await;

    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    assert_eq!(harness.store.item_writes(), 0);
}

#[tokio::test]
async fn test_other_vendor_cannot_see_sub_order() {
    let harness = Harness::new(false);
    let created = harness.checkout(vec![item(1, 1_500, 1)]).await;
    let sub = &created.vendor_orders[0];

    let single = harness
        .deps
        .vendor_order_command
        .update_item_status(
            &vendor(VENDOR_B),
            sub.id,
            sub.items[0].id,
            &status("accepted"),
        )
        .await;
    assert!(matches!(single, Err(ServiceError::NotFound(_))));

    let many = harness
        .deps
        .vendor_order_command
        .update_item_statuses(
            &vendor(VENDOR_B),
            sub.id,
            &bulk(&[(sub.items[0].id, "accepted")]),
        )
        .await;
    assert!(matches!(many, Err(ServiceError::NotFound(_))));

    assert_eq!(harness.store.item_writes(), 0);
}

#[tokio::test]
async fn test_customer_cannot_update_items() {
    let harness = Harness::new(false);
    let created = harness.checkout(vec![item(1, 1_500, 1)]).await;
    let sub = &created.vendor_orders[0];

    let result = harness
        .deps
        .vendor_order_command
        .update_item_status(&customer(), sub.id, sub.items[0].id, &status("accepted"))
        .await;

    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn test_unknown_sub_order_and_item() {
    let harness = Harness::new(false);
    let created = harness.checkout(vec![item(1, 1_500, 1)]).await;
    let sub = &created.vendor_orders[0];

    let missing_sub_order = harness
        .deps
        .vendor_order_command
        .update_item_status(&vendor(VENDOR_A), 9_999, sub.items[0].id, &status("accepted"))
        .await;
    assert!(matches!(missing_sub_order, Err(ServiceError::NotFound(_))));

    let missing_item = harness
        .deps
        .vendor_order_command
        .update_item_status(&vendor(VENDOR_A), sub.id, 9_999, &status("accepted"))
        .await;
    assert!(matches!(missing_item, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_recompute_is_idempotent() {
    let harness = Harness::new(false);
    let created = harness
        .checkout(vec![item(1, 1_500, 1), item(4, 3_200, 1)])
        .await;
    set(&harness, &created.vendor_orders[0], 0, "accepted").await;

    let first = harness.deps.aggregator.recompute(created.order.id).await.unwrap();
    let second = harness.deps.aggregator.recompute(created.order.id).await.unwrap();

    assert_eq!(first, Some(OrderStatus::PartiallyCompleted));
    assert_eq!(first, second);
    assert_eq!(
        harness.order_status(created.order.id),
        OrderStatus::PartiallyCompleted
    );
}

#[tokio::test]
async fn test_recompute_leaves_order_without_sub_orders_alone() {
    let harness = Harness::new(false);
    let created = harness.checkout(vec![item(404, 100, 1)]).await;

    let result = harness.deps.aggregator.recompute(created.order.id).await.unwrap();

    assert_eq!(result, None);
    assert_eq!(harness.order_status(created.order.id), OrderStatus::Pending);
}

#[tokio::test]
async fn test_vendor_status_follows_stored_items_when_reads_are_stale() {
    let harness = Harness::new(false);
    let created = harness
        .checkout(vec![item(1, 1_500, 1), item(2, 2_000, 1)])
        .await;
    let sub = &created.vendor_orders[0];

    let mut repos = harness.store.repositories();
    repos.vendor_order_query = Arc::new(FrozenVendorOrder {
        store: harness.store.clone(),
        snapshot: harness.store.stored_vendor_order(sub.id).unwrap(),
    });
    let stale = Harness::with_repositories(harness.store.clone(), repos, false);

    set(&stale, sub, 0, "accepted").await;
    set(&stale, sub, 1, "accepted").await;

    let stored = harness.store.stored_vendor_order(sub.id).unwrap();
    assert!(stored.items.iter().all(|i| i.status == ItemStatus::Accepted));
    assert_eq!(stored.vendor_status, VendorOrderStatus::Accepted);
    assert_eq!(
        derive_vendor_status(&stored.item_statuses()),
        stored.vendor_status
    );
    assert_eq!(harness.order_status(created.order.id), OrderStatus::Completed);
}
