mod common;

use common::{Harness, VENDOR_A, VENDOR_B, customer, item, order_request, vendor};
use order::{
    abstract_trait::order::service::OrderCommandServiceTrait,
    domain::status::{ItemStatus, OrderStatus, VendorOrderStatus},
};
use shared::errors::ServiceError;
use std::collections::BTreeSet;

#[tokio::test]
async fn test_checkout_splits_order_per_vendor() {
    let harness = Harness::new(false);

    let created = harness
        .checkout(vec![item(1, 1_500, 2), item(4, 3_200, 1), item(3, 700, 3)])
        .await;

    assert_eq!(created.order.status, OrderStatus::Pending);
    assert_eq!(created.order.total, 8_300);
    assert_eq!(created.order.items.len(), 3);
    assert!(
        created
            .order
            .items
            .iter()
            .all(|i| i.status == ItemStatus::Pending)
    );

    assert_eq!(created.vendor_orders.len(), 2);

    let first = &created.vendor_orders[0];
    assert_eq!(first.vendor_id, VENDOR_A);
    assert_eq!(first.subtotal, 1_500 * 2 + 700 * 3);
    assert_eq!(first.items.len(), 2);

    let second = &created.vendor_orders[1];
    assert_eq!(second.vendor_id, VENDOR_B);
    assert_eq!(second.subtotal, 3_200);

    for vendor_order in &created.vendor_orders {
        assert_eq!(vendor_order.order_id, created.order.id);
        assert_eq!(vendor_order.buyer_id, created.order.user_id);
        assert_eq!(vendor_order.vendor_status, VendorOrderStatus::Pending);
        assert_eq!(vendor_order.delivery, created.order.delivery);
        assert!(
            vendor_order
                .items
                .iter()
                .all(|i| i.status == ItemStatus::Pending)
        );
    }

    let linked: Vec<i32> = created.vendor_orders.iter().map(|v| v.id).collect();
    assert_eq!(created.order.vendor_orders, linked);
}

#[tokio::test]
async fn test_sub_order_subtotals_match_their_lines() {
    let harness = Harness::new(false);

    let created = harness
        .checkout(vec![
            item(2, 2_000, 1),
            item(5, 900, 4),
            item(1, 1_500, 1),
            item(4, 3_200, 2),
        ])
        .await;

    for vendor_order in &created.vendor_orders {
        let sum: i64 = vendor_order
            .items
            .iter()
            .map(|i| i.price * i64::from(i.quantity))
            .sum();
        assert_eq!(vendor_order.subtotal, sum);
    }
}

#[tokio::test]
async fn test_sub_orders_cover_every_resolved_line_exactly_once() {
    let harness = Harness::new(false);

    let created = harness
        .checkout(vec![item(1, 1_500, 1), item(4, 3_200, 1), item(5, 900, 1)])
        .await;

    let ordered: BTreeSet<i32> = created.order.items.iter().map(|i| i.listing_id).collect();
    let fanned: Vec<i32> = created
        .vendor_orders
        .iter()
        .flat_map(|v| v.items.iter().map(|i| i.listing_id))
        .collect();

    assert_eq!(fanned.len(), ordered.len());
    assert_eq!(fanned.into_iter().collect::<BTreeSet<_>>(), ordered);
}

#[tokio::test]
async fn test_price_snapshot_comes_from_checkout_not_listing() {
    let harness = Harness::new(false);

    let created = harness.checkout(vec![item(1, 999, 1)]).await;

    assert_eq!(created.vendor_orders[0].items[0].price, 999);
    assert_eq!(created.vendor_orders[0].subtotal, 999);
}

#[tokio::test]
async fn test_lenient_fan_out_drops_unknown_listing() {
    let harness = Harness::new(false);

    let created = harness
        .checkout(vec![item(1, 1_500, 1), item(404, 100, 2)])
        .await;

    assert_eq!(created.order.items.len(), 2);
    assert_eq!(created.vendor_orders.len(), 1);
    assert_eq!(created.vendor_orders[0].items.len(), 1);

    let orphan = created
        .order
        .items
        .iter()
        .find(|i| i.listing_id == 404)
        .unwrap();
    assert_eq!(orphan.status, ItemStatus::Pending);
}

#[tokio::test]
async fn test_lenient_fan_out_with_nothing_resolved_creates_no_sub_orders() {
    let harness = Harness::new(false);

    let created = harness.checkout(vec![item(404, 100, 1)]).await;

    assert!(created.vendor_orders.is_empty());
    assert!(created.order.vendor_orders.is_empty());
    assert_eq!(created.order.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_strict_fan_out_rejects_unknown_listing() {
    let harness = Harness::new(true);

    let result = harness
        .deps
        .order_command
        .create_order(
            &customer(),
            &order_request(vec![item(1, 1_500, 1), item(404, 100, 1)]),
        )
        .await;

    assert!(matches!(result, Err(ServiceError::BadRequest(msg)) if msg.contains("404")));
    assert_eq!(harness.store.order_count(), 0);
    assert_eq!(harness.store.vendor_order_count(), 0);
}

#[tokio::test]
async fn test_empty_order_is_rejected() {
    let harness = Harness::new(false);

    let result = harness
        .deps
        .order_command
        .create_order(&customer(), &order_request(vec![]))
        .await;

    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    assert_eq!(harness.store.order_count(), 0);
}

#[tokio::test]
async fn test_vendor_cannot_place_order() {
    let harness = Harness::new(false);

    let result = harness
        .deps
        .order_command
        .create_order(&vendor(VENDOR_A), &order_request(vec![item(1, 1_500, 1)]))
        .await;

    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn test_checkout_with_overflowing_amount_is_rejected() {
    let harness = Harness::new(false);

    let result = harness
        .deps
        .order_command
        .create_order(
            &customer(),
            &order_request(vec![item(1, i64::MAX / 2 + 1, 2)]),
        )
        .await;

    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    assert_eq!(harness.store.order_count(), 0);
    assert_eq!(harness.store.vendor_order_count(), 0);
}
