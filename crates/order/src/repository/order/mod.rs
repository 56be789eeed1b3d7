mod command;
mod query;

pub use self::command::OrderCommandRepository;
pub use self::query::OrderQueryRepository;

use crate::model::order::{Order, OrderItem, OrderItemRow, OrderRow};
use shared::errors::RepositoryError;
use sqlx::PgConnection;
use std::collections::HashMap;

pub(crate) const ORDER_COLUMNS: &str =
    "order_id, user_id, total, status, delivery, created_at, updated_at";

/// Attaches line items and sub-order references to order rows, keeping the
/// row order.
pub(crate) async fn hydrate_orders(
    conn: &mut PgConnection,
    rows: Vec<OrderRow>,
) -> Result<Vec<Order>, RepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = rows.iter().map(|row| row.order_id).collect();

    let item_rows = sqlx::query_as::<_, OrderItemRow>(
        r#"
        SELECT order_item_id, order_id, listing_id, title, price, quantity
        FROM order_items
        WHERE order_id = ANY($1)
        ORDER BY order_item_id
        "#,
    )
    .bind(&ids[..])
    .fetch_all(&mut *conn)
    .await?;

    let refs = sqlx::query_as::<_, (i32, i32)>(
        r#"
        SELECT order_id, vendor_order_id
        FROM vendor_orders
        WHERE order_id = ANY($1)
        ORDER BY vendor_order_id
        "#,
    )
    .bind(&ids[..])
    .fetch_all(&mut *conn)
    .await?;

    let mut items: HashMap<i32, Vec<OrderItem>> = HashMap::new();
    for row in item_rows {
        items.entry(row.order_id).or_default().push(row.into());
    }

    let mut vendor_orders: HashMap<i32, Vec<i32>> = HashMap::new();
    for (order_id, vendor_order_id) in refs {
        vendor_orders.entry(order_id).or_default().push(vendor_order_id);
    }

    rows.into_iter()
        .map(|row| {
            let id = row.order_id;
            row.into_order(
                items.remove(&id).unwrap_or_default(),
                vendor_orders.remove(&id).unwrap_or_default(),
            )
        })
        .collect()
}
