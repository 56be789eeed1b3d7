mod command;
mod query;

pub use self::command::VendorOrderCommandRepository;
pub use self::query::VendorOrderQueryRepository;

use crate::model::vendor_order::{
    VendorOrder, VendorOrderItem, VendorOrderItemRow, VendorOrderRow,
};
use shared::errors::RepositoryError;
use sqlx::PgConnection;
use std::collections::HashMap;

pub(crate) const VENDOR_ORDER_COLUMNS: &str = "vendor_order_id, order_id, vendor_id, buyer_id, subtotal, vendor_status, delivery, created_at, updated_at";

pub(crate) async fn hydrate_vendor_orders(
    conn: &mut PgConnection,
    rows: Vec<VendorOrderRow>,
) -> Result<Vec<VendorOrder>, RepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = rows.iter().map(|row| row.vendor_order_id).collect();

    let item_rows = sqlx::query_as::<_, VendorOrderItemRow>(
        r#"
        SELECT vendor_order_item_id, vendor_order_id, listing_id, title, price, quantity, status
        FROM vendor_order_items
        WHERE vendor_order_id = ANY($1)
        ORDER BY vendor_order_item_id
        "#,
    )
    .bind(&ids[..])
    .fetch_all(&mut *conn)
    .await?;

    let mut items: HashMap<i32, Vec<VendorOrderItem>> = HashMap::new();
    for row in item_rows {
        let vendor_order_id = row.vendor_order_id;
        items
            .entry(vendor_order_id)
            .or_default()
            .push(VendorOrderItem::try_from(row)?);
    }

    rows.into_iter()
        .map(|row| {
            let id = row.vendor_order_id;
            row.into_vendor_order(items.remove(&id).unwrap_or_default())
        })
        .collect()
}
