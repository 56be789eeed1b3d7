use super::{ORDER_COLUMNS, hydrate_orders};
use crate::{
    abstract_trait::order::repository::OrderCommandRepositoryTrait,
    domain::{requests::order::CreateOrderRecordRequest, status::OrderStatus},
    model::{
        order::{Order, OrderItemRow, OrderRow},
        vendor_order::{VendorOrder, VendorOrderItem, VendorOrderItemRow, VendorOrderRow},
    },
    repository::vendor_order::VENDOR_ORDER_COLUMNS,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::types::Json;
use tracing::{error, info};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<(Order, Vec<VendorOrder>), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin checkout transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        let order_row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            INSERT INTO orders (user_id, total, status, delivery, created_at, updated_at)
            VALUES ($1, $2, $3, $4, current_timestamp, current_timestamp)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(req.user_id)
        .bind(req.total)
        .bind(OrderStatus::Pending.as_str())
        .bind(Json(req.delivery.clone()))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to create order for user {}: {:?}", req.user_id, e);
            RepositoryError::from(e)
        })?;

        let order_id = order_row.order_id;
        let mut items = Vec::with_capacity(req.items.len());

        for line in &req.items {
            let item = sqlx::query_as::<_, OrderItemRow>(
                r#"
                INSERT INTO order_items (order_id, listing_id, title, price, quantity)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING order_item_id, order_id, listing_id, title, price, quantity
                "#,
            )
            .bind(order_id)
            .bind(line.listing_id)
            .bind(&line.title)
            .bind(line.price)
            .bind(line.quantity)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!(
                    "❌ Failed to insert item for listing {} on order {}: {:?}",
                    line.listing_id, order_id, e
                );
                RepositoryError::from(e)
            })?;

            items.push(item.into());
        }

        let mut vendor_orders = Vec::with_capacity(req.vendor_orders.len());

        for group in &req.vendor_orders {
            let row = sqlx::query_as::<_, VendorOrderRow>(&format!(
                r#"
                INSERT INTO vendor_orders
                    (order_id, vendor_id, buyer_id, subtotal, vendor_status, delivery, created_at, updated_at)
                VALUES ($1, $2, $3, $4, 'pending', $5, current_timestamp, current_timestamp)
                RETURNING {VENDOR_ORDER_COLUMNS}
                "#
            ))
            .bind(order_id)
            .bind(group.vendor_id)
            .bind(req.user_id)
            .bind(group.subtotal)
            .bind(Json(req.delivery.clone()))
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!(
                    "❌ Failed to create sub-order for vendor {} on order {}: {:?}",
                    group.vendor_id, order_id, e
                );
                RepositoryError::from(e)
            })?;

            let mut sub_items = Vec::with_capacity(group.lines.len());
            for line in &group.lines {
                let item_row = sqlx::query_as::<_, VendorOrderItemRow>(
                    r#"
                    INSERT INTO vendor_order_items
                        (vendor_order_id, listing_id, title, price, quantity, status)
                    VALUES ($1, $2, $3, $4, $5, 'pending')
                    RETURNING vendor_order_item_id, vendor_order_id, listing_id, title, price, quantity, status
                    "#,
                )
                .bind(row.vendor_order_id)
                .bind(line.listing_id)
                .bind(&line.title)
                .bind(line.price)
                .bind(line.quantity)
                .fetch_one(&mut *tx)
                .await
                .map_err(RepositoryError::from)?;

                sub_items.push(VendorOrderItem::try_from(item_row)?);
            }

            vendor_orders.push(row.into_vendor_order(sub_items)?);
        }

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit checkout for order {}: {:?}", order_id, e);
            RepositoryError::from(e)
        })?;

        let vendor_order_ids = vendor_orders.iter().map(|v| v.vendor_order_id).collect();
        let order = order_row.into_order(items, vendor_order_ids)?;

        info!(
            "✅ Created order ID {} with {} sub-order(s) for user {}",
            order.order_id,
            vendor_orders.len(),
            order.user_id
        );

        Ok((order, vendor_orders))
    }

    async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            UPDATE orders
            SET status = $2,
                updated_at = current_timestamp
            WHERE order_id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(status.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update status of order {}: {:?}", order_id, e);
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        let order = hydrate_orders(&mut conn, vec![row])
            .await?
            .pop()
            .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Order ID {} status set to {}", order_id, status);
        Ok(order)
    }

    async fn transition_status(
        &self,
        order_id: i32,
        expected: OrderStatus,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            UPDATE orders
            SET status = $2,
                updated_at = current_timestamp
            WHERE order_id = $1 AND status = $3
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(status.as_str())
        .bind(expected.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to move order {} to {}: {:?}", order_id, status, e);
            RepositoryError::from(e)
        })?;

        let Some(row) = row else {
            info!(
                "⏭️ Order ID {} is no longer {}, status left unchanged",
                order_id, expected
            );
            return Ok(None);
        };

        let order = hydrate_orders(&mut conn, vec![row])
            .await?
            .pop()
            .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Order ID {} moved from {} to {}", order_id, expected, status);
        Ok(Some(order))
    }
}
