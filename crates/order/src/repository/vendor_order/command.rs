use super::{VENDOR_ORDER_COLUMNS, hydrate_vendor_orders};
use crate::{
    abstract_trait::vendor_order::repository::VendorOrderCommandRepositoryTrait,
    domain::{
        aggregate::derive_vendor_status, requests::vendor_order::UpdateItemStatusRecordRequest,
        status::ItemStatus,
    },
    model::vendor_order::{VendorOrder, VendorOrderRow},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct VendorOrderCommandRepository {
    db: ConnectionPool,
}

impl VendorOrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VendorOrderCommandRepositoryTrait for VendorOrderCommandRepository {
    async fn update_item_statuses(
        &self,
        req: &UpdateItemStatusRecordRequest,
    ) -> Result<VendorOrder, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        // Serializes writers of the same sub-order until commit.
        sqlx::query(
            r#"
            SELECT vendor_order_id
            FROM vendor_orders
            WHERE vendor_order_id = $1
            FOR UPDATE
            "#,
        )
        .bind(req.vendor_order_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::from)?
        .ok_or(RepositoryError::NotFound)?;

        for update in &req.updates {
            let result = sqlx::query(
                r#"
                UPDATE vendor_order_items
                SET status = $3
                WHERE vendor_order_id = $1 AND vendor_order_item_id = $2
                "#,
            )
            .bind(req.vendor_order_id)
            .bind(update.item_id)
            .bind(update.status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(
                    "❌ Failed to set item {} of sub-order {}: {:?}",
                    update.item_id, req.vendor_order_id, e
                );
                RepositoryError::from(e)
            })?;

            if result.rows_affected() == 0 {
                error!(
                    "❌ Item {} not found in sub-order {}",
                    update.item_id, req.vendor_order_id
                );
                return Err(RepositoryError::NotFound);
            }
        }

        let statuses = sqlx::query_scalar::<_, String>(
            "SELECT status FROM vendor_order_items WHERE vendor_order_id = $1",
        )
        .bind(req.vendor_order_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(RepositoryError::from)?
        .iter()
        .map(|status| {
            status
                .parse::<ItemStatus>()
                .map_err(|e| RepositoryError::Custom(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

        let vendor_status = derive_vendor_status(&statuses);

        let row = sqlx::query_as::<_, VendorOrderRow>(&format!(
            r#"
            UPDATE vendor_orders
            SET vendor_status = $2,
                updated_at = current_timestamp
            WHERE vendor_order_id = $1
            RETURNING {VENDOR_ORDER_COLUMNS}
            "#
        ))
        .bind(req.vendor_order_id)
        .bind(vendor_status.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::from)?
        .ok_or(RepositoryError::NotFound)?;

        let vendor_order = hydrate_vendor_orders(&mut tx, vec![row])
            .await?
            .pop()
            .ok_or(RepositoryError::NotFound)?;

        tx.commit().await.map_err(|e| {
            error!(
                "❌ Failed to commit item statuses for sub-order {}: {:?}",
                req.vendor_order_id, e
            );
            RepositoryError::from(e)
        })?;

        info!(
            "🔄 Sub-order {} updated: {} item(s), vendor status {}",
            req.vendor_order_id,
            req.updates.len(),
            vendor_status
        );

        Ok(vendor_order)
    }
}
