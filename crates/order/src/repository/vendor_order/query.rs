use super::{VENDOR_ORDER_COLUMNS, hydrate_vendor_orders};
use crate::{
    abstract_trait::vendor_order::repository::VendorOrderQueryRepositoryTrait,
    domain::status::VendorOrderStatus,
    model::vendor_order::{VendorOrder, VendorOrderRow},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct VendorOrderQueryRepository {
    db: ConnectionPool,
}

impl VendorOrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VendorOrderQueryRepositoryTrait for VendorOrderQueryRepository {
    async fn find_by_id(
        &self,
        vendor_order_id: i32,
    ) -> Result<Option<VendorOrder>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let row = sqlx::query_as::<_, VendorOrderRow>(&format!(
            "SELECT {VENDOR_ORDER_COLUMNS} FROM vendor_orders WHERE vendor_order_id = $1"
        ))
        .bind(vendor_order_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch sub-order {}: {:?}", vendor_order_id, e);
            RepositoryError::from(e)
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut found = hydrate_vendor_orders(&mut conn, vec![row]).await?;
        Ok(found.pop())
    }

    async fn find_by_order(&self, order_id: i32) -> Result<Vec<VendorOrder>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let rows = sqlx::query_as::<_, VendorOrderRow>(&format!(
            "SELECT {VENDOR_ORDER_COLUMNS} FROM vendor_orders WHERE order_id = $1 ORDER BY vendor_order_id"
        ))
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch sub-orders of order {}: {:?}", order_id, e);
            RepositoryError::from(e)
        })?;

        hydrate_vendor_orders(&mut conn, rows).await
    }

    async fn find_by_vendor(&self, vendor_id: i32) -> Result<Vec<VendorOrder>, RepositoryError> {
        info!("📋 Fetching sub-orders for vendor {}", vendor_id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let rows = sqlx::query_as::<_, VendorOrderRow>(&format!(
            "SELECT {VENDOR_ORDER_COLUMNS} FROM vendor_orders WHERE vendor_id = $1 ORDER BY created_at DESC, vendor_order_id DESC"
        ))
        .bind(vendor_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch sub-orders of vendor {}: {:?}", vendor_id, e);
            RepositoryError::from(e)
        })?;

        hydrate_vendor_orders(&mut conn, rows).await
    }

    async fn count_pending_by_vendor(&self, vendor_id: i32) -> Result<i64, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM vendor_orders WHERE vendor_id = $1 AND vendor_status = $2",
        )
        .bind(vendor_id)
        .bind(VendorOrderStatus::Pending.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to count pending sub-orders of vendor {}: {:?}", vendor_id, e);
            RepositoryError::from(e)
        })?;

        Ok(count)
    }
}
