use super::{ORDER_COLUMNS, hydrate_orders};
use crate::{
    abstract_trait::order::repository::OrderQueryRepositoryTrait,
    model::order::{Order, OrderRow},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_by_id(&self, order_id: i32) -> Result<Option<Order>, RepositoryError> {
        info!("🆔 Fetching order by ID: {}", order_id);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {}: {:?}", order_id, e);
            RepositoryError::from(e)
        })?;

        let Some(row) = row else {
            info!("ℹ️ Order ID {} not found", order_id);
            return Ok(None);
        };

        let mut orders = hydrate_orders(&mut conn, vec![row]).await?;
        Ok(orders.pop())
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError> {
        info!("📋 Fetching orders for user {}", user_id);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC, order_id DESC"
        ))
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders for user {}: {:?}", user_id, e);
            RepositoryError::from(e)
        })?;

        let orders = hydrate_orders(&mut conn, rows).await?;

        info!("✅ Found {} orders for user {}", orders.len(), user_id);
        Ok(orders)
    }
}
