use crate::{abstract_trait::listing::ListingQueryRepositoryTrait, model::listing::Listing};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ListingQueryRepository {
    db: ConnectionPool,
}

impl ListingQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ListingQueryRepositoryTrait for ListingQueryRepository {
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Listing>, RepositoryError> {
        info!("🔍 Resolving {} listing(s)", ids.len());

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let listings = sqlx::query_as::<_, Listing>(
            r#"
            SELECT listing_id, vendor_id, title, price, stock, is_active, created_at, updated_at
            FROM listings
            WHERE listing_id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to resolve listings {:?}: {:?}", ids, e);
            RepositoryError::from(e)
        })?;

        Ok(listings)
    }

    async fn count_by_vendor(&self, vendor_id: i32) -> Result<(i64, i64), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let counts = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COUNT(*)::BIGINT,
                COUNT(*) FILTER (WHERE is_active)::BIGINT
            FROM listings
            WHERE vendor_id = $1
            "#,
        )
        .bind(vendor_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to count listings for vendor {}: {:?}", vendor_id, e);
            RepositoryError::from(e)
        })?;

        Ok(counts)
    }
}
