use crate::model::listing::Listing;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynListingQueryRepository = Arc<dyn ListingQueryRepositoryTrait + Send + Sync>;

/// Read-only view of the vendor catalogue.
#[async_trait]
pub trait ListingQueryRepositoryTrait {
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Listing>, RepositoryError>;
    /// Returns `(total, active)` listing counts for a vendor.
    async fn count_by_vendor(&self, vendor_id: i32) -> Result<(i64, i64), RepositoryError>;
}
