use crate::model::order::Order;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_by_id(&self, order_id: i32) -> Result<Option<Order>, RepositoryError>;
    /// Newest first.
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError>;
}
