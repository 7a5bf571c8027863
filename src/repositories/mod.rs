use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::models::{Promotion, PromotionFilter};

pub mod memory;
pub mod promotion_repository;

pub use memory::InMemoryPromotionRepository;
pub use promotion_repository::PromotionRepository;

/// Persistence port for promotions.
///
/// Handlers depend on this trait rather than on a concrete store, so the
/// production sea-orm repository and the in-memory fake are interchangeable.
#[async_trait]
pub trait PromotionStore: Send + Sync {
    /// Inserts a promotion and returns it with its store-assigned id. Any
    /// id already on the value is ignored.
    async fn create(&self, promotion: Promotion) -> Result<Promotion, ServiceError>;

    /// Persists changes to an existing promotion, which must carry an id.
    async fn update(&self, promotion: Promotion) -> Result<Promotion, ServiceError>;

    /// Removes a promotion. Deleting an absent id is not an error.
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;

    async fn find(&self, id: i32) -> Result<Option<Promotion>, ServiceError>;

    async fn all(&self) -> Result<Vec<Promotion>, ServiceError>;

    /// Returns the promotions matching a single resolved filter.
    async fn find_by(&self, filter: PromotionFilter) -> Result<Vec<Promotion>, ServiceError>;
}
