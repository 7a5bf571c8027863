use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use super::PromotionStore;
use crate::errors::ServiceError;
use crate::models::{Promotion, PromotionFilter};

/// In-memory promotion store honoring the same contract as the sea-orm
/// repository. Used by handler unit tests.
#[derive(Debug, Default)]
pub struct InMemoryPromotionRepository {
    rows: DashMap<i32, Promotion>,
    next_id: AtomicI32,
}

impl InMemoryPromotionRepository {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl PromotionStore for InMemoryPromotionRepository {
    async fn create(&self, mut promotion: Promotion) -> Result<Promotion, ServiceError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        promotion.id = Some(id);
        self.rows.insert(id, promotion.clone());
        Ok(promotion)
    }

    async fn update(&self, promotion: Promotion) -> Result<Promotion, ServiceError> {
        let id = promotion.id.ok_or_else(|| {
            ServiceError::ValidationError("Promotion must have an ID before updating".to_string())
        })?;
        self.rows.insert(id, promotion.clone());
        Ok(promotion)
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.rows.remove(&id);
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<Option<Promotion>, ServiceError> {
        Ok(self.rows.get(&id).map(|entry| entry.value().clone()))
    }

    async fn all(&self) -> Result<Vec<Promotion>, ServiceError> {
        let mut promotions: Vec<Promotion> =
            self.rows.iter().map(|entry| entry.value().clone()).collect();
        promotions.sort_by_key(|promotion| promotion.id);
        Ok(promotions)
    }

    async fn find_by(&self, filter: PromotionFilter) -> Result<Vec<Promotion>, ServiceError> {
        let mut promotions: Vec<Promotion> = self
            .rows
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        promotions.sort_by_key(|promotion| promotion.id);
        Ok(promotions)
    }
}
