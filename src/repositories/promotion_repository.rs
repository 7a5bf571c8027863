use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{error, info};

use super::PromotionStore;
use crate::entities::promotion::{self, Column, Entity as PromotionEntity};
use crate::errors::ServiceError;
use crate::models::{Category, Promotion, PromotionFilter};

/// Sea-ORM backed implementation of the promotion store.
///
/// Write failures (create/update/delete) are reported as validation
/// failures after the statement rolls back; read failures surface as
/// database errors.
#[derive(Clone)]
pub struct PromotionRepository {
    db: Arc<DatabaseConnection>,
}

impl PromotionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_domain(row: promotion::Model) -> Result<Promotion, ServiceError> {
        let category = Category::parse(&row.category).map_err(|_| {
            ServiceError::db_error(format!(
                "promotion {} has unknown stored category '{}'",
                row.id, row.category
            ))
        })?;
        Ok(Promotion {
            id: Some(row.id),
            name: row.name,
            category,
            discount_x: row.discount_x,
            discount_y: row.discount_y,
            product_id: row.product_id,
            description: row.description,
            validity: row.validity,
            start_date: row.start_date,
            end_date: row.end_date,
        })
    }

    fn apply_fields(model: &mut promotion::ActiveModel, promotion: &Promotion) {
        model.name = Set(promotion.name.clone());
        model.category = Set(promotion.category.to_string());
        model.discount_x = Set(promotion.discount_x);
        model.discount_y = Set(promotion.discount_y);
        model.product_id = Set(promotion.product_id);
        model.description = Set(promotion.description.clone());
        model.validity = Set(promotion.validity);
        model.start_date = Set(promotion.start_date);
        model.end_date = Set(promotion.end_date);
        model.last_updated = Set(Utc::now());
    }
}

#[async_trait]
impl PromotionStore for PromotionRepository {
    async fn create(&self, promotion: Promotion) -> Result<Promotion, ServiceError> {
        info!("Creating promotion '{}'", promotion.name);
        // id stays NotSet so the database assigns it
        let mut model = promotion::ActiveModel {
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        Self::apply_fields(&mut model, &promotion);

        let row = model.insert(&*self.db).await.map_err(|err| {
            error!("Error creating promotion record: {}", err);
            ServiceError::ValidationError(format!("Error creating record: {err}"))
        })?;
        Self::to_domain(row)
    }

    async fn update(&self, promotion: Promotion) -> Result<Promotion, ServiceError> {
        let id = promotion.id.ok_or_else(|| {
            ServiceError::ValidationError("Promotion must have an ID before updating".to_string())
        })?;
        info!("Saving promotion [{}]", id);

        let existing = PromotionEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("promotion with id '{id}' was not found"))
            })?;

        let mut model: promotion::ActiveModel = existing.into();
        Self::apply_fields(&mut model, &promotion);

        let row = model.update(&*self.db).await.map_err(|err| {
            error!("Error updating promotion record [{}]: {}", id, err);
            ServiceError::ValidationError(format!("Error updating record: {err}"))
        })?;
        Self::to_domain(row)
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        info!("Deleting promotion [{}]", id);
        PromotionEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(|err| {
                error!("Error deleting promotion record [{}]: {}", id, err);
                ServiceError::ValidationError(format!("Error deleting record: {err}"))
            })?;
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<Option<Promotion>, ServiceError> {
        PromotionEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Self::to_domain)
            .transpose()
    }

    async fn all(&self) -> Result<Vec<Promotion>, ServiceError> {
        let rows = PromotionEntity::find()
            .order_by_asc(Column::Id)
            .all(&*self.db)
            .await?;
        rows.into_iter().map(Self::to_domain).collect()
    }

    async fn find_by(&self, filter: PromotionFilter) -> Result<Vec<Promotion>, ServiceError> {
        let query = match filter {
            PromotionFilter::All => PromotionEntity::find(),
            PromotionFilter::Name(name) => PromotionEntity::find().filter(Column::Name.eq(name)),
            PromotionFilter::Validity(validity) => {
                PromotionEntity::find().filter(Column::Validity.eq(validity))
            }
            PromotionFilter::Category(category) => {
                PromotionEntity::find().filter(Column::Category.eq(category.to_string()))
            }
            PromotionFilter::StartDate(date) => {
                PromotionEntity::find().filter(Column::StartDate.eq(date))
            }
            PromotionFilter::EndDate(date) => {
                PromotionEntity::find().filter(Column::EndDate.eq(date))
            }
            PromotionFilter::ProductId(product_id) => {
                PromotionEntity::find().filter(Column::ProductId.eq(product_id))
            }
        };
        let rows = query.order_by_asc(Column::Id).all(&*self.db).await?;
        rows.into_iter().map(Self::to_domain).collect()
    }
}
