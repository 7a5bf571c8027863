use sea_orm::entity::prelude::*;

/// The `promotions` table. The category is stored as its upper-case member
/// name; `created_at`/`last_updated` are audit columns maintained by the
/// repository and never exposed on the wire.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "promotions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category: String,
    pub discount_x: i32,
    pub discount_y: Option<i32>,
    pub product_id: i32,
    pub description: String,
    pub validity: bool,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: DateTimeUtc,
    pub last_updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
