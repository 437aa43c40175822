use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::{
    entity,
    error::ProductResult,
    models::{NewProduct, Product, ProductChanges, ProductFilter},
    pagination::{PageRequest, ProductPage},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: ProductFilter, page: Option<PageRequest>) -> ProductResult<ProductPage> {
        let mut query = entity::Entity::find().filter(entity::Column::Price.gte(filter.min_price));

        if let Some(max_price) = filter.max_price {
            query = query.filter(entity::Column::Price.lte(max_price));
        }
        if let Some(name) = filter.name {
            query = query.filter(entity::Column::Name.eq(name));
        }

        let query = query.order_by_asc(entity::Column::Id);

        let Some(request) = page else {
            let models = query.all(&self.db).await?;
            return Ok(ProductPage {
                total: models.len() as u64,
                number: 1,
                items: models.into_iter().map(Into::into).collect(),
            });
        };

        let total = query.clone().count(&self.db).await?;
        let number = request.resolve(total)?;

        let models = query
            .offset(request.offset(number))
            .limit(request.size)
            .all(&self.db)
            .await?;

        tracing::debug!(total, page = number, "Listed products");
        Ok(ProductPage {
            total,
            number,
            items: models.into_iter().map(Into::into).collect(),
        })
    }

    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> ProductResult<Option<Product>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let updated_at = refreshed_updated_at(model.created_at);
        let mut active_model: entity::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active_model.name = Set(name);
        }
        if let Some(description) = changes.description {
            active_model.description = Set(description);
        }
        if let Some(price) = changes.price {
            active_model.price = Set(price);
        }
        active_model.updated_at = Set(updated_at);

        let model = active_model.update(&self.db).await?;

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(deleted)
    }
}

/// Current time, never earlier than `created_at`
fn refreshed_updated_at(created_at: DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    let now: DateTimeWithTimeZone = Utc::now().into();
    now.max(created_at)
}
