use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductChanges, ProductFilter};
use crate::pagination::{PageRequest, ProductPage};

/// Repository trait for Product persistence
///
/// Listing is ordered by id ascending. Lookups that miss return `None` or
/// `false`; turning that into a 404 is the service's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Matching products, one page at a time when `page` is set
    async fn list(&self, filter: ProductFilter, page: Option<PageRequest>) -> ProductResult<ProductPage>;

    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    async fn update(&self, id: i64, changes: ProductChanges) -> ProductResult<Option<Product>>;

    async fn delete(&self, id: i64) -> ProductResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    products: BTreeMap<i64, Product>,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter, page: Option<PageRequest>) -> ProductResult<ProductPage> {
        let store = self.store.read().await;

        let matching: Vec<&Product> = store
            .products
            .values()
            .filter(|p| filter.matches(p))
            .collect();
        let total = matching.len() as u64;

        let Some(request) = page else {
            return Ok(ProductPage {
                total,
                number: 1,
                items: matching.into_iter().cloned().collect(),
            });
        };

        let number = request.resolve(total)?;
        let items = matching
            .into_iter()
            .skip(request.offset(number) as usize)
            .take(request.size as usize)
            .cloned()
            .collect();

        Ok(ProductPage {
            total,
            number,
            items,
        })
    }

    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let now = Utc::now();
        let product = Product {
            id: store.last_id,
            name: input.name,
            description: input.description,
            price: input.price,
            created_at: now,
            updated_at: now,
        };
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> ProductResult<Option<Product>> {
        let mut store = self.store.write().await;

        let Some(product) = store.products.get_mut(&id) else {
            return Ok(None);
        };
        product.apply(changes);

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        if store.products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
