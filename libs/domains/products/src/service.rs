use serde_json::{Map, Value};
use std::sync::Arc;
use validator::Validate;

use axum_helpers::FieldErrors;

use crate::error::{ProductError, ProductResult};
use crate::models::{ListProductsParams, NewProduct, Product, ProductChanges, ProductFilter};
use crate::pagination::{PageUrl, PaginatedProducts, PaginationConfig, ProductList};
use crate::repository::ProductRepository;
use crate::schema::{ProductInput, Requirement, parse_product};

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    pagination: PaginationConfig,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_pagination(repository, PaginationConfig::default())
    }

    pub fn with_pagination(repository: R, pagination: PaginationConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            pagination,
        }
    }

    /// List products matching the query, paginated unless disabled
    pub async fn list_products(&self, params: &ListProductsParams, url: &PageUrl) -> ProductResult<ProductList> {
        let filter = ProductFilter::from_params(params)?;
        let page_request = self
            .pagination
            .page_request(params.page.as_deref(), params.page_size.as_deref())?;

        let page = self.repository.list(filter, page_request).await?;

        Ok(match page_request {
            Some(request) => ProductList::Paginated(PaginatedProducts::new(page, &request, url)),
            None => ProductList::Plain(page.items),
        })
    }

    /// Validate a create payload and persist it; nothing is stored on failure
    pub async fn create_product(&self, payload: &Map<String, Value>) -> ProductResult<Product> {
        let input = clean(payload, Requirement::Full)?;
        let new_product = NewProduct::try_from(input)?;
        self.repository.create(new_product).await
    }

    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// PATCH (`Partial`) or PUT (`Full`); a missing product wins over a bad body
    pub async fn update_product(
        &self,
        id: i64,
        payload: &Map<String, Value>,
        requirement: Requirement,
    ) -> ProductResult<Product> {
        self.get_product(id).await?;

        let changes = ProductChanges::from(clean(payload, requirement)?);
        self.repository
            .update(id, changes)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }
}

/// Schema parsing followed by the business rules, all errors merged
fn clean(payload: &Map<String, Value>, requirement: Requirement) -> Result<ProductInput, FieldErrors> {
    let (input, mut errors) = parse_product(payload, requirement);
    if let Err(rule_errors) = input.validate() {
        errors.merge(FieldErrors::from(&rule_errors));
    }
    errors.into_result()?;
    Ok(input)
}

impl TryFrom<ProductInput> for NewProduct {
    type Error = FieldErrors;

    fn try_from(input: ProductInput) -> Result<Self, Self::Error> {
        match (input.name, input.price) {
            (Some(name), Some(price)) => Ok(NewProduct {
                name,
                description: input.description.flatten(),
                price,
            }),
            (name, price) => {
                let mut errors = FieldErrors::new();
                if name.is_none() {
                    errors.add("name", "This field is required.");
                }
                if price.is_none() {
                    errors.add("price", "This field is required.");
                }
                Err(errors)
            }
        }
    }
}

impl From<ProductInput> for ProductChanges {
    fn from(input: ProductInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            price: input.price,
        }
    }
}
