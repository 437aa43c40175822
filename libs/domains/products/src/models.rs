use axum_helpers::FieldErrors;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, ToSchema};

use crate::schema::parse_decimal;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    #[schema(example = "Test product")]
    pub name: String,
    #[schema(example = "Test product description")]
    pub description: Option<String>,
    /// Always rendered with two fractional digits
    #[serde(serialize_with = "serialize_price")]
    #[schema(value_type = String, example = "650.00")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn serialize_price<S: Serializer>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{price:.2}"))
}

impl Product {
    /// Apply a set of changes and refresh `updated_at`
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        self.updated_at = Utc::now().max(self.created_at);
    }
}

/// Validated input for creating a product
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

/// Validated changes for an existing product; `None` leaves a field untouched.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
}

/// Request body accepted by create and update endpoints (documentation only;
/// bodies are parsed field by field).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductRequest {
    #[schema(example = "Test product", min_length = 3, max_length = 50)]
    pub name: String,
    #[schema(example = "Test product description", min_length = 10)]
    pub description: Option<String>,
    /// Number or numeric string, more than 500, at most 10 digits and 2 decimals
    #[schema(value_type = String, example = "650.00")]
    pub price: String,
}

/// Query parameters for listing products
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// Exact, case-sensitive name match
    pub name: Option<String>,
    /// Inclusive lower price bound (default 0)
    pub min_price: Option<String>,
    /// Inclusive upper price bound (default unbounded)
    pub max_price: Option<String>,
    /// Page number or `last`
    pub page: Option<String>,
    /// Items per page, capped by the configured maximum
    pub page_size: Option<String>,
}

impl ListProductsParams {
    /// Collect known keys from decoded query pairs; a repeated key keeps its last value
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut params.name,
                "min_price" => &mut params.min_price,
                "max_price" => &mut params.max_price,
                "page" => &mut params.page,
                "page_size" => &mut params.page_size,
                _ => continue,
            };
            *slot = Some(value.clone());
        }
        params
    }
}

/// Filter applied by repository `list` calls
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub min_price: Decimal,
    pub max_price: Option<Decimal>,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            name: None,
            min_price: Decimal::ZERO,
            max_price: None,
        }
    }
}

impl ProductFilter {
    /// Build a filter from raw query parameters.
    ///
    /// Empty `name` means no name filter. Empty bounds fall back to their
    /// defaults; anything else that is not a number is reported per bound.
    pub fn from_params(params: &ListProductsParams) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = params
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let min_price = parse_bound("min_price", params.min_price.as_deref(), &mut errors);
        let max_price = parse_bound("max_price", params.max_price.as_deref(), &mut errors);

        errors.into_result()?;

        Ok(Self {
            name,
            min_price: min_price.unwrap_or(Decimal::ZERO),
            max_price,
        })
    }

    pub fn matches(&self, product: &Product) -> bool {
        if product.price < self.min_price {
            return false;
        }
        if let Some(max_price) = self.max_price {
            if product.price > max_price {
                return false;
            }
        }
        match &self.name {
            Some(name) => &product.name == name,
            None => true,
        }
    }
}

fn parse_bound(field: &str, raw: Option<&str>, errors: &mut FieldErrors) -> Option<Decimal> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;
    let parsed = parse_decimal(raw);
    if parsed.is_none() {
        errors.add(field, "A valid number is required.");
    }
    parsed
}
