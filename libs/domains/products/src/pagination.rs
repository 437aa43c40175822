//! Page-number pagination for the product list.
//!
//! ```json
//! {
//!   "count": 12,
//!   "next": "http://localhost:8080/products/?page=3",
//!   "previous": "http://localhost:8080/products/",
//!   "results": [...]
//! }
//! ```

use axum::http::{HeaderMap, Uri, header};
use core_config::{ConfigError, FromEnv, env_parse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

const LAST_PAGE: &str = "last";
const PAGE_PARAM: &str = "page";

/// Page size limits for the product list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Items per page when the client does not ask; `0` turns pagination off
    pub page_size: u64,
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            max_page_size: 15,
        }
    }
}

impl FromEnv for PaginationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let page_size: u64 = env_parse("PRODUCTS_PAGE_SIZE", "5")?;
        let max_page_size: u64 = env_parse("PRODUCTS_MAX_PAGE_SIZE", "15")?;

        if page_size > max_page_size {
            return Err(ConfigError::Invalid {
                key: "PRODUCTS_PAGE_SIZE".to_string(),
                reason: format!("{page_size} exceeds PRODUCTS_MAX_PAGE_SIZE={max_page_size}"),
            });
        }

        Ok(Self {
            page_size,
            max_page_size,
        })
    }
}

impl PaginationConfig {
    pub fn is_enabled(&self) -> bool {
        self.page_size > 0
    }

    /// Requested size, clamped to the maximum.
    ///
    /// Anything that is not a positive integer falls back to the default.
    pub fn page_size(&self, requested: Option<&str>) -> u64 {
        requested
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|size| *size > 0)
            .map(|size| size.min(self.max_page_size))
            .unwrap_or(self.page_size)
    }

    /// `None` when pagination is disabled
    pub fn page_request(
        &self,
        page: Option<&str>,
        page_size: Option<&str>,
    ) -> ProductResult<Option<PageRequest>> {
        if !self.is_enabled() {
            return Ok(None);
        }
        Ok(Some(PageRequest {
            page: PageNumber::parse(page)?,
            size: self.page_size(page_size),
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    /// 1-based
    Number(u64),
    Last,
}

impl PageNumber {
    /// Missing or empty means the first page; accepts a positive integer or `last`
    pub fn parse(raw: Option<&str>) -> ProductResult<Self> {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(PageNumber::Number(1));
        };
        if raw == LAST_PAGE {
            return Ok(PageNumber::Last);
        }
        match raw.parse::<u64>() {
            Ok(n) if n >= 1 => Ok(PageNumber::Number(n)),
            _ => Err(ProductError::InvalidPage),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: PageNumber,
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page: PageNumber::Number(page),
            size,
        }
    }

    /// Page count for `total` items; an empty result still has one page
    pub fn num_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.size.max(1)).max(1)
    }

    /// Concrete page number, or `InvalidPage` when past the end
    pub fn resolve(&self, total: u64) -> ProductResult<u64> {
        let last = self.num_pages(total);
        match self.page {
            PageNumber::Last => Ok(last),
            PageNumber::Number(n) if n <= last => Ok(n),
            PageNumber::Number(_) => Err(ProductError::InvalidPage),
        }
    }

    pub fn offset(&self, number: u64) -> u64 {
        (number - 1) * self.size
    }
}

/// One page of products as returned by a repository
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    /// Matches across all pages
    pub total: u64,
    /// Resolved page number, `1` when unpaginated
    pub number: u64,
    pub items: Vec<Product>,
}

/// Absolute request URL used to build `next`/`previous` links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    base: String,
    query: Vec<(String, String)>,
}

impl PageUrl {
    /// Scheme from `X-Forwarded-Proto` (default `http`), authority from `Host`.
    ///
    /// `query` holds the decoded query pairs in request order.
    pub fn from_request(headers: &HeaderMap, uri: &Uri, query: &[(String, String)]) -> Self {
        let scheme = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .or_else(|| uri.scheme_str())
            .unwrap_or("http");
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| uri.authority().map(|a| a.as_str()))
            .unwrap_or("localhost");

        Self {
            base: format!("{scheme}://{host}{}", uri.path()),
            query: query.to_vec(),
        }
    }

    /// Link to `page`; page 1 drops the parameter
    pub fn page_link(&self, page: u64) -> String {
        let mut query: Vec<(String, String)> = self
            .query
            .iter()
            .filter(|(key, _)| key != PAGE_PARAM)
            .cloned()
            .collect();
        if page > 1 {
            query.push((PAGE_PARAM.to_string(), page.to_string()));
        }
        query.sort_by(|a, b| a.0.cmp(&b.0));

        if query.is_empty() {
            return self.base.clone();
        }
        let encoded: Vec<String> = query
            .iter()
            .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
            .collect();
        format!("{}?{}", self.base, encoded.join("&"))
    }
}

fn encode(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

/// Paginated list envelope
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedProducts {
    pub count: u64,
    #[schema(example = "http://localhost:8080/products/?page=2")]
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<Product>,
}

impl PaginatedProducts {
    pub fn new(page: ProductPage, request: &PageRequest, url: &PageUrl) -> Self {
        let has_next = page.number < request.num_pages(page.total);
        Self {
            count: page.total,
            next: has_next.then(|| url.page_link(page.number + 1)),
            previous: (page.number > 1).then(|| url.page_link(page.number - 1)),
            results: page.items,
        }
    }
}

/// List response: the envelope, or a bare array when pagination is off
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ProductList {
    Paginated(PaginatedProducts),
    Plain(Vec<Product>),
}
