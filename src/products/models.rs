use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::query::{QueryValidator, SortOrder};

/// A retail product in the storefront catalog
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Leather Jumping Saddle")]
    pub name: String,
    #[schema(example = "tack")]
    pub category: String,
    #[schema(value_type = f64, example = 1250.00)]
    pub price: Decimal,
    #[schema(example = "Close-contact saddle for show jumping")]
    pub description: String,
    pub image_url: Option<String>,
    #[schema(example = true)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Leather Jumping Saddle")]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "tack")]
    pub category: String,
    #[validate(custom = "crate::validation::validate_positive_price")]
    #[schema(value_type = f64, example = 1250.00)]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Payload for partially updating a product
/// All fields are optional; omitted fields keep their current value.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[validate(custom = "crate::validation::validate_positive_price")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Raw query parameters for the product list endpoint
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Whitelisted product sort fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    Price,
    Created,
}

impl ProductSortField {
    pub fn column(&self) -> &'static str {
        match self {
            ProductSortField::Price => "price",
            ProductSortField::Created => "created_at",
        }
    }
}

/// Validated and normalized product list filters
#[derive(Debug)]
pub struct ProductFilters {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<(ProductSortField, SortOrder)>,
    pub page: u32,
    pub limit: u32,
}

impl ProductFilters {
    /// Validate and normalize raw query parameters
    pub fn from_query(query: ProductQuery) -> Result<Self, crate::query::QueryError> {
        let search = QueryValidator::normalize_string(query.search);
        let category = QueryValidator::normalize_string(query.category);

        QueryValidator::validate_range(query.min_price, query.max_price, "min_price", "max_price")?;

        let sort = match QueryValidator::normalize_string(query.sort) {
            None => None,
            Some(field) => {
                let field = match field.to_lowercase().as_str() {
                    "price" => ProductSortField::Price,
                    "created" => ProductSortField::Created,
                    other => {
                        return Err(crate::query::QueryError {
                            message: format!(
                                "Invalid sort field '{}'. Must be 'price' or 'created'",
                                other
                            ),
                        })
                    }
                };
                // Newest-first is the natural default for created_at
                let default_order = match field {
                    ProductSortField::Price => SortOrder::Asc,
                    ProductSortField::Created => SortOrder::Desc,
                };
                let order = QueryValidator::parse_sort_order(query.order, default_order)?;
                Some((field, order))
            }
        };

        let (page, limit) = QueryValidator::validate_pagination(&crate::query::PageParams {
            page: query.page,
            limit: query.limit,
        })?;

        Ok(Self {
            search,
            category,
            min_price: query.min_price,
            max_price: query.max_price,
            sort,
            page,
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn empty_query() -> ProductQuery {
        ProductQuery {
            search: None,
            category: None,
            min_price: None,
            max_price: None,
            sort: None,
            order: None,
            page: None,
            limit: None,
        }
    }

    #[test]
    fn test_filters_defaults() {
        let filters = ProductFilters::from_query(empty_query()).unwrap();
        assert_eq!(filters.page, 1);
        assert_eq!(filters.limit, 10);
        assert!(filters.sort.is_none());
    }

    #[test]
    fn test_filters_sort_defaults_per_field() {
        let mut query = empty_query();
        query.sort = Some("price".to_string());
        let filters = ProductFilters::from_query(query).unwrap();
        assert_eq!(filters.sort, Some((ProductSortField::Price, SortOrder::Asc)));

        let mut query = empty_query();
        query.sort = Some("created".to_string());
        let filters = ProductFilters::from_query(query).unwrap();
        assert_eq!(filters.sort, Some((ProductSortField::Created, SortOrder::Desc)));
    }

    #[test]
    fn test_filters_reject_bad_sort_and_range() {
        let mut query = empty_query();
        query.sort = Some("name".to_string());
        assert!(ProductFilters::from_query(query).is_err());

        let mut query = empty_query();
        query.min_price = Some(100.0);
        query.max_price = Some(10.0);
        assert!(ProductFilters::from_query(query).is_err());
    }

    #[test]
    fn test_create_product_validation() {
        let valid = CreateProduct {
            name: "Bridle".to_string(),
            category: "tack".to_string(),
            price: dec!(89.90),
            description: String::new(),
            image_url: None,
            is_active: true,
        };
        assert!(validator::Validate::validate(&valid).is_ok());

        let free = CreateProduct {
            price: dec!(0),
            ..valid.clone()
        };
        assert!(validator::Validate::validate(&free).is_err());

        let nameless = CreateProduct {
            name: String::new(),
            ..valid
        };
        assert!(validator::Validate::validate(&nameless).is_err());
    }

    #[test]
    fn test_update_product_partial_deserialization() {
        let update: UpdateProduct = serde_json::from_str(r#"{"price": 42.00}"#).unwrap();
        assert_eq!(update.price, Some(dec!(42.00)));
        assert!(update.name.is_none());
        assert!(update.is_active.is_none());
    }
}
