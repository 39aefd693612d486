use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::products::models::{CreateProduct, Product, ProductFilters, UpdateProduct};
use crate::query::SqlQueryBuilder;

const PRODUCT_COLUMNS: &str =
    "id, name, category, price, description, image_url, is_active, created_at, updated_at";

/// Repository for product catalog operations
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new ProductRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List products applying search, category, price range, sort and
    /// pagination through the shared query builder
    pub async fn list(&self, filters: &ProductFilters) -> Result<Vec<Product>, ApiError> {
        let mut builder = SqlQueryBuilder::new("products");

        if let Some(ref search) = filters.search {
            builder.add_search_filter("name", search);
        }
        if let Some(ref category) = filters.category {
            builder.add_text_filter("category", category);
        }
        builder.add_numeric_range("price", filters.min_price, filters.max_price);

        if let Some((field, order)) = filters.sort {
            builder.set_sort(field.column(), order);
        }
        builder.set_pagination(filters.page, filters.limit);

        let (query_str, params) = builder.build();
        let mut query = sqlx::query_as::<_, Product>(&query_str);
        for param in params {
            query = query.bind(param);
        }

        let products = query.fetch_all(&self.pool).await?;
        Ok(products)
    }

    /// Find a product by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Check whether a product name is already taken, optionally excluding
    /// the product being updated
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, ApiError> {
        let exists: Option<bool> = match exclude_id {
            Some(id) => {
                sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM products WHERE name = $1 AND id != $2)",
                )
                .bind(name)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE name = $1)")
                    .bind(name)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(exists.unwrap_or(false))
    }

    /// Insert a new product
    pub async fn create(&self, payload: &CreateProduct) -> Result<Product, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, category, price, description, image_url, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(&payload.name)
        .bind(&payload.category)
        .bind(payload.price)
        .bind(&payload.description)
        .bind(&payload.image_url)
        .bind(payload.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Apply a partial update inside a transaction
    ///
    /// The existing row is read first so omitted fields keep their value;
    /// a name change is checked for duplicates within the same transaction.
    pub async fn update(&self, id: i32, payload: UpdateProduct) -> Result<Product, ApiError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Product".to_string(),
            id: id.to_string(),
        })?;

        if let Some(ref new_name) = payload.name {
            if new_name != &existing.name {
                let duplicate: Option<bool> = sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM products WHERE name = $1 AND id != $2)",
                )
                .bind(new_name)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

                if duplicate.unwrap_or(false) {
                    return Err(ApiError::Conflict {
                        message: format!("Product with name '{}' already exists", new_name),
                    });
                }
            }
        }

        let price: Decimal = payload.price.unwrap_or(existing.price);
        let updated = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products \
             SET name = $1, category = $2, price = $3, description = $4, image_url = $5, \
                 is_active = $6, updated_at = NOW() \
             WHERE id = $7 \
             RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(payload.name.unwrap_or(existing.name))
        .bind(payload.category.unwrap_or(existing.category))
        .bind(price)
        .bind(payload.description.unwrap_or(existing.description))
        .bind(payload.image_url.or(existing.image_url))
        .bind(payload.is_active.unwrap_or(existing.is_active))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a product by ID
    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound {
                resource: "Product".to_string(),
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
