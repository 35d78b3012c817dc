//! Product catalog repository.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use ruouvan_core::{ProductId, Vnd};

use super::RepositoryError;
use crate::models::{Product, ProductDetails, ProductInput};

const PRODUCT_COLUMNS: &str = "id, name, kind, category, packaging, volume, price, \
     original_price, discount, rating, image, description, details, story, created_at";

/// Optional filters for the catalog listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Wine type (e.g. "Rượu Dâu").
    pub kind: Option<String>,
    /// Price tier category (e.g. "Quà Tặng").
    pub category: Option<String>,
    /// Packaging (e.g. "Chai Thủy Tinh").
    pub packaging: Option<String>,
    /// Upper bound on price, inclusive.
    pub max_price: Option<Vnd>,
    /// Case-insensitive text search over name and description.
    pub search: Option<String>,
}

/// Raw row shape; converted into [`Product`] with validation.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    kind: String,
    category: String,
    packaging: String,
    volume: String,
    price: i64,
    original_price: Option<i64>,
    discount: Option<i32>,
    rating: f64,
    image: String,
    description: String,
    details: serde_json::Value,
    story: String,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, RepositoryError> {
        // The details blob must carry every field; reject partial records
        // rather than surfacing them with holes.
        let details: ProductDetails = serde_json::from_value(self.details).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid product details blob: {e}"))
        })?;

        if self.price < 0 {
            return Err(RepositoryError::DataCorruption(
                "negative price in database".to_owned(),
            ));
        }

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            kind: self.kind,
            category: self.category,
            packaging: self.packaging,
            volume: self.volume,
            price: Vnd::new(self.price),
            original_price: self.original_price.map(Vnd::new),
            discount: self.discount,
            rating: self.rating,
            image: self.image,
            description: self.description,
            details,
            story: self.story,
            created_at: self.created_at,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if any stored row is invalid.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE TRUE"
        ));

        if let Some(kind) = &filter.kind {
            query.push(" AND kind = ").push_bind(kind);
        }
        if let Some(category) = &filter.category {
            query.push(" AND category = ").push_bind(category);
        }
        if let Some(packaging) = &filter.packaging {
            query.push(" AND packaging = ").push_bind(packaging);
        }
        if let Some(max_price) = filter.max_price {
            query.push(" AND price <= ").push_bind(max_price.as_i64());
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            query
                .push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        query.push(" ORDER BY created_at DESC, id DESC");

        let rows = query
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if the stored row is invalid.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let details = serde_json::to_value(&input.details).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize details: {e}"))
        })?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products
                 (name, kind, category, packaging, volume, price, original_price,
                  discount, rating, image, description, details, story)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.kind)
        .bind(&input.category)
        .bind(&input.packaging)
        .bind(&input.volume)
        .bind(input.price.as_i64())
        .bind(input.original_price.map(|p| p.as_i64()))
        .bind(input.discount)
        .bind(input.rating)
        .bind(&input.image)
        .bind(&input.description)
        .bind(&details)
        .bind(&input.story)
        .fetch_one(self.pool)
        .await?;

        row.into_product()
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let details = serde_json::to_value(&input.details).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize details: {e}"))
        })?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products SET
                 name = $2, kind = $3, category = $4, packaging = $5, volume = $6,
                 price = $7, original_price = $8, discount = $9, rating = $10,
                 image = $11, description = $12, details = $13, story = $14
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(&input.name)
        .bind(&input.kind)
        .bind(&input.category)
        .bind(&input.packaging)
        .bind(&input.volume)
        .bind(input.price.as_i64())
        .bind(input.original_price.map(|p| p.as_i64()))
        .bind(input.discount)
        .bind(input.rating)
        .bind(&input.image)
        .bind(&input.description)
        .bind(&details)
        .bind(&input.story)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_product()
    }

    /// Delete a product.
    ///
    /// Order snapshots referencing the product are untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
