//! Product catalog route handlers.
//!
//! Listing and detail are public; create/update/delete require the admin
//! role, enforced here by the [`RequireAdmin`] extractor regardless of
//! anything the client claims.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use ruouvan_core::{ProductId, Vnd};

use crate::db::products::{ProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Product, ProductInput};
use crate::state::AppState;

/// Catalog listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    /// Wine type filter.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    pub packaging: Option<String>,
    /// Upper price bound; accepts grouped-digit strings.
    pub max_price: Option<String>,
    /// Text search over name and description.
    pub q: Option<String>,
}

impl ProductListQuery {
    fn into_filter(self) -> Result<ProductFilter> {
        let max_price = self
            .max_price
            .map(|raw| {
                Vnd::parse(&raw)
                    .map_err(|e| AppError::BadRequest(format!("invalid max_price: {e}")))
            })
            .transpose()?;

        Ok(ProductFilter {
            kind: self.kind,
            category: self.category,
            packaging: self.packaging,
            max_price,
            search: self.q,
        })
    }
}

/// List the catalog, optionally filtered.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = query.into_filter()?;
    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(products))
}

/// Fetch one product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// Create a product (admin).
#[instrument(skip(admin, state, input))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<impl IntoResponse> {
    let product = ProductRepository::new(state.pool()).create(&input).await?;

    tracing::info!(product_id = %product.id, admin = %admin.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's fields (admin).
#[instrument(skip(admin, state, input))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &input)
        .await?;

    tracing::info!(product_id = %product.id, admin = %admin.id, "Product updated");
    Ok(Json(product))
}

/// Delete a product (admin).
///
/// Existing order snapshots keep their copy of the product's fields.
#[instrument(skip(admin, state))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    tracing::info!(product_id = id, admin = %admin.id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
