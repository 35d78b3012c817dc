//! Admin user management route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::users::UserRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::User;
use crate::state::AppState;

/// List all registered users (admin).
///
/// [`User`] carries no credentials, so nothing sensitive can serialize
/// out of this endpoint.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(users))
}
