//! Admin user management commands.

use tracing::info;

use ruouvan_core::{Email, Role};
use ruouvan_storefront::db::users::UserRepository;
use ruouvan_storefront::services::AuthService;

/// Create an admin user, or promote an existing account to admin.
///
/// An account that already exists for the email is promoted in place; no
/// password is needed then. For a fresh account the password comes from
/// `--password` or the `RUOUVAN_ADMIN_PASSWORD` environment variable.
///
/// # Errors
///
/// Returns an error if the database is unreachable, the password is
/// missing for a new account, or validation fails.
pub async fn create_user(
    email: &str,
    name: &str,
    password: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    let users = UserRepository::new(&pool);

    let parsed: Email = email.parse()?;
    if let Some(existing) = users.get_by_email(&parsed).await? {
        users.set_role(existing.id, Role::Admin).await?;
        info!(user_id = %existing.id, email = %existing.email, "Existing account promoted to admin");
        return Ok(());
    }

    let password = match password {
        Some(p) => p.to_owned(),
        None => std::env::var("RUOUVAN_ADMIN_PASSWORD")
            .map_err(|_| "password required: pass --password or set RUOUVAN_ADMIN_PASSWORD")?,
    };

    let auth = AuthService::new(&pool);
    let user = auth.register(name, email, &password).await?;
    users.set_role(user.id, Role::Admin).await?;
    info!(user_id = %user.id, email = %user.email, "Admin user created");

    Ok(())
}
