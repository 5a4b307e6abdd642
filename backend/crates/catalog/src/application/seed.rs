//! Bootstrap user
//!
//! Makes sure a known account exists so a fresh deployment can obtain a
//! token. Runs once at startup.

use auth::UserLookup;

use crate::application::crud::CrudUseCase;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::CrudRepository;
use crate::error::CatalogResult;

/// Create `input` unless its email is already registered.
///
/// Returns true when a user was created.
pub async fn ensure_user<L, Repo>(
    lookup: &L,
    users: &CrudUseCase<User, Repo>,
    input: NewUser,
) -> CatalogResult<bool>
where
    L: UserLookup + Sync,
    Repo: CrudRepository<User> + Sync,
{
    if lookup.find_by_email(&input.email).await?.is_some() {
        tracing::debug!(email = %input.email, "Seed user already present");
        return Ok(false);
    }

    let user = users.create(input).await?;
    tracing::info!(user_id = %user.id, email = %user.email, "Seed user created");

    Ok(true)
}
