//! Resource abstraction
//!
//! A resource is an entity type served by the generic CRUD component. Each
//! one describes its request bodies, how they validate, how an entity is
//! built and changed, and what the client sees.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::Id;
use platform::password::{Bcrypt, CredentialVerifier, DEFAULT_COST};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CatalogResult;

pub trait Resource: Clone + Send + Sync + 'static {
    /// Id marker, see [`kernel::id::markers`]
    type Marker: 'static;

    /// `POST` body as decoded from JSON
    type CreateBody: DeserializeOwned + Send + 'static;
    /// `PUT` body as decoded from JSON
    type UpdateBody: DeserializeOwned + Send + 'static;

    /// Validated create input
    type Create: Send;
    /// Validated update input
    type Update: Send;

    /// Client-facing representation
    type View: Serialize + Send;

    /// Singular name used in messages and logs
    const NAME: &'static str;

    /// Route prefix, e.g. `/album`
    const PATH: &'static str;

    /// Message returned when a unique key is already taken
    const CONFLICT_MESSAGE: &'static str = "resource already exists";

    /// Collects every field error before failing.
    fn validate_create(body: Self::CreateBody) -> Result<Self::Create, Vec<String>>;

    fn validate_update(body: Self::UpdateBody) -> Result<Self::Update, Vec<String>>;

    fn build(input: Self::Create, ctx: &BuildContext, now: DateTime<Utc>) -> CatalogResult<Self>;

    fn apply(&mut self, input: Self::Update, now: DateTime<Utc>);

    fn id(&self) -> Id<Self::Marker>;

    fn updated_at(&self) -> DateTime<Utc>;

    fn view(&self) -> Self::View;

    /// Value that must be unique across all entities of this type
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

/// Services needed while building entities
#[derive(Clone)]
pub struct BuildContext {
    pub verifier: Arc<dyn CredentialVerifier>,
    pub bcrypt_cost: u32,
}

impl BuildContext {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, bcrypt_cost: u32) -> Self {
        Self {
            verifier,
            bcrypt_cost,
        }
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::new(Arc::new(Bcrypt), DEFAULT_COST)
    }
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}
