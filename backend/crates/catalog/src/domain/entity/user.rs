//! User entity
//!
//! The stored account behind both `/user` and the credential lookup used by
//! `POST /auth`.

use chrono::{DateTime, Utc};
use kernel::email::Email;
use kernel::id::{UserId, markers};
use platform::password::{ClearTextPassword, HashedPassword};
use serde::{Deserialize, Serialize};

use crate::domain::resource::{BuildContext, Resource};
use crate::error::CatalogResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password: HashedPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What clients see: everything but the hash
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `POST /user` body
#[derive(Deserialize)]
pub struct CreateUserBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `PUT /user/{id}` body. The password is not changed here.
#[derive(Debug, Deserialize)]
pub struct UpdateUserBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password: ClearTextPassword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub name: String,
    pub email: Email,
}

fn validate_name(raw: &str, errors: &mut Vec<String>) -> Option<String> {
    let name = raw.trim();
    if name.is_empty() {
        errors.push("name is required".to_string());
        return None;
    }
    Some(name.to_string())
}

fn validate_email(raw: String, errors: &mut Vec<String>) -> Option<Email> {
    Email::new(raw).map_err(|e| errors.push(e.to_string())).ok()
}

impl Resource for User {
    type Marker = markers::User;
    type CreateBody = CreateUserBody;
    type UpdateBody = UpdateUserBody;
    type Create = NewUser;
    type Update = UserChanges;
    type View = UserView;

    const NAME: &'static str = "user";
    const PATH: &'static str = "/user";
    const CONFLICT_MESSAGE: &'static str = "this email already exists";

    fn validate_create(body: CreateUserBody) -> Result<NewUser, Vec<String>> {
        let mut errors = Vec::new();

        let name = validate_name(&body.name, &mut errors);
        let email = validate_email(body.email, &mut errors);
        let password = ClearTextPassword::new(body.password)
            .map_err(|e| errors.push(e.to_string()))
            .ok();

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => Ok(NewUser {
                name,
                email,
                password,
            }),
            _ => Err(errors),
        }
    }

    fn validate_update(body: UpdateUserBody) -> Result<UserChanges, Vec<String>> {
        let mut errors = Vec::new();

        let name = validate_name(&body.name, &mut errors);
        let email = validate_email(body.email, &mut errors);

        match (name, email) {
            (Some(name), Some(email)) => Ok(UserChanges { name, email }),
            _ => Err(errors),
        }
    }

    fn build(input: NewUser, ctx: &BuildContext, now: DateTime<Utc>) -> CatalogResult<Self> {
        let password = ctx.verifier.hash(&input.password, ctx.bcrypt_cost)?;

        Ok(Self {
            id: UserId::new(),
            name: input.name,
            email: input.email,
            password,
            created_at: now,
            updated_at: now,
        })
    }

    fn apply(&mut self, input: UserChanges, now: DateTime<Utc>) {
        self.name = input.name;
        self.email = input.email;
        self.updated_at = now;
    }

    fn id(&self) -> UserId {
        self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn view(&self) -> UserView {
        UserView {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn unique_key(&self) -> Option<&str> {
        Some(self.email.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use platform::password::{Bcrypt, CredentialVerifier};

    use super::*;

    fn create_body(name: &str, email: &str, password: &str) -> CreateUserBody {
        CreateUserBody {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn ctx() -> BuildContext {
        BuildContext::new(Arc::new(Bcrypt), 4)
    }

    #[test]
    fn test_build_hashes_password() {
        let input = User::validate_create(create_body("Ada", "ada@example.com", "analytical"))
            .unwrap();
        let user = User::build(input, &ctx(), Utc::now()).unwrap();

        assert!(user.password.as_str().starts_with("$2b$04$"));
        assert!(Bcrypt.verify(
            &ClearTextPassword::new_unchecked("analytical".into()),
            &user.password
        ));
    }

    #[test]
    fn test_default_context_hashes_at_cost_ten() {
        let input = User::validate_create(create_body("Ada", "ada@example.com", "analytical"))
            .unwrap();
        let user = User::build(input, &BuildContext::default(), Utc::now()).unwrap();

        assert!(user.password.as_str().starts_with("$2b$10$"));
    }

    #[test]
    fn test_create_errors_collected() {
        let errors = User::validate_create(create_body("", "nope", "short")).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "name is required".to_string(),
                "email must be a valid email address".to_string(),
                "password must be at least 8 characters".to_string(),
            ]
        );
    }

    #[test]
    fn test_update_leaves_password() {
        let input = User::validate_create(create_body("Ada", "ada@example.com", "analytical"))
            .unwrap();
        let mut user = User::build(input, &ctx(), Utc::now()).unwrap();
        let hash = user.password.clone();

        let changes = User::validate_update(UpdateUserBody {
            name: "Ada King".into(),
            email: "countess@example.com".into(),
        })
        .unwrap();
        user.apply(changes, Utc::now());

        assert_eq!(user.name, "Ada King");
        assert_eq!(user.email.as_str(), "countess@example.com");
        assert_eq!(user.password, hash);
        assert_eq!(user.unique_key(), Some("countess@example.com"));
    }

    #[test]
    fn test_view_omits_hash() {
        let input = User::validate_create(create_body("Ada", "ada@example.com", "analytical"))
            .unwrap();
        let user = User::build(input, &ctx(), Utc::now()).unwrap();

        let json = serde_json::to_value(user.view()).unwrap();
        assert_eq!(json["email"], "ada@example.com");
        assert!(json.get("password").is_none());
        assert!(!json.to_string().contains("$2b$"));
    }
}
