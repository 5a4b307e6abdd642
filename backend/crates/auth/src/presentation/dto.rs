//! API DTOs (Data Transfer Objects)

use std::fmt;

use kernel::email::Email;
use platform::password::ClearTextPassword;
use serde::{Deserialize, Serialize};

use crate::application::AuthenticateInput;
use crate::error::AuthError;

/// `POST /auth` body
///
/// Missing fields deserialize as empty so they are reported by validation
/// rather than by the JSON decoder.
#[derive(Deserialize)]
pub struct AuthenticateRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl AuthenticateRequest {
    /// Validate every field, collecting all messages before failing.
    pub fn into_input(self) -> Result<AuthenticateInput, AuthError> {
        let mut errors = Vec::new();

        let email = Email::new(self.email)
            .map_err(|e| errors.push(e.to_string()))
            .ok();
        let password = ClearTextPassword::new(self.password)
            .map_err(|e| errors.push(e.to_string()))
            .ok();

        match (email, password) {
            (Some(email), Some(password)) => Ok(AuthenticateInput { email, password }),
            _ => Err(AuthError::InvalidRequest(errors)),
        }
    }
}

impl fmt::Debug for AuthenticateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticateRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// `POST /auth` success body
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> AuthenticateRequest {
        AuthenticateRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        let input = request("ada@example.com", "analytical").into_input().unwrap();
        assert_eq!(input.email.as_str(), "ada@example.com");
        assert_eq!(input.password.expose(), "analytical");
    }

    #[test]
    fn test_all_errors_collected() {
        let err = request("", "short").into_input().unwrap_err();
        match err {
            AuthError::InvalidRequest(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("email"));
                assert!(errors[1].contains("at least 8"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: AuthenticateRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(req.into_input(), Err(AuthError::InvalidRequest(e)) if e.len() == 2));
    }

    #[test]
    fn test_debug_hides_password() {
        let output = format!("{:?}", request("ada@example.com", "analytical"));
        assert!(output.contains("ada@example.com"));
        assert!(!output.contains("analytical"));
    }
}
