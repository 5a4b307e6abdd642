//! Unit tests for the auth crate

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kernel::email::Email;
    use kernel::id::UserId;
    use platform::password::{
        Bcrypt, ClearTextPassword, CredentialVerifier, HashedPassword, PasswordHashError,
    };

    use crate::application::{AuthConfig, TokenIssuer};
    use crate::domain::entity::credential::CredentialRecord;
    use crate::domain::repository::UserLookup;
    use crate::error::LookupError;

    pub const EMAIL: &str = "ada@example.com";
    pub const PASSWORD: &str = "correct-password";
    pub const SECRET: &str = "test-signing-secret";

    pub enum Outcome {
        Found(CredentialRecord),
        Missing,
        Broken,
    }

    pub struct StubLookup {
        outcome: Outcome,
        pub calls: AtomicUsize,
    }

    impl StubLookup {
        pub fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl UserLookup for StubLookup {
        async fn find_by_email(
            &self,
            email: &Email,
        ) -> Result<Option<CredentialRecord>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Outcome::Found(record) if record.email == *email => Ok(Some(record.clone())),
                Outcome::Found(_) | Outcome::Missing => Ok(None),
                Outcome::Broken => Err(LookupError::Unavailable("connection refused".into())),
            }
        }
    }

    /// Bcrypt that counts how often `verify` runs.
    #[derive(Default)]
    pub struct CountingVerifier {
        pub verifications: AtomicUsize,
    }

    impl CountingVerifier {
        pub fn count(&self) -> usize {
            self.verifications.load(Ordering::SeqCst)
        }
    }

    impl CredentialVerifier for CountingVerifier {
        fn hash(
            &self,
            password: &ClearTextPassword,
            cost: u32,
        ) -> Result<HashedPassword, PasswordHashError> {
            Bcrypt.hash(password, cost)
        }

        fn verify(&self, password: &ClearTextPassword, hash: &HashedPassword) -> bool {
            self.verifications.fetch_add(1, Ordering::SeqCst);
            Bcrypt.verify(password, hash)
        }
    }

    pub fn password(raw: &str) -> ClearTextPassword {
        ClearTextPassword::new_unchecked(raw.to_string())
    }

    pub fn record_named(name: &str) -> CredentialRecord {
        CredentialRecord {
            id: UserId::new(),
            display_name: name.to_string(),
            email: Email::new(EMAIL).unwrap(),
            password_hash: Bcrypt.hash(&password(PASSWORD), 4).unwrap(),
        }
    }

    pub fn record() -> CredentialRecord {
        record_named("Ada Lovelace")
    }

    pub fn issuer() -> Arc<TokenIssuer> {
        Arc::new(TokenIssuer::new(&AuthConfig::new(SECRET)))
    }
}

#[cfg(test)]
mod authenticate_tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use chrono::{Duration, Utc};
    use kernel::email::Email;
    use platform::token::SignError;

    use super::support::*;
    use crate::application::{AuthConfig, AuthenticateInput, AuthenticateUseCase, TokenIssuer};
    use crate::domain::entity::access_claims::{TOKEN_AUDIENCE, TOKEN_ISSUER};
    use crate::error::{AuthError, TokenIssueError};

    fn input(email: &str, pw: &str) -> AuthenticateInput {
        AuthenticateInput {
            email: Email::new(email).unwrap(),
            password: password(pw),
        }
    }

    fn use_case(
        lookup: Arc<StubLookup>,
        verifier: Arc<CountingVerifier>,
        issuer: Arc<TokenIssuer>,
    ) -> AuthenticateUseCase<StubLookup, CountingVerifier> {
        AuthenticateUseCase::new(lookup, verifier, issuer)
    }

    #[tokio::test]
    async fn test_success_issues_one_hour_token() {
        let record = record();
        let issuer = issuer();
        let verifier = Arc::new(CountingVerifier::default());
        let uc = use_case(
            StubLookup::new(Outcome::Found(record.clone())),
            verifier.clone(),
            issuer.clone(),
        );

        let before = Utc::now().timestamp();
        let issued = uc.execute(input(EMAIL, PASSWORD)).await.unwrap();
        let after = Utc::now().timestamp();

        assert_eq!(issued.as_str().split('.').count(), 3);
        assert_eq!(verifier.count(), 1);

        let claims = issuer.verify(issued.as_str()).unwrap();
        assert_eq!(claims.sub, record.id.to_string());
        assert_eq!(claims.user_id(), Some(record.id));
        assert_eq!(claims.name, "Ada Lovelace");
        assert_eq!(claims.email, EMAIL);
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.aud, TOKEN_AUDIENCE);
        assert!(claims.iat >= before && claims.iat <= after);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(issued.expires_at, claims.exp);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let verifier = Arc::new(CountingVerifier::default());
        let uc = use_case(
            StubLookup::new(Outcome::Found(record())),
            verifier.clone(),
            issuer(),
        );

        let result = uc.execute(input(EMAIL, "wrong-password")).await;

        assert!(matches!(result, Err(AuthError::PasswordMismatch)));
        assert_eq!(verifier.count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user_never_verifies() {
        let lookup = StubLookup::new(Outcome::Missing);
        let verifier = Arc::new(CountingVerifier::default());
        let uc = use_case(lookup.clone(), verifier.clone(), issuer());

        let result = uc.execute(input("nobody@example.com", PASSWORD)).await;

        assert!(matches!(result, Err(AuthError::UserNotFound)));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        assert_eq!(verifier.count(), 0);
    }

    #[tokio::test]
    async fn test_email_match_is_case_sensitive() {
        let verifier = Arc::new(CountingVerifier::default());
        let uc = use_case(
            StubLookup::new(Outcome::Found(record())),
            verifier.clone(),
            issuer(),
        );

        let result = uc.execute(input("ADA@example.com", PASSWORD)).await;

        assert!(matches!(result, Err(AuthError::UserNotFound)));
        assert_eq!(verifier.count(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_opaque() {
        let verifier = Arc::new(CountingVerifier::default());
        let uc = use_case(StubLookup::new(Outcome::Broken), verifier.clone(), issuer());

        let err = uc.execute(input(EMAIL, PASSWORD)).await.unwrap_err();

        assert!(matches!(err, AuthError::AuthenticationFailed(_)));
        assert_eq!(err.to_string(), "authentication failed");
        assert_eq!(verifier.count(), 0);
    }

    #[tokio::test]
    async fn test_empty_signing_key() {
        let issuer = Arc::new(TokenIssuer::new(&AuthConfig::new("")));
        let verifier = Arc::new(CountingVerifier::default());
        let uc = use_case(
            StubLookup::new(Outcome::Found(record())),
            verifier.clone(),
            issuer,
        );

        let result = uc.execute(input(EMAIL, PASSWORD)).await;

        assert!(matches!(
            result,
            Err(AuthError::TokenIssuanceFailed(TokenIssueError::Sign(
                SignError::MissingKey
            )))
        ));
        assert_eq!(verifier.count(), 1);
    }

    #[tokio::test]
    async fn test_empty_claim_value() {
        let uc = use_case(
            StubLookup::new(Outcome::Found(record_named(""))),
            Arc::new(CountingVerifier::default()),
            issuer(),
        );

        let result = uc.execute(input(EMAIL, PASSWORD)).await;

        assert!(matches!(
            result,
            Err(AuthError::TokenIssuanceFailed(TokenIssueError::EmptyClaim {
                claim: "name"
            }))
        ));
    }

    #[tokio::test]
    async fn test_calls_one_second_apart_differ() {
        let issuer = issuer();
        let uc = use_case(
            StubLookup::new(Outcome::Found(record())),
            Arc::new(CountingVerifier::default()),
            issuer.clone(),
        );

        let now = Utc::now();
        let first = uc.execute_at(input(EMAIL, PASSWORD), now).await.unwrap();
        let second = uc
            .execute_at(input(EMAIL, PASSWORD), now + Duration::seconds(1))
            .await
            .unwrap();

        assert_eq!(second.expires_at - first.expires_at, 1);
        assert_ne!(first.as_str(), second.as_str());

        let first_claims = issuer.verify(first.as_str()).unwrap();
        let second_claims = issuer.verify(second.as_str()).unwrap();
        assert_ne!(first_claims.exp, second_claims.exp);
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::presentation::{AuthAppState, auth_router};

    fn app(outcome: Outcome) -> Router {
        auth_router(AuthAppState::new(StubLookup::new(outcome), issuer()))
    }

    fn post_auth(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/auth")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn credentials(email: &str, password: &str) -> String {
        json!({ "email": email, "password": password }).to_string()
    }

    #[tokio::test]
    async fn test_ok_returns_token() {
        let (status, body) = call(
            app(Outcome::Found(record())),
            post_auth(credentials(EMAIL, PASSWORD)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap();
        assert!(issuer().verify(token).is_ok());
    }

    #[tokio::test]
    async fn test_wrong_password_is_401() {
        let (status, body) = call(
            app(Outcome::Found(record())),
            post_auth(credentials(EMAIL, "not-the-password")),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "message": "wrong password", "status": 401 }));
    }

    #[tokio::test]
    async fn test_unknown_user_is_401() {
        let (status, body) = call(
            app(Outcome::Missing),
            post_auth(credentials(EMAIL, PASSWORD)),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "user not found");
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let (status, body) = call(
            app(Outcome::Broken),
            post_auth(credentials(EMAIL, PASSWORD)),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "authentication failed");
    }

    #[tokio::test]
    async fn test_signing_failure_is_500() {
        let issuer = Arc::new(crate::TokenIssuer::new(&crate::AuthConfig::default()));
        let app = auth_router(AuthAppState::new(
            StubLookup::new(Outcome::Found(record())),
            issuer,
        ));

        let (status, body) = call(app, post_auth(credentials(EMAIL, PASSWORD))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "failed to issue token");
    }

    #[tokio::test]
    async fn test_invalid_json_is_400() {
        let (status, body) = call(app(Outcome::Missing), post_auth("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_validation_errors_are_listed() {
        let (status, body) = call(
            app(Outcome::Missing),
            post_auth(credentials("not-an-email", "short")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid request");
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["message"], "email must be a valid email address");
        assert_eq!(errors[1]["message"], "password must be at least 8 characters");
    }
}

#[cfg(test)]
mod middleware_tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use axum::{Extension, Router};
    use chrono::{Duration, Utc};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::support::*;
    use crate::application::{AuthConfig, TokenIssuer};
    use crate::domain::entity::access_claims::AccessClaims;
    use crate::presentation::require_bearer;

    fn protected() -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|Extension(claims): Extension<AccessClaims>| async move { claims.email }),
            )
            .layer(axum::middleware::from_fn_with_state(issuer(), require_bearer))
    }

    fn whoami(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn call(req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = protected().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn message(bytes: &[u8]) -> String {
        let body: Value = serde_json::from_slice(bytes).unwrap();
        body["message"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_valid_token_passes_claims() {
        let token = issuer().issue(&record(), Utc::now()).unwrap();
        let header = format!("Bearer {}", token.as_str());

        let (status, body) = call(whoami(Some(&header))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, EMAIL.as_bytes());
    }

    #[tokio::test]
    async fn test_missing_header() {
        let (status, body) = call(whoami(None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&body), "empty token");
    }

    #[tokio::test]
    async fn test_wrong_scheme() {
        let (status, body) = call(whoami(Some("Token abc.def.ghi"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&body), "malformed token");
    }

    #[tokio::test]
    async fn test_foreign_signature() {
        let foreign = TokenIssuer::new(&AuthConfig::new("someone-elses-secret"));
        let token = foreign.issue(&record(), Utc::now()).unwrap();
        let header = format!("Bearer {}", token.as_str());

        let (status, body) = call(whoami(Some(&header))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), "unauthorized");
    }

    #[tokio::test]
    async fn test_expired_token() {
        let token = issuer()
            .issue(&record(), Utc::now() - Duration::hours(2))
            .unwrap();
        let header = format!("Bearer {}", token.as_str());

        let (status, _) = call(whoami(Some(&header))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
