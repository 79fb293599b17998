//! Authentication service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use farmtrack_common::{AppError, AppResult, Config};
use farmtrack_db::{
    entities::{user, user::UserRole},
    repositories::UserRepository,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Authentication service: registration, login, role management, and
/// bearer-token issue/verify.
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    token_expiry_hours: i64,
}

/// Input for registering a user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// Defaults to VIEWER when absent.
    pub role: Option<UserRole>,
}

/// Input for logging in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Input for changing a user's role.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleInput {
    pub user_id: Uuid,
    pub new_role: UserRole,
}

/// Claims embedded in every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub sub: Uuid,
    /// User email.
    pub email: String,
    /// Role at issue time.
    pub role: UserRole,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl AuthService {
    /// Create a new auth service.
    #[must_use]
    pub fn new(user_repo: UserRepository, config: &Config) -> Self {
        Self {
            user_repo,
            jwt_secret: config.auth.jwt_secret.clone(),
            token_expiry_hours: config.auth.token_expiry_hours,
        }
    }

    /// Register a new user and issue a token for it.
    pub async fn register(&self, input: RegisterInput) -> AppResult<(user::Model, String)> {
        input.validate()?;

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::BadRequest(
                "Registration failed: email is already in use".to_string(),
            ));
        }

        let password_hash = hash_password(&input.password)?;

        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email),
            password: Set(password_hash),
            role: Set(input.role.unwrap_or(UserRole::Viewer)),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let user = self.user_repo.create(model).await?;
        let token = self.issue_token(&user)?;

        Ok((user, token))
    }

    /// Authenticate by email and password, returning a fresh token.
    pub async fn login(&self, input: LoginInput) -> AppResult<String> {
        let user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify_password(&input.password, &user.password)? {
            return Err(AppError::Unauthorized);
        }

        self.issue_token(&user)
    }

    /// Change a user's role.
    pub async fn update_user_role(&self, input: UpdateUserRoleInput) -> AppResult<user::Model> {
        let user = self.user_repo.get_by_id(input.user_id).await?;

        let mut active: user::ActiveModel = user.into();
        active.role = Set(input.new_role);
        active.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(active).await
    }

    /// Sign a token embedding the user's id, email, and role.
    pub fn issue_token(&self, user: &user::Model) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now,
            exp: now + self.token_expiry_hours * 3600,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Decode and verify a bearer token.
    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized)
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use farmtrack_common::config::{AuthConfig, DatabaseConfig, ServerConfig};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/test".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            auth: AuthConfig {
                jwt_secret: "test-secret".to_string(),
                token_expiry_hours: 24,
            },
        }
    }

    fn create_test_user(email: &str, password: &str, role: UserRole) -> user::Model {
        user::Model {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password: hash_password(password).unwrap(),
            role,
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn create_test_service(db: Arc<DatabaseConnection>) -> AuthService {
        AuthService::new(UserRepository::new(db), &create_test_config())
    }

    fn empty_mock() -> Arc<DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    // Unit tests for password functions
    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hash.len() > 50);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(verify_password("test_password_123", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_password_different_each_time() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);

        assert!(verify_password("same_password", &hash1).unwrap());
        assert!(verify_password("same_password", &hash2).unwrap());
    }

    #[test]
    fn test_token_round_trip() {
        let service = create_test_service(empty_mock());
        let user = create_test_user("owner@example.com", "password123", UserRole::Owner);

        let token = service.issue_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "owner@example.com");
        assert_eq!(claims.role, UserRole::Owner);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_garbage_token_is_unauthorized() {
        let service = create_test_service(empty_mock());

        let result = service.verify_token("not-a-token");
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_verify_token_signed_with_other_secret_fails() {
        let service = create_test_service(empty_mock());
        let user = create_test_user("owner@example.com", "password123", UserRole::Owner);
        let token = service.issue_token(&user).unwrap();

        let mut other_config = create_test_config();
        other_config.auth.jwt_secret = "different-secret".to_string();
        let other = AuthService::new(UserRepository::new(empty_mock()), &other_config);

        assert!(matches!(
            other.verify_token(&token),
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_rejected() {
        let existing = create_test_user("taken@example.com", "password123", UserRole::Viewer);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = create_test_service(db);

        let result = service
            .register(RegisterInput {
                email: "taken@example.com".to_string(),
                password: "password123".to_string(),
                role: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_register_defaults_to_viewer() {
        let created = create_test_user("new@example.com", "password123", UserRole::Viewer);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new(), vec![created]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let service = create_test_service(db);

        let (user, token) = service
            .register(RegisterInput {
                email: "new@example.com".to_string(),
                password: "password123".to_string(),
                role: None,
            })
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::Viewer);

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.role, UserRole::Viewer);
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let service = create_test_service(empty_mock());

        let result = service
            .register(RegisterInput {
                email: "new@example.com".to_string(),
                password: "short".to_string(),
                role: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let service = create_test_service(db);

        let result = service
            .login(LoginInput {
                email: "nobody@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let user = create_test_user("owner@example.com", "correct-password", UserRole::Owner);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );

        let service = create_test_service(db);

        let result = service
            .login(LoginInput {
                email: "owner@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_login_success_issues_verifiable_token() {
        let user = create_test_user("owner@example.com", "correct-password", UserRole::Owner);
        let user_id = user.id;

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );

        let service = create_test_service(db);

        let token = service
            .login(LoginInput {
                email: "owner@example.com".to_string(),
                password: "correct-password".to_string(),
            })
            .await
            .unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[tokio::test]
    async fn test_update_user_role() {
        let user = create_test_user("viewer@example.com", "password123", UserRole::Viewer);
        let user_id = user.id;

        let mut promoted = user.clone();
        promoted.role = UserRole::Operator;
        promoted.updated_at = Some(Utc::now().into());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![user], vec![promoted]])
                .into_connection(),
        );

        let service = create_test_service(db);

        let result = service
            .update_user_role(UpdateUserRoleInput {
                user_id,
                new_role: UserRole::Operator,
            })
            .await
            .unwrap();

        assert_eq!(result.role, UserRole::Operator);
    }

    #[tokio::test]
    async fn test_update_role_unknown_user_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let service = create_test_service(db);

        let result = service
            .update_user_role(UpdateUserRoleInput {
                user_id: Uuid::new_v4(),
                new_role: UserRole::Owner,
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
