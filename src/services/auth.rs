use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use std::sync::Arc;

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::api::middleware::AuthenticatedUser;
use crate::domain::access::Principal;
use crate::domain::entities::{Session, User};
use crate::domain::ports::role_repository::RoleRepository;
use crate::domain::services::UserDomainService;
use crate::services::session_service::SessionService;

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Validates password complexity:
/// - 10-72 characters long
/// - Contains uppercase, lowercase, digit and special character
pub fn validate_password_complexity(password: &str) -> ApiResult<()> {
    let len = password.len();
    if !(10..=72).contains(&len) {
        return Err(ApiError::BadRequest(
            "Password must be 10-72 characters long".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(ApiError::BadRequest(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(ApiError::BadRequest(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ApiError::BadRequest(
            "Password must contain at least one digit".to_string(),
        ));
    }

    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(ApiError::BadRequest(format!(
            "Password must contain at least one special character ({})",
            SPECIAL_CHARS
        )));
    }

    Ok(())
}

/// Hash password using Argon2id (m_cost = 19 MiB, t_cost = 2, p_cost = 1).
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(19456)
        .t_cost(2)
        .p_cost(1)
        .build()
        .map_err(|_| ApiError::Internal("Failed to build Argon2 params".to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> ApiResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| ApiError::Internal("Invalid password hash format".to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Secure random session token: 32 bytes, hex encoded.
pub fn generate_session_token() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Login flow and resolution of bearer tokens into authenticated users.
#[derive(Clone)]
pub struct AuthService {
    users: UserDomainService,
    roles: Arc<dyn RoleRepository>,
    sessions: SessionService,
    session_duration_hours: i64,
}

impl AuthService {
    pub fn new(
        users: UserDomainService,
        roles: Arc<dyn RoleRepository>,
        sessions: SessionService,
        session_duration_hours: i64,
    ) -> Self {
        Self {
            users,
            roles,
            sessions,
            session_duration_hours,
        }
    }

    /// 1. Find the user by normalized email
    /// 2. Verify password
    /// 3. Reject banned and deleted accounts
    /// 4. Create session
    pub async fn authenticate(&self, email: &str, password: &str) -> ApiResult<(Session, User)> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) if !user.is_deleted() => user,
            _ => {
                tracing::warn!("Login failed: unknown account {}", email.trim());
                return Err(ApiError::Unauthorized);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!("Login failed: bad password for {}", user.email);
            return Err(ApiError::Unauthorized);
        }

        if user.is_banned() {
            tracing::warn!("Login refused: {} is banned", user.email);
            return Err(ApiError::Forbidden("Account is banned".to_string()));
        }

        let session = Session::new(
            user.id.clone(),
            generate_session_token(),
            self.session_duration_hours,
        );
        self.sessions.create_session(&session).await?;
        self.users.record_login(&user.id).await?;

        tracing::info!("User {} signed in", user.email);
        Ok((session, user))
    }

    pub async fn logout(&self, token: &str) -> ApiResult<()> {
        self.sessions.delete_session(token).await
    }

    /// Resolves a bearer token. Any failure (unknown, expired, banned, deleted)
    /// is reported as `Unauthorized`.
    pub async fn resolve_token(&self, token: &str) -> ApiResult<AuthenticatedUser> {
        let session = self
            .sessions
            .get_session_by_token(token)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        if session.is_expired() {
            self.sessions.delete_session(token).await.ok();
            return Err(ApiError::Unauthorized);
        }

        let user = match self.users.get_user(&session.user_id).await {
            Ok(user) if user.can_sign_in() => user,
            _ => {
                self.sessions.delete_session(token).await.ok();
                return Err(ApiError::Unauthorized);
            }
        };

        // Sliding window; a failed touch must not fail the request
        let _ = self.sessions.update_session_last_accessed(token).await;

        let principal = self.principal_for(&user).await?;

        Ok(AuthenticatedUser {
            user,
            principal,
            session,
            token: token.to_string(),
        })
    }

    /// Builds the evaluator input for `user` from its assigned role.
    pub async fn principal_for(&self, user: &User) -> ApiResult<Principal> {
        match self.roles.get_role_by_id(user.role_id).await? {
            Some(role) => Ok(Principal::from_role(&role)),
            // Dangling role reference: keep the id, grant nothing
            None => Ok(Principal::default().with_role_id(user.role_id)),
        }
    }
}
