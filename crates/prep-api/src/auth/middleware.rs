use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use prep_console::model::{ExamCategory, UserRole};
use uuid::Uuid;

use super::jwt::{JwtService, TokenSubject};
use crate::{error::ApiError, state::AuthConfig};

/// Authenticated learner, verified against the user token secret.
///
/// # Example
/// ```
/// use prep_api::{auth::AuthUser, error::ApiError};
///
/// async fn protected_route(auth_user: AuthUser) -> Result<String, ApiError> {
///     Ok(auth_user.user_id.to_string())
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub exam: Option<ExamCategory>,
}

/// Console operator, verified against the admin token secret and
/// holding `ADMIN` or `SUPER_ADMIN`.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession {
    pub user_id: Uuid,
    pub role: UserRole,
}

async fn bearer_subject<S>(
    parts: &mut Parts,
    state: &S,
    jwt: &JwtService,
) -> Result<TokenSubject, ApiError>
where
    S: Send + Sync,
{
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Auth("missing or invalid token".to_string()))?;

    jwt.verify(bearer.token())
}

impl<S> FromRequestParts<S> for AuthUser
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_config = AuthConfig::from_ref(state);
        let subject = bearer_subject(parts, state, &auth_config.user_jwt).await?;

        Ok(Self {
            user_id: subject.user_id,
            role: subject.role,
            exam: subject.exam,
        })
    }
}

impl<S> FromRequestParts<S> for AdminSession
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_config = AuthConfig::from_ref(state);
        let subject = bearer_subject(parts, state, &auth_config.admin_jwt).await?;

        if !subject.role.is_admin() {
            tracing::warn!(user_id = %subject.user_id, role = %subject.role, "Admin route denied");
            return Err(ApiError::Forbidden("insufficient role".to_string()));
        }

        Ok(Self {
            user_id: subject.user_id,
            role: subject.role,
        })
    }
}
