use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use prep_console::model::{ExamCategory, UserRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam: Option<ExamCategory>,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Verified identity carried by a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: Uuid,
    pub role: UserRole,
    pub exam: Option<ExamCategory>,
}

/// HS256 signer and verifier bound to one secret and issuer.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(secret: &str, issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Sign a token for `user_id` valid for the configured TTL.
    pub fn generate(
        &self,
        user_id: Uuid,
        role: UserRole,
        exam: Option<ExamCategory>,
    ) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user_id.to_string(),
            role,
            exam,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        self.encode(&claims)
    }

    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, ApiError> {
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Check signature, expiry and issuer, then parse the subject.
    pub fn verify(&self, token: &str) -> Result<TokenSubject, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| ApiError::Auth("invalid token".to_string()))?
            .claims;

        let user_id = Uuid::parse_str(&claims.user_id)
            .map_err(|_| ApiError::Auth("invalid token".to_string()))?;

        Ok(TokenSubject {
            user_id,
            role: claims.role,
            exam: claims.exam,
        })
    }
}
