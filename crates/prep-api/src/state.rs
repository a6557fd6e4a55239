use std::sync::Arc;

use axum::extract::FromRef;
use chrono::Duration;
use prep_console::{Analytics, AdminDirectory, model::AdminProfile};
use sqlx::PgPool;

use crate::{
    auth::jwt::JwtService,
    config::{ApiConfig, ConfigError, Environment},
};

/// Token services used by the auth extractors.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub user_jwt: JwtService,
    pub admin_jwt: JwtService,
}

/// Bootstrap admin login and identity.
#[derive(Clone)]
pub struct AdminAccount {
    pub username: String,
    pub password: String,
    pub profile: AdminProfile,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("username", &self.username)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub struct ApiState {
    pub pool: PgPool,
    pub environment: Environment,
    pub auth: AuthConfig,
    pub admin: Arc<AdminAccount>,
    pub directory: Arc<AdminDirectory>,
    pub analytics: Analytics,
}

impl ApiState {
    /// Build the shared state and seed the admin directory.
    pub fn new(config: &ApiConfig, pool: PgPool) -> Result<Self, ConfigError> {
        let profile = config.admin_profile()?;
        let ttl = Duration::minutes(config.jwt_token_ttl_minutes);

        let auth = AuthConfig {
            user_jwt: JwtService::new(&config.jwt_user_secret, &config.app_name, ttl),
            admin_jwt: JwtService::new(&config.jwt_admin_secret, &config.app_name, ttl),
        };

        let directory = AdminDirectory::seeded(&profile);
        let analytics = Analytics::new(profile.primary_exam);

        tracing::info!(
            admin_id = %profile.id,
            role = %profile.role,
            exam = %profile.primary_exam,
            "Admin directory seeded"
        );

        Ok(Self {
            pool,
            environment: config.env,
            auth,
            admin: Arc::new(AdminAccount {
                username: config.admin_username.clone(),
                password: config.admin_password.clone(),
                profile,
            }),
            directory: Arc::new(directory),
            analytics,
        })
    }
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.auth.clone()
    }
}
