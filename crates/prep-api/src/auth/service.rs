use prep_db::repositories::user as user_repo;
use prep_console::model::UserRole;
use sqlx::PgPool;

use super::{
    jwt::JwtService,
    models::{AdminLoginRequest, AuthResponse, TelegramAuthRequest, UserView},
};
use crate::{error::ApiError, metrics, state::AdminAccount};

/// Find or create the learner behind a Telegram id and sign a user token.
///
/// A new learner and their exam profile are inserted in one transaction.
pub async fn telegram_auth(
    pool: &PgPool,
    jwt: &JwtService,
    req: TelegramAuthRequest,
) -> Result<AuthResponse, ApiError> {
    let mut tx = pool.begin().await?;

    let record = match user_repo::find_by_telegram_id(&mut *tx, &req.telegram_id).await? {
        Some(existing) => {
            user_repo::touch_last_login(&mut *tx, existing.id, &existing.primary_exam).await?;
            existing
        }
        None => {
            let created = user_repo::create_telegram_user(
                &mut *tx,
                &req.telegram_id,
                &req.display_name,
                req.exam.as_str(),
                UserRole::User.as_str(),
            )
            .await?;
            user_repo::create_exam_profile(&mut *tx, created.id, &created.primary_exam).await?;

            tracing::info!(user_id = %created.id, exam = %req.exam, "Learner registered via Telegram");
            created
        }
    };

    tx.commit().await?;

    let user = UserView::try_from(record)?;
    let access_token = jwt.generate(user.id, user.role, Some(user.primary_exam))?;
    metrics::record_auth_event("telegram", true);

    Ok(AuthResponse { access_token, user })
}

/// Check the bootstrap credentials and sign an admin token.
pub fn admin_login(
    account: &AdminAccount,
    jwt: &JwtService,
    req: &AdminLoginRequest,
) -> Result<AuthResponse, ApiError> {
    if req.username != account.username || req.password != account.password {
        tracing::warn!(username = %req.username, "Admin login rejected");
        metrics::record_auth_event("admin", false);
        return Err(ApiError::Auth("invalid credentials".to_string()));
    }

    let profile = &account.profile;
    let access_token = jwt.generate(profile.id, profile.role, Some(profile.primary_exam))?;

    tracing::info!(admin_id = %profile.id, "Admin logged in");
    metrics::record_auth_event("admin", true);

    Ok(AuthResponse {
        access_token,
        user: UserView::from(profile),
    })
}
