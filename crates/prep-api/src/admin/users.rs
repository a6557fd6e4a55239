use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};
use prep_console::model::{
    AdminRole, AdminUser, AdminUserFilter, AdminUserList, AdminUserStatus, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE, InviteReceipt,
};
use uuid::Uuid;

use super::model::{
    BulkDeleteRequest, BulkDeleteResponse, BulkStatusRequest, BulkStatusResponse,
    CreateAdminUserRequest, InviteRequest, ListUsersQuery, UpdateAdminUserRequest,
};
use crate::{
    ApiState,
    auth::AdminSession,
    error::ApiError,
    extract::{ValidPath, ValidQuery, ValidatedJson},
    metrics,
};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/admin/users", get(list_users).post(create_user))
        .route("/admin/users/{id}", patch(update_user).delete(delete_user))
        .route("/admin/users/bulk-status", post(bulk_status))
        .route("/admin/users/bulk-delete", post(bulk_delete))
        .route("/admin/users/invite", post(invite_user))
}

async fn list_users(
    _session: AdminSession,
    State(state): State<ApiState>,
    ValidQuery(query): ValidQuery<ListUsersQuery>,
) -> Result<Json<AdminUserList>, ApiError> {
    let filter = parse_filter(query)?;
    Ok(Json(state.directory.list(&filter).await))
}

async fn create_user(
    session: AdminSession,
    State(state): State<ApiState>,
    ValidatedJson(req): ValidatedJson<CreateAdminUserRequest>,
) -> Result<(StatusCode, Json<AdminUser>), ApiError> {
    let user = state.directory.create(req.into()).await?;

    tracing::info!(actor = %session.user_id, user_id = %user.id, "Admin user created via console");
    metrics::record_directory_mutation("create", 1);

    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    session: AdminSession,
    State(state): State<ApiState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateAdminUserRequest>,
) -> Result<Json<AdminUser>, ApiError> {
    let user = state.directory.update(id, req.into()).await?;

    tracing::debug!(actor = %session.user_id, user_id = %id, "Admin user updated via console");
    metrics::record_directory_mutation("update", 1);

    Ok(Json(user))
}

async fn delete_user(
    session: AdminSession,
    State(state): State<ApiState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.directory.delete(id).await?;

    tracing::info!(actor = %session.user_id, user_id = %id, "Admin user deleted via console");
    metrics::record_directory_mutation("delete", 1);

    Ok(StatusCode::NO_CONTENT)
}

async fn bulk_status(
    session: AdminSession,
    State(state): State<ApiState>,
    ValidatedJson(req): ValidatedJson<BulkStatusRequest>,
) -> Result<Json<BulkStatusResponse>, ApiError> {
    let updated = state.directory.bulk_status(&req.user_ids, req.status).await;

    tracing::info!(actor = %session.user_id, updated, "Bulk status via console");
    metrics::record_directory_mutation("bulk_status", updated);

    Ok(Json(BulkStatusResponse { updated }))
}

async fn bulk_delete(
    session: AdminSession,
    State(state): State<ApiState>,
    ValidatedJson(req): ValidatedJson<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, ApiError> {
    let deleted = state.directory.bulk_delete(&req.user_ids).await;

    tracing::info!(actor = %session.user_id, deleted, "Bulk delete via console");
    metrics::record_directory_mutation("bulk_delete", deleted);

    Ok(Json(BulkDeleteResponse { deleted }))
}

async fn invite_user(
    session: AdminSession,
    State(state): State<ApiState>,
    ValidatedJson(req): ValidatedJson<InviteRequest>,
) -> Result<(StatusCode, Json<InviteReceipt>), ApiError> {
    let receipt = state.directory.invite(&req.email, req.role);

    tracing::info!(
        actor = %session.user_id,
        role = %req.role,
        has_message = req.message.is_some(),
        "Admin invite issued"
    );

    Ok((StatusCode::ACCEPTED, Json(receipt)))
}

fn parse_filter(query: ListUsersQuery) -> Result<AdminUserFilter, ApiError> {
    let statuses = match query.status.as_deref() {
        Some(raw) => parse_statuses(raw)?,
        None => Vec::new(),
    };

    let role = match query.role.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<AdminRole>()
                .map_err(|_| ApiError::Validation("invalid role".to_string()))?,
        ),
    };

    Ok(AdminUserFilter {
        page: parse_positive(query.page.as_deref(), DEFAULT_PAGE),
        page_size: parse_positive(query.page_size.as_deref(), DEFAULT_PAGE_SIZE),
        statuses,
        role,
        username: query.username.filter(|u| !u.is_empty()),
    })
}

/// Missing, malformed, or non-positive values yield `default`.
fn parse_positive(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Comma separated statuses; blank entries are skipped.
fn parse_statuses(raw: &str) -> Result<Vec<AdminUserStatus>, ApiError> {
    raw.split(',')
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<AdminUserStatus>()
                .map_err(|_| ApiError::Validation(format!("invalid status {part}")))
        })
        .collect()
}
