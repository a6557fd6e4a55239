use prep_console::model::{AdminRole, AdminUserPatch, AdminUserStatus, NewAdminUser};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Body of `POST /admin/users`. Unknown fields such as `password` are ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminUserRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "is required"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub username: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub phone_number: String,
    pub role: AdminRole,
    pub status: AdminUserStatus,
}

impl From<CreateAdminUserRequest> for NewAdminUser {
    fn from(req: CreateAdminUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            username: req.username,
            email: req.email,
            phone_number: req.phone_number,
            role: req.role,
            status: req.status,
        }
    }
}

/// Body of `PATCH /admin/users/{id}`. Omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "must be a valid email"))]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<AdminRole>,
    pub status: Option<AdminUserStatus>,
}

impl From<UpdateAdminUserRequest> for AdminUserPatch {
    fn from(req: UpdateAdminUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            username: req.username,
            email: req.email,
            phone_number: req.phone_number,
            role: req.role,
            status: req.status,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub user_ids: Vec<Uuid>,
    pub status: AdminUserStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkStatusResponse {
    pub updated: usize,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub user_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub deleted: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct InviteRequest {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    pub role: AdminRole,
    #[serde(default)]
    pub message: Option<String>,
}

/// Raw `GET /admin/users` query. Paging values that do not parse fall back to defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub status: Option<String>,
    pub role: Option<String>,
    pub username: Option<String>,
}

/// `exam` query shared by the analytics endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ExamQuery {
    pub exam: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimeSeriesQuery {
    pub metric: Option<String>,
    pub exam: Option<String>,
    pub range: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeakTopicsQuery {
    pub exam: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}
