//! In-memory directory of admin console operators.
//!
//! The directory is seeded with the bootstrap admin at construction and lives
//! for the lifetime of the process. Every operation takes the single
//! reader/writer lock around the whole map.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::ConsoleError,
    model::{
        AdminProfile, AdminRole, AdminUser, AdminUserFilter, AdminUserList, AdminUserPatch,
        AdminUserStatus, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, InviteReceipt, NewAdminUser, PageMeta,
    },
};

/// Phone number given to the seeded bootstrap operator.
pub const BOOTSTRAP_PHONE_NUMBER: &str = "+91 90000 00000";

/// How long an invitation stays valid.
pub const INVITE_TTL_HOURS: i64 = 72;

/// Console operators keyed by id, shared between handlers behind an `Arc`.
#[derive(Debug, Default)]
pub struct AdminDirectory {
    users: RwLock<HashMap<Uuid, AdminUser>>,
}

impl AdminDirectory {
    /// Create a directory holding only the operator derived from `profile`.
    pub fn seeded(profile: &AdminProfile) -> Self {
        let (first_name, last_name) = split_name(&profile.display_name);
        let user = AdminUser {
            id: profile.id,
            first_name,
            last_name,
            username: slugify_name(&profile.display_name),
            email: profile.email.clone(),
            phone_number: BOOTSTRAP_PHONE_NUMBER.to_string(),
            status: AdminUserStatus::Active,
            role: AdminRole::from(profile.role),
            created_at: profile.created_at,
            updated_at: profile.created_at,
        };

        Self {
            users: RwLock::new(HashMap::from([(user.id, user)])),
        }
    }

    /// Number of operators, the bootstrap admin included.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// True once every operator has been deleted.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Snapshot of one operator.
    pub async fn get(&self, id: Uuid) -> Option<AdminUser> {
        self.users.read().await.get(&id).cloned()
    }

    /// Filter, sort newest first, and slice to the requested page.
    pub async fn list(&self, filter: &AdminUserFilter) -> AdminUserList {
        let page = if filter.page == 0 {
            DEFAULT_PAGE
        } else {
            filter.page
        };
        let page_size = if filter.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            filter.page_size
        };
        let needle = filter
            .username
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(str::to_lowercase);

        let users = self.users.read().await;
        let mut matched: Vec<&AdminUser> = users
            .values()
            .filter(|u| filter.statuses.is_empty() || filter.statuses.contains(&u.status))
            .filter(|u| filter.role.is_none_or(|role| u.role == role))
            .filter(|u| {
                needle
                    .as_deref()
                    .is_none_or(|n| u.username.to_lowercase().contains(n))
            })
            .collect();

        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.username.cmp(&b.username))
        });

        let total = matched.len();
        let start = (page - 1).saturating_mul(page_size).min(total);
        let end = start.saturating_add(page_size).min(total);

        AdminUserList {
            items: matched[start..end].iter().map(|u| (*u).clone()).collect(),
            meta: PageMeta {
                page,
                page_size,
                total,
            },
        }
    }

    /// Add an operator. Username and email must be unused, ignoring case.
    pub async fn create(&self, new: NewAdminUser) -> Result<AdminUser, ConsoleError> {
        let mut users = self.users.write().await;

        if username_taken(&users, &new.username, None) {
            return Err(ConsoleError::DuplicateUsername);
        }
        if email_taken(&users, &new.email, None) {
            return Err(ConsoleError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = AdminUser {
            id: Uuid::new_v4(),
            first_name: new.first_name,
            last_name: new.last_name,
            username: new.username,
            email: new.email,
            phone_number: new.phone_number,
            status: new.status,
            role: new.role,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());
        info!(user_id = %user.id, username = %user.username, "Admin user created");

        Ok(user)
    }

    /// Apply `patch` to an existing operator.
    ///
    /// Uniqueness is only checked for fields that actually change.
    pub async fn update(&self, id: Uuid, patch: AdminUserPatch) -> Result<AdminUser, ConsoleError> {
        let mut users = self.users.write().await;

        let current = users.get(&id).ok_or(ConsoleError::UserNotFound)?;

        if let Some(username) = patch.username.as_deref()
            && username != current.username
            && username_taken(&users, username, Some(id))
        {
            return Err(ConsoleError::DuplicateUsername);
        }
        if let Some(email) = patch.email.as_deref()
            && email != current.email
            && email_taken(&users, email, Some(id))
        {
            return Err(ConsoleError::DuplicateEmail);
        }

        let user = users.get_mut(&id).ok_or(ConsoleError::UserNotFound)?;
        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        if let Some(username) = patch.username {
            user.username = username;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(phone_number) = patch.phone_number {
            user.phone_number = phone_number;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(status) = patch.status {
            user.status = status;
        }
        user.updated_at = Utc::now();

        debug!(user_id = %id, "Admin user updated");

        Ok(user.clone())
    }

    /// Remove one operator, failing with `UserNotFound` for an unknown id.
    pub async fn delete(&self, id: Uuid) -> Result<(), ConsoleError> {
        let mut users = self.users.write().await;
        users.remove(&id).ok_or(ConsoleError::UserNotFound)?;

        info!(user_id = %id, "Admin user deleted");
        Ok(())
    }

    /// Set `status` on every known id; returns how many were changed.
    pub async fn bulk_status(&self, ids: &[Uuid], status: AdminUserStatus) -> usize {
        let mut users = self.users.write().await;

        let mut updated = 0;
        for id in ids {
            if let Some(user) = users.get_mut(id) {
                user.status = status;
                user.updated_at = Utc::now();
                updated += 1;
            }
        }

        info!(requested = ids.len(), updated, %status, "Bulk status applied");
        updated
    }

    /// Remove every known id; returns how many were removed.
    pub async fn bulk_delete(&self, ids: &[Uuid]) -> usize {
        let mut users = self.users.write().await;

        let deleted = ids.iter().filter(|id| users.remove(id).is_some()).count();

        info!(requested = ids.len(), deleted, "Bulk delete applied");
        deleted
    }

    /// Record an invitation. Nothing is stored and no message is sent.
    pub fn invite(&self, email: &str, role: AdminRole) -> InviteReceipt {
        self.invite_at(email, role, Utc::now())
    }

    pub fn invite_at(&self, email: &str, role: AdminRole, now: DateTime<Utc>) -> InviteReceipt {
        debug!(email, %role, "Admin invite requested");

        InviteReceipt {
            invited: true,
            expires_at: now + Duration::hours(INVITE_TTL_HOURS),
        }
    }
}

fn username_taken(users: &HashMap<Uuid, AdminUser>, username: &str, exclude: Option<Uuid>) -> bool {
    users
        .values()
        .any(|u| Some(u.id) != exclude && eq_ignore_case(&u.username, username))
}

fn email_taken(users: &HashMap<Uuid, AdminUser>, email: &str, exclude: Option<Uuid>) -> bool {
    users
        .values()
        .any(|u| Some(u.id) != exclude && eq_ignore_case(&u.email, email))
}

/// Case-insensitive over all Unicode letters, not just ASCII.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Split a display name into first and last name.
fn split_name(full: &str) -> (String, String) {
    let mut parts = full.split_whitespace();
    match parts.next() {
        None => ("Admin".to_string(), "User".to_string()),
        Some(first) => (first.to_string(), parts.collect::<Vec<_>>().join(" ")),
    }
}

/// `Super Admin` -> `super.admin`
fn slugify_name(full: &str) -> String {
    full.replace(' ', ".").to_lowercase().replace("__", ".")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{ExamCategory, UserRole};

    fn profile() -> AdminProfile {
        AdminProfile {
            id: Uuid::from_u128(1),
            display_name: "Super Admin".to_string(),
            email: "root@prep.test".to_string(),
            role: UserRole::SuperAdmin,
            primary_exam: ExamCategory::NeetPg,
            created_at: Utc::now() - Duration::days(30),
            permissions: vec!["subjects.read".to_string()],
        }
    }

    fn new_user(username: &str, email: &str) -> NewAdminUser {
        NewAdminUser {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            phone_number: "+91 98765 43210".to_string(),
            role: AdminRole::Admin,
            status: AdminUserStatus::Active,
        }
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name(""), ("Admin".to_string(), "User".to_string()));
        assert_eq!(split_name("Root"), ("Root".to_string(), String::new()));
        assert_eq!(
            split_name("  Ada   King Lovelace "),
            ("Ada".to_string(), "King Lovelace".to_string())
        );
    }

    #[test]
    fn test_slugify_name() {
        assert_eq!(slugify_name("Super Admin"), "super.admin");
        assert_eq!(slugify_name("Ops"), "ops");
    }

    #[tokio::test]
    async fn test_seeded_bootstrap_user() {
        let profile = profile();
        let directory = AdminDirectory::seeded(&profile);

        assert_eq!(directory.len().await, 1);

        let user = directory.get(profile.id).await.expect("bootstrap user");
        assert_eq!(user.first_name, "Super");
        assert_eq!(user.last_name, "Admin");
        assert_eq!(user.username, "super.admin");
        assert_eq!(user.phone_number, BOOTSTRAP_PHONE_NUMBER);
        assert_eq!(user.status, AdminUserStatus::Active);
        assert_eq!(user.role, AdminRole::SuperAdmin);
        assert_eq!(user.created_at, profile.created_at);
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let directory = AdminDirectory::seeded(&profile());

        let user = directory
            .create(new_user("jdoe", "j@x.com"))
            .await
            .expect("create");

        assert_ne!(user.id, Uuid::nil());
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(directory.get(user.id).await, Some(user));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates_case_insensitively() {
        let directory = AdminDirectory::seeded(&profile());
        directory
            .create(new_user("jdoe", "j@x.com"))
            .await
            .expect("create");

        let err = directory
            .create(new_user("JDOE", "other@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err, ConsoleError::DuplicateUsername);

        let err = directory
            .create(new_user("someone", "J@X.COM"))
            .await
            .unwrap_err();
        assert_eq!(err, ConsoleError::DuplicateEmail);

        // Username is checked before email.
        let err = directory
            .create(new_user("jdoe", "j@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err, ConsoleError::DuplicateUsername);

        assert_eq!(directory.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_check_folds_non_ascii_case() {
        let directory = AdminDirectory::seeded(&profile());
        directory
            .create(new_user("émile", "émile@x.com"))
            .await
            .expect("create");

        let err = directory
            .create(new_user("ÉMILE", "b@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err, ConsoleError::DuplicateUsername);

        let err = directory
            .create(new_user("zoé", "ÉMILE@X.COM"))
            .await
            .unwrap_err();
        assert_eq!(err, ConsoleError::DuplicateEmail);

        let list = directory
            .list(&AdminUserFilter {
                username: Some("ÉMILE".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(list.meta.total, 1);
        assert_eq!(directory.len().await, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_admit_one_username() {
        const ATTEMPTS: usize = 16;

        let directory = Arc::new(AdminDirectory::seeded(&profile()));

        let handles: Vec<_> = (0..ATTEMPTS)
            .map(|i| {
                let directory = Arc::clone(&directory);
                tokio::spawn(async move {
                    directory
                        .create(new_user("racer", &format!("racer{i}@x.com")))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.expect("task panicked") {
                Ok(_) => created += 1,
                Err(ConsoleError::DuplicateUsername) => duplicates += 1,
                Err(other) => panic!("unexpected error {other:?}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(duplicates, ATTEMPTS - 1);
        assert_eq!(directory.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let directory = AdminDirectory::seeded(&profile());
        let created = directory
            .create(new_user("jdoe", "j@x.com"))
            .await
            .expect("create");

        let patch = AdminUserPatch {
            email: Some("john@x.com".to_string()),
            ..Default::default()
        };
        let updated = directory.update(created.id, patch).await.expect("update");

        assert_eq!(updated.email, "john@x.com");
        assert_eq!(updated.username, "jdoe");
        assert_eq!(updated.first_name, created.first_name);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_allows_case_change_of_own_username() {
        let directory = AdminDirectory::seeded(&profile());
        let created = directory
            .create(new_user("jdoe", "j@x.com"))
            .await
            .expect("create");

        let patch = AdminUserPatch {
            username: Some("JDoe".to_string()),
            email: Some("j@x.com".to_string()),
            ..Default::default()
        };
        let updated = directory.update(created.id, patch).await.expect("update");
        assert_eq!(updated.username, "JDoe");
    }

    #[tokio::test]
    async fn test_update_conflict_leaves_record_unchanged() {
        let directory = AdminDirectory::seeded(&profile());
        let first = directory
            .create(new_user("first", "first@x.com"))
            .await
            .expect("create");
        directory
            .create(new_user("second", "second@x.com"))
            .await
            .expect("create");

        let patch = AdminUserPatch {
            first_name: Some("Changed".to_string()),
            email: Some("SECOND@x.com".to_string()),
            ..Default::default()
        };
        let err = directory.update(first.id, patch).await.unwrap_err();

        assert_eq!(err, ConsoleError::DuplicateEmail);
        assert_eq!(directory.get(first.id).await, Some(first));
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let directory = AdminDirectory::seeded(&profile());
        let missing = Uuid::new_v4();

        let err = directory
            .update(missing, AdminUserPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err, ConsoleError::UserNotFound);

        let err = directory.delete(missing).await.unwrap_err();
        assert_eq!(err, ConsoleError::UserNotFound);

        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_pagination_newest_first() {
        let directory = AdminDirectory::default();
        let mut created = Vec::new();
        for name in ["alpha", "bravo", "charlie"] {
            created.push(
                directory
                    .create(new_user(name, &format!("{name}@x.com")))
                    .await
                    .expect("create"),
            );
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let filter = AdminUserFilter {
            page: 2,
            page_size: 1,
            ..Default::default()
        };
        let list = directory.list(&filter).await;

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].username, "bravo");
        assert_eq!(list.meta.total, 3);
        assert_eq!(list.meta.page, 2);
        assert_eq!(list.meta.page_size, 1);

        let filter = AdminUserFilter {
            page: 1,
            page_size: 10,
            ..Default::default()
        };
        let names: Vec<_> = directory
            .list(&filter)
            .await
            .items
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, ["charlie", "bravo", "alpha"]);
    }

    #[tokio::test]
    async fn test_list_out_of_range_page_is_empty() {
        let directory = AdminDirectory::seeded(&profile());
        directory
            .create(new_user("jdoe", "j@x.com"))
            .await
            .expect("create");

        let filter = AdminUserFilter {
            page: 5,
            page_size: 10,
            ..Default::default()
        };
        let list = directory.list(&filter).await;

        assert!(list.items.is_empty());
        assert_eq!(list.meta.total, 2);
    }

    #[tokio::test]
    async fn test_list_zero_paging_uses_defaults() {
        let directory = AdminDirectory::seeded(&profile());

        let filter = AdminUserFilter {
            page: 0,
            page_size: 0,
            ..Default::default()
        };
        let list = directory.list(&filter).await;

        assert_eq!(list.meta.page, DEFAULT_PAGE);
        assert_eq!(list.meta.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(list.items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let directory = AdminDirectory::seeded(&profile());
        let mut manager = new_user("Floor.Manager", "fm@x.com");
        manager.role = AdminRole::Manager;
        manager.status = AdminUserStatus::Suspended;
        directory.create(manager).await.expect("create");

        let mut cashier = new_user("till", "till@x.com");
        cashier.role = AdminRole::Cashier;
        cashier.status = AdminUserStatus::Invited;
        directory.create(cashier).await.expect("create");

        let by_status = directory
            .list(&AdminUserFilter {
                statuses: vec![AdminUserStatus::Suspended, AdminUserStatus::Invited],
                ..Default::default()
            })
            .await;
        assert_eq!(by_status.meta.total, 2);

        let by_role = directory
            .list(&AdminUserFilter {
                role: Some(AdminRole::Cashier),
                ..Default::default()
            })
            .await;
        assert_eq!(by_role.meta.total, 1);
        assert_eq!(by_role.items[0].username, "till");

        let by_username = directory
            .list(&AdminUserFilter {
                username: Some("MANAGER".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(by_username.meta.total, 1);
        assert_eq!(by_username.items[0].username, "Floor.Manager");

        let empty_username = directory
            .list(&AdminUserFilter {
                username: Some(String::new()),
                ..Default::default()
            })
            .await;
        assert_eq!(empty_username.meta.total, 3);
    }

    #[tokio::test]
    async fn test_bulk_operations_skip_unknown_ids() {
        let directory = AdminDirectory::seeded(&profile());
        let a = directory
            .create(new_user("a", "a@x.com"))
            .await
            .expect("create");
        let b = directory
            .create(new_user("b", "b@x.com"))
            .await
            .expect("create");
        let unknown = Uuid::new_v4();

        let updated = directory
            .bulk_status(&[a.id, unknown, b.id], AdminUserStatus::Inactive)
            .await;
        assert_eq!(updated, 2);

        let a_now = directory.get(a.id).await.expect("a");
        assert_eq!(a_now.status, AdminUserStatus::Inactive);
        assert!(a_now.updated_at >= a.updated_at);

        let deleted = directory.bulk_delete(&[a.id, unknown]).await;
        assert_eq!(deleted, 1);
        assert!(directory.get(a.id).await.is_none());
        assert_eq!(directory.len().await, 2);
    }

    #[test]
    fn test_invite_expires_in_72_hours() {
        let directory = AdminDirectory::default();
        let now = Utc::now();

        let receipt = directory.invite_at("new@x.com", AdminRole::Manager, now);

        assert!(receipt.invited);
        assert_eq!(receipt.expires_at - now, Duration::hours(72));
    }
}
