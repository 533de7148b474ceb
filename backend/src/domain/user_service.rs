use chrono::Utc;
use shared::{Entity, FormFields, FormMode, ListQuery, MutationResponse, Page, User, UserForm};
use tracing::{info, warn};

use super::errors::{AdminError, AdminResult};
use crate::storage::Store;

/// Service for managing the dashboard's user accounts
#[derive(Clone)]
pub struct UserService {
    store: Store<User>,
}

impl UserService {
    pub fn new(store: Store<User>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self, query: &ListQuery) -> Page<User> {
        info!("Listing users: {:?}", query);
        shared::list_page(&self.store.snapshot().await, query)
    }

    pub async fn get_user(&self, user_id: u64) -> AdminResult<User> {
        self.store.get(user_id).await.ok_or_else(|| {
            warn!("User not found: {}", user_id);
            AdminError::NotFound { entity: User::KIND, id: user_id }
        })
    }

    pub async fn create_user(&self, form: UserForm) -> AdminResult<MutationResponse<User>> {
        info!("Creating user: name={}, email={}, role={}", form.name, form.email, form.role);

        let draft = form.validate(FormMode::Add)?;
        self.ensure_unique_email(&draft.email, None).await?;

        let now = Utc::now().to_rfc3339();
        let user = self
            .store
            .add(User {
                id: 0,
                name: draft.name,
                email: draft.email,
                password: draft.password.unwrap_or_default(),
                phone: draft.phone,
                role: draft.role,
                created_at: now.clone(),
                updated_at: now,
            })
            .await;

        info!("Created user: {} with ID: {}", user.name, user.id);
        Ok(MutationResponse {
            item: user,
            success_message: "Pengguna berhasil ditambahkan".to_string(),
        })
    }

    /// A blank password keeps the stored one
    pub async fn update_user(&self, user_id: u64, form: UserForm) -> AdminResult<MutationResponse<User>> {
        info!("Updating user: {}", user_id);

        let existing = self.get_user(user_id).await?;
        let draft = form.validate(FormMode::Edit(user_id))?;
        self.ensure_unique_email(&draft.email, Some(user_id)).await?;

        let user = self
            .store
            .update(
                user_id,
                User {
                    id: user_id,
                    name: draft.name,
                    email: draft.email,
                    password: draft.password.unwrap_or(existing.password),
                    phone: draft.phone,
                    role: draft.role,
                    created_at: existing.created_at,
                    updated_at: Utc::now().to_rfc3339(),
                },
            )
            .await?;

        info!("Updated user: {} with ID: {}", user.name, user.id);
        Ok(MutationResponse {
            item: user,
            success_message: "Data pengguna berhasil diperbarui".to_string(),
        })
    }

    pub async fn delete_user(&self, user_id: u64) -> AdminResult<User> {
        info!("Deleting user: {}", user_id);
        Ok(self.store.remove(user_id).await?)
    }

    /// Emails are compared case-insensitively
    async fn ensure_unique_email(&self, email: &str, except: Option<u64>) -> AdminResult<()> {
        let snapshot = self.store.snapshot().await;
        if snapshot
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email) && Some(u.id) != except)
        {
            warn!("Duplicate email rejected: {}", email);
            return Err(AdminError::Conflict(format!("Email {} sudah digunakan", email)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{memory_store, SampleSeed, SeedProvider};
    use shared::UserRole;

    fn setup_test() -> UserService {
        UserService::new(memory_store(SampleSeed.users()))
    }

    fn form(email: &str, password: &str) -> UserForm {
        UserForm {
            name: "Ustadz Hasan".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: "081299990000".to_string(),
            role: "santri".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user() {
        let service = setup_test();
        let response = service.create_user(form("hasan@pesantren.id", "rahasia1")).await.unwrap();
        assert_eq!(response.item.id, 5);
        assert_eq!(response.item.role, UserRole::Santri);
        assert_eq!(response.item.password, "rahasia1");
        assert_eq!(response.item.created_at, response.item.updated_at);
        assert!(chrono::DateTime::parse_from_rfc3339(&response.item.created_at).is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let service = setup_test();
        let err = service.create_user(form("ADMIN@pesantren.id", "rahasia1")).await.unwrap_err();
        assert!(matches!(err, AdminError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_blank_password_on_edit_keeps_existing() {
        let service = setup_test();
        let existing = service.get_user(2).await.unwrap();
        let mut fields = UserForm::from_source(&existing);
        fields.phone = "081211112222".to_string();

        let updated = service.update_user(2, fields).await.unwrap().item;
        assert_eq!(updated.password, existing.password);
        assert_eq!(updated.phone, "081211112222");
        assert_eq!(updated.created_at, existing.created_at);
        assert_ne!(updated.updated_at, existing.updated_at);
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let service = setup_test();
        let err = service.create_user(form("baru@pesantren.id", "123")).await.unwrap_err();
        match err {
            AdminError::Validation(errors) => assert!(errors.contains("password")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_by_role_and_delete() {
        let service = setup_test();
        let query = ListQuery {
            search: Some("bendahara-".to_string()),
            ..Default::default()
        };
        assert_eq!(service.list_users(&query).await.total_items, 3);

        service.delete_user(4).await.unwrap();
        assert_eq!(service.list_users(&query).await.total_items, 2);
        assert!(matches!(service.get_user(4).await, Err(AdminError::NotFound { id: 4, .. })));
    }
}
