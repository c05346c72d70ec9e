// ABOUTME: User account administration
// ABOUTME: Admin-only list/create/delete; authentication itself is external

use std::sync::Arc;

use tracing::info;

use letterhead_core::{Actor, User, UserCreateInput, ValidationError};
use letterhead_storage::UserStorage;

use crate::error::{DocumentsError, DocumentsResult};
use crate::policy::ensure_admin;

pub struct UsersService {
    users: Arc<UserStorage>,
}

impl UsersService {
    pub fn new(users: Arc<UserStorage>) -> Self {
        Self { users }
    }

    pub async fn create_user(
        &self,
        actor: &Actor,
        input: UserCreateInput,
    ) -> DocumentsResult<User> {
        ensure_admin(actor)?;

        let mut errors = Vec::new();
        if input.name.trim().is_empty() {
            errors.push(ValidationError::new("name", "Name is required"));
        }
        if input.email.trim().is_empty() || !input.email.contains('@') {
            errors.push(ValidationError::new("email", "A valid email is required"));
        }
        if !errors.is_empty() {
            return Err(DocumentsError::Validation(errors));
        }

        let user = self.users.create(input).await?;
        info!("Created user '{}' ({})", user.email, user.id);
        Ok(user)
    }

    pub async fn get_user(&self, actor: &Actor, id: &str) -> DocumentsResult<User> {
        ensure_admin(actor)?;
        self.users
            .get(id)
            .await?
            .ok_or(DocumentsError::NotFound("User"))
    }

    pub async fn list_users(&self, actor: &Actor) -> DocumentsResult<Vec<User>> {
        ensure_admin(actor)?;
        Ok(self.users.list().await?)
    }

    pub async fn delete_user(&self, actor: &Actor, id: &str) -> DocumentsResult<()> {
        ensure_admin(actor)?;
        if actor.id == id {
            return Err(DocumentsError::validation(
                "id",
                "Administrators cannot delete their own account",
            ));
        }
        self.users.delete(id).await?;
        info!("Deleted user {}", id);
        Ok(())
    }
}
