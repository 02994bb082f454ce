use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::AuthError;

/// In-memory user store for tests and local runs.
///
/// Insert holds the write lock across the duplicate check and the append,
/// so uniqueness of username and email is enforced atomically, same as the
/// Postgres constraints.
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        let conflict = users.iter().any(|existing| {
            existing.username == user.username || existing.email == user.email
        });
        if conflict {
            return Err(AuthError::UserAlreadyExists);
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|user| user.username.as_str() == username)
            .cloned())
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|user| user.email.as_str() == email || user.username.as_str() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }
}
