use std::collections::HashMap;

use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("email already registered")]
    EmailTaken,
}

/// In-memory account store keyed by normalized email.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a user by email.
    #[cfg(test)]
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }

    /// Create a new user. The email check and the insert happen under one
    /// write lock.
    pub async fn create(&self, new: NewUser) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.contains_key(&new.email) {
            return Err(RepoError::EmailTaken);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            name: new.name,
            role: new.role,
            shop_name: new.shop_name,
            password_hash: new.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    #[cfg(test)]
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}
