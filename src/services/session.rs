use chrono::Utc;
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    db::{Storage, StorageKey},
    error::{AppError, AppResult},
    models::{Role, SessionUser, User},
};

pub const ADMIN_EMAIL: &str = "admin@moodwatch.app";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const ADMIN_ID: &str = "admin-001";

/// Youngest age accepted at signup
pub const MINIMUM_AGE: u32 = 13;

/// Signup form contents
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: u32,
}

/// The current identity of this service instance
///
/// Loaded from storage once at startup, then changed only by
/// [`login`](Self::login), [`signup`](Self::signup) and
/// [`logout`](Self::logout). Everything else reads it.
pub struct SessionStore {
    storage: Storage,
    current: RwLock<Option<SessionUser>>,
    // Serializes read-modify-write cycles on the user table
    write_lock: Mutex<()>,
}

impl SessionStore {
    /// Restores the persisted session, if any
    pub async fn load(storage: Storage) -> AppResult<Self> {
        let current: Option<SessionUser> = storage.read(StorageKey::Session).await?;

        match &current {
            Some(user) => tracing::info!(user_id = %user.id, "Restored saved session"),
            None => tracing::debug!("No saved session"),
        }

        Ok(Self {
            storage,
            current: RwLock::new(current),
            write_lock: Mutex::new(()),
        })
    }

    pub async fn current(&self) -> Option<SessionUser> {
        self.current.read().await.clone()
    }

    pub async fn users(&self) -> AppResult<Vec<User>> {
        self.storage.read_or_default(StorageKey::Users).await
    }

    /// Checks the built-in admin account first, then the user table.
    /// Emails are trimmed the same way signup stores them
    pub async fn login(&self, email: &str, password: &str) -> AppResult<SessionUser> {
        let email = email.trim();
        let _guard = self.write_lock.lock().await;

        if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
            tracing::info!("Admin signed in");
            return self.authenticate(admin_user()).await;
        }

        let users = self.users().await?;
        let user = users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or_else(|| AppError::Authentication("Invalid email or password.".to_string()))?;

        tracing::info!(user_id = %user.id, "User signed in");
        self.authenticate(SessionUser::from(user)).await
    }

    /// Creates an account and signs it in
    pub async fn signup(&self, new_user: NewUser) -> AppResult<SessionUser> {
        let name = new_user.name.trim();
        let email = new_user.email.trim();

        if name.is_empty() || email.is_empty() || new_user.password.is_empty() {
            return Err(AppError::InvalidInput(
                "Name, email and password are required.".to_string(),
            ));
        }
        if new_user.age < MINIMUM_AGE {
            return Err(AppError::InvalidInput(format!(
                "You must be at least {} years old to use this app.",
                MINIMUM_AGE
            )));
        }

        let _guard = self.write_lock.lock().await;

        let mut users = self.users().await?;
        if users.iter().any(|u| u.email == email) {
            tracing::debug!(email = %email, "Signup rejected, email taken");
            return Err(AppError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: new_user.password,
            age: Some(new_user.age),
            role: Role::User,
            created_at: Some(Utc::now()),
        };
        let session = SessionUser::from(&user);

        users.push(user);
        self.storage.write(StorageKey::Users, &users).await?;

        tracing::info!(user_id = %session.id, total_users = users.len(), "User signed up");
        self.authenticate(session).await
    }

    pub async fn logout(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.storage.remove(StorageKey::Session).await?;
        if let Some(user) = self.current.write().await.take() {
            tracing::info!(user_id = %user.id, "Signed out");
        }
        Ok(())
    }

    async fn authenticate(&self, user: SessionUser) -> AppResult<SessionUser> {
        self.storage.write(StorageKey::Session, &user).await?;
        *self.current.write().await = Some(user.clone());
        Ok(user)
    }
}

fn admin_user() -> SessionUser {
    SessionUser {
        id: ADMIN_ID.to_string(),
        name: "Admin".to_string(),
        email: ADMIN_EMAIL.to_string(),
        age: None,
        role: Role::Admin,
        created_at: None,
    }
}
