use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a backend administrator account.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Admin {
    /// Unique identifier of the admin.
    pub id: i32,
    /// Unique login name.
    pub username: String,
    /// Bcrypt hash of the password; never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new admin account.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    /// Already-hashed password.
    pub password_hash: String,
}

impl NewAdmin {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// Patch data applied when updating an existing admin account.
#[derive(Debug, Clone)]
pub struct UpdateAdmin {
    pub username: Option<String>,
    /// Already-hashed replacement password.
    pub password_hash: Option<String>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateAdmin {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateAdmin {
    pub fn new() -> Self {
        Self {
            username: None,
            password_hash: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }
}
