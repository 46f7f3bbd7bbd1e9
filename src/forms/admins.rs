use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

pub type AdminFormResult<T> = Result<T, AdminFormError>;

/// Errors that can occur while processing admin forms.
#[derive(Debug, Error)]
pub enum AdminFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("nothing to update")]
    EmptyUpdate,
}

/// JSON payload submitted when logging in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// JSON payload submitted when creating an admin account.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminForm {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// JSON payload submitted when updating an admin account.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAdminForm {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
}

impl UpdateAdminForm {
    /// Validate the payload, rejecting updates that change nothing.
    pub fn validated(self) -> AdminFormResult<Self> {
        self.validate()?;
        if self.username.is_none() && self.password.is_none() {
            return Err(AdminFormError::EmptyUpdate);
        }
        Ok(self)
    }
}
