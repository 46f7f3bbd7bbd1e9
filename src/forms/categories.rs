use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::sanitize_inline_text;

/// Maximum allowed length for a category name.
const NAME_MAX_LEN: usize = 50;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("category name cannot be empty")]
    EmptyName,
}

/// JSON payload submitted when creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
}

impl CreateCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let sanitized = sanitize_inline_text(&self.name);
        if sanitized.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        Ok(NewCategory::new(sanitized))
    }
}

/// JSON payload submitted when renaming a category.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
}

impl UpdateCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> CategoryFormResult<UpdateCategory> {
        self.validate()?;

        let sanitized = sanitize_inline_text(&self.name);
        if sanitized.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        Ok(UpdateCategory::new(sanitized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_category_form_sanitizes_name() {
        let form = CreateCategoryForm {
            name: "  Fresh\tBreads  ".to_string(),
        };

        let new_category = form.into_new_category().expect("expected success");

        assert_eq!(new_category.name, "Fresh Breads");
    }

    #[test]
    fn create_category_form_rejects_blank_name() {
        let form = CreateCategoryForm {
            name: " \t ".to_string(),
        };

        let result = form.into_new_category();

        assert!(matches!(result, Err(CategoryFormError::EmptyName)));
    }

    #[test]
    fn create_category_form_rejects_overlong_name() {
        let form = CreateCategoryForm {
            name: "x".repeat(NAME_MAX_LEN + 1),
        };

        let result = form.into_new_category();

        assert!(matches!(result, Err(CategoryFormError::Validation(_))));
    }
}
