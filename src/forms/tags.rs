use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::tag::{NewTag, NewTagOption, UpdateTag};
use crate::forms::sanitize_inline_text;

/// Maximum allowed length for tag names and option values.
const NAME_MAX_LEN: usize = 50;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

pub type TagFormResult<T> = Result<T, TagFormError>;

/// Errors that can occur while processing tag forms.
#[derive(Debug, Error)]
pub enum TagFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("tag name cannot be empty")]
    EmptyName,
    #[error("option value cannot be empty")]
    EmptyOptionValue,
    #[error("option price must be a non-negative amount with at most two decimals")]
    InvalidOptionPrice,
    #[error("nothing to update")]
    EmptyUpdate,
}

/// One option entry of a tag creation payload.
#[derive(Debug, Deserialize, Validate)]
pub struct TagOptionForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub value: String,
    #[serde(default)]
    pub is_default: bool,
    /// Decimal price delta, e.g. `1.50`. Defaults to zero.
    pub additional_price: Option<String>,
    #[validate(range(min = -2, max = 2))]
    #[serde(default)]
    pub recommendation_level: i32,
}

impl TagOptionForm {
    /// Validates and sanitizes the payload into a domain `NewTagOption`.
    pub fn into_new_option(self) -> TagFormResult<NewTagOption> {
        self.validate()?;

        let value = sanitize_inline_text(&self.value);
        if value.is_empty() {
            return Err(TagFormError::EmptyOptionValue);
        }

        let additional_price_cents = match self.additional_price.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_non_negative_cents(raw)?,
            _ => 0,
        };

        let mut option = NewTagOption::new(value)
            .with_additional_price_cents(additional_price_cents)
            .with_recommendation_level(self.recommendation_level);
        if self.is_default {
            option = option.default_option();
        }

        Ok(option)
    }
}

/// JSON payload submitted when creating a tag together with its options.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTagForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Whether customers must select at least one option. Defaults to true,
    /// matching the schema default.
    pub required: Option<bool>,
    /// Whether several options may be selected at once. Defaults to false.
    pub multi_select: Option<bool>,
    #[serde(default)]
    pub options: Vec<TagOptionForm>,
}

impl CreateTagForm {
    /// Validates and sanitizes the payload into a domain tag plus options.
    pub fn into_new_tag(self) -> TagFormResult<(NewTag, Vec<NewTagOption>)> {
        self.validate()?;

        let sanitized = sanitize_inline_text(&self.name);
        if sanitized.is_empty() {
            return Err(TagFormError::EmptyName);
        }

        let new_tag = NewTag::new(
            sanitized,
            self.required.unwrap_or(true),
            self.multi_select.unwrap_or(false),
        );

        let options = self
            .options
            .into_iter()
            .map(TagOptionForm::into_new_option)
            .collect::<TagFormResult<Vec<_>>>()?;

        Ok((new_tag, options))
    }
}

/// JSON payload submitted when updating a tag.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTagForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    pub required: Option<bool>,
    pub multi_select: Option<bool>,
}

impl UpdateTagForm {
    /// Validates and sanitizes the payload into a domain `UpdateTag`.
    pub fn into_update_tag(self) -> TagFormResult<UpdateTag> {
        self.validate()?;

        if self.name.is_none() && self.required.is_none() && self.multi_select.is_none() {
            return Err(TagFormError::EmptyUpdate);
        }

        let mut update = UpdateTag::new();

        if let Some(name) = self.name {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(TagFormError::EmptyName);
            }
            update = update.name(sanitized);
        }

        if let Some(required) = self.required {
            update = update.required(required);
        }

        if let Some(multi_select) = self.multi_select {
            update = update.multi_select(multi_select);
        }

        Ok(update)
    }
}

fn parse_non_negative_cents(raw: &str) -> TagFormResult<i64> {
    let trimmed = raw.trim();
    let (whole, frac) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };

    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(TagFormError::InvalidOptionPrice);
    }
    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(TagFormError::InvalidOptionPrice);
    }

    let whole: i64 = whole
        .parse()
        .map_err(|_| TagFormError::InvalidOptionPrice)?;
    let frac_cents = match frac.len() {
        0 => 0,
        1 => {
            frac.parse::<i64>()
                .map_err(|_| TagFormError::InvalidOptionPrice)?
                * 10
        }
        _ => frac
            .parse::<i64>()
            .map_err(|_| TagFormError::InvalidOptionPrice)?,
    };

    whole
        .checked_mul(100)
        .and_then(|value| value.checked_add(frac_cents))
        .ok_or(TagFormError::InvalidOptionPrice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_tag_form_converts_with_options() {
        let form = CreateTagForm {
            name: "  Sweetness ".to_string(),
            required: None,
            multi_select: Some(false),
            options: vec![
                TagOptionForm {
                    value: "Regular".to_string(),
                    is_default: true,
                    additional_price: None,
                    recommendation_level: 1,
                },
                TagOptionForm {
                    value: "Less sweet".to_string(),
                    is_default: false,
                    additional_price: Some("0.50".to_string()),
                    recommendation_level: 0,
                },
            ],
        };

        let (new_tag, options) = form.into_new_tag().expect("expected success");

        assert_eq!(new_tag.name, "Sweetness");
        assert!(new_tag.required);
        assert!(!new_tag.multi_select);
        assert_eq!(options.len(), 2);
        assert!(options[0].is_default);
        assert_eq!(options[0].additional_price_cents, 0);
        assert_eq!(options[1].additional_price_cents, 50);
    }

    #[test]
    fn create_tag_form_rejects_out_of_range_recommendation() {
        let form = CreateTagForm {
            name: "Ice".to_string(),
            required: None,
            multi_select: None,
            options: vec![TagOptionForm {
                value: "Extra".to_string(),
                is_default: false,
                additional_price: None,
                recommendation_level: 3,
            }],
        };

        assert!(matches!(
            form.into_new_tag(),
            Err(TagFormError::Validation(_))
        ));
    }

    #[test]
    fn create_tag_form_rejects_negative_option_price() {
        let form = CreateTagForm {
            name: "Toppings".to_string(),
            required: None,
            multi_select: Some(true),
            options: vec![TagOptionForm {
                value: "Pearls".to_string(),
                is_default: false,
                additional_price: Some("-1".to_string()),
                recommendation_level: 0,
            }],
        };

        assert!(matches!(
            form.into_new_tag(),
            Err(TagFormError::InvalidOptionPrice)
        ));
    }

    #[test]
    fn update_tag_form_rejects_empty_update() {
        let form = UpdateTagForm {
            name: None,
            required: None,
            multi_select: None,
        };

        assert!(matches!(
            form.into_update_tag(),
            Err(TagFormError::EmptyUpdate)
        ));
    }
}
