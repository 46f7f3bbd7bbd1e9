use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pagination::Pagination;

/// A named attribute customers pick options for when ordering a product,
/// e.g. "sweetness" with options "regular" and "less sweet".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Unique identifier of the tag.
    pub id: i32,
    /// Human-readable name of the tag.
    pub name: String,
    /// Whether customers must select at least one option.
    pub required: bool,
    /// Whether more than one option may be selected.
    pub multi_select: bool,
    /// Options belonging to this tag.
    pub options: Vec<TagOption>,
    /// Timestamp for when the tag record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the tag record.
    pub updated_at: NaiveDateTime,
}

/// One selectable value under a tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagOption {
    /// Unique identifier of the option.
    pub id: i32,
    /// Owning tag identifier.
    pub tag_id: i32,
    /// Value label shown to customers.
    pub value: String,
    /// Whether the option is preselected.
    pub is_default: bool,
    /// Price delta in cents added when the option is selected.
    pub additional_price_cents: i64,
    /// Recommendation weight from -2 (strongly discouraged) to 2 (strongly
    /// recommended).
    pub recommendation_level: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Violations of a tag's selection policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagPolicyError {
    #[error("option {option_id} does not belong to tag {tag_id}")]
    UnknownOption { tag_id: i32, option_id: i32 },
    #[error("tag {tag_id} requires at least one selected option")]
    RequiredTag { tag_id: i32 },
    #[error("tag {tag_id} allows only a single selected option")]
    SingleSelect { tag_id: i32 },
}

impl Tag {
    /// Check a proposed option selection against this tag's policy.
    ///
    /// Pure check against the tag's own option set; safe to call repeatedly
    /// and concurrently.
    pub fn validate_selection(&self, option_ids: &[i32]) -> Result<(), TagPolicyError> {
        let known: HashSet<i32> = self.options.iter().map(|option| option.id).collect();
        for &option_id in option_ids {
            if !known.contains(&option_id) {
                return Err(TagPolicyError::UnknownOption {
                    tag_id: self.id,
                    option_id,
                });
            }
        }

        if self.required && option_ids.is_empty() {
            return Err(TagPolicyError::RequiredTag { tag_id: self.id });
        }

        if !self.multi_select && option_ids.len() > 1 {
            return Err(TagPolicyError::SingleSelect { tag_id: self.id });
        }

        Ok(())
    }
}

/// A tag attachment request carrying the option ids selected for a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagSelection {
    pub tag_id: i32,
    pub option_ids: Vec<i32>,
}

impl TagSelection {
    pub fn new(tag_id: i32, option_ids: impl Into<Vec<i32>>) -> Self {
        Self {
            tag_id,
            option_ids: option_ids.into(),
        }
    }
}

/// Payload required to insert a new tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub required: bool,
    pub multi_select: bool,
}

impl NewTag {
    /// Construct a new tag payload with a trimmed name.
    pub fn new(name: impl Into<String>, required: bool, multi_select: bool) -> Self {
        let name = name.into().trim().to_string();
        Self {
            name,
            required,
            multi_select,
        }
    }
}

/// Payload required to insert a new option under a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTagOption {
    pub value: String,
    pub is_default: bool,
    pub additional_price_cents: i64,
    pub recommendation_level: i32,
}

impl NewTagOption {
    /// Construct an option payload with the defaults used by plain options.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_default: false,
            additional_price_cents: 0,
            recommendation_level: 0,
        }
    }

    /// Mark the option as preselected.
    pub fn default_option(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Attach a price delta in cents.
    pub fn with_additional_price_cents(mut self, cents: i64) -> Self {
        self.additional_price_cents = cents;
        self
    }

    /// Attach a recommendation weight.
    pub fn with_recommendation_level(mut self, level: i32) -> Self {
        self.recommendation_level = level;
        self
    }
}

/// Patch data applied when updating an existing tag.
#[derive(Debug, Clone)]
pub struct UpdateTag {
    pub name: Option<String>,
    pub required: Option<bool>,
    pub multi_select: Option<bool>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateTag {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateTag {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            name: None,
            required: None,
            multi_select: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn multi_select(mut self, multi_select: bool) -> Self {
        self.multi_select = Some(multi_select);
        self
    }
}

/// Query definition used to list tags.
#[derive(Debug, Clone, Default)]
pub struct TagListQuery {
    /// Optional case-insensitive substring search applied to the tag name.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl TagListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by a search term applied to the tag name.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
