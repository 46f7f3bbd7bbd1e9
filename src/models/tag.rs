use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::tag::{
    NewTag as DomainNewTag, NewTagOption as DomainNewTagOption, Tag as DomainTag,
    TagOption as DomainTagOption, UpdateTag as DomainUpdateTag,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tags)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub required: bool,
    pub multi_select: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tags)]
pub struct NewTag<'a> {
    pub name: &'a str,
    pub required: bool,
    pub multi_select: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tags)]
pub struct UpdateTag<'a> {
    pub name: Option<&'a str>,
    pub required: Option<bool>,
    pub multi_select: Option<bool>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::tag_options,
    belongs_to(Tag, foreign_key = tag_id)
)]
pub struct TagOption {
    pub id: i32,
    pub tag_id: i32,
    pub value: String,
    pub is_default: bool,
    pub additional_price_cents: i64,
    pub recommendation_level: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tag_options)]
pub struct NewTagOption<'a> {
    pub tag_id: i32,
    pub value: &'a str,
    pub is_default: bool,
    pub additional_price_cents: i64,
    pub recommendation_level: i32,
}

impl Tag {
    /// Combine the row with its loaded options into the domain shape.
    pub fn into_domain(self, options: Vec<DomainTagOption>) -> DomainTag {
        DomainTag {
            id: self.id,
            name: self.name,
            required: self.required,
            multi_select: self.multi_select,
            options,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<TagOption> for DomainTagOption {
    fn from(value: TagOption) -> Self {
        Self {
            id: value.id,
            tag_id: value.tag_id,
            value: value.value,
            is_default: value.is_default,
            additional_price_cents: value.additional_price_cents,
            recommendation_level: value.recommendation_level,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewTag> for NewTag<'a> {
    fn from(value: &'a DomainNewTag) -> Self {
        Self {
            name: value.name.as_str(),
            required: value.required,
            multi_select: value.multi_select,
        }
    }
}

impl<'a> NewTagOption<'a> {
    /// Bind a domain option payload to its owning tag row.
    pub fn from_domain(tag_id: i32, value: &'a DomainNewTagOption) -> Self {
        Self {
            tag_id,
            value: value.value.as_str(),
            is_default: value.is_default,
            additional_price_cents: value.additional_price_cents,
            recommendation_level: value.recommendation_level,
        }
    }
}

impl<'a> From<&'a DomainUpdateTag> for UpdateTag<'a> {
    fn from(value: &'a DomainUpdateTag) -> Self {
        Self {
            name: value.name.as_deref(),
            required: value.required,
            multi_select: value.multi_select,
            updated_at: value.updated_at,
        }
    }
}
