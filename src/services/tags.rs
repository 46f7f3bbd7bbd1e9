use serde::Deserialize;

use crate::domain::tag::{Tag, TagListQuery, TagOption};
use crate::forms::tags::{CreateTagForm, TagOptionForm, UpdateTagForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{TagReader, TagWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the tag listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TagsQuery {
    /// Optional case-insensitive search applied to tag names.
    pub search: Option<String>,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Fetches a page of tags with their options.
pub fn list_tags<R>(repo: &R, query: TagsQuery) -> ServiceResult<Paginated<Tag>>
where
    R: TagReader + ?Sized,
{
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
        .clamp(1, 100);

    let mut list_query = TagListQuery::new().paginate(page, per_page);
    if let Some(term) = query.search.as_ref() {
        list_query = list_query.search(term);
    }

    let (total, tags) = repo.list_tags(list_query)?;

    Ok(Paginated::new(tags, total, page, per_page))
}

/// Fetches a single tag with its options.
pub fn get_tag<R>(repo: &R, tag_id: i32) -> ServiceResult<Tag>
where
    R: TagReader + ?Sized,
{
    repo.get_tag_by_id(tag_id)?.ok_or(ServiceError::NotFound)
}

/// Creates a tag together with its options.
pub fn create_tag<R>(repo: &R, form: CreateTagForm) -> ServiceResult<Tag>
where
    R: TagWriter + ?Sized,
{
    let (new_tag, options) = form
        .into_new_tag()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    Ok(repo.create_tag(&new_tag, &options)?)
}

/// Updates a tag's name or selection policy.
pub fn modify_tag<R>(repo: &R, tag_id: i32, form: UpdateTagForm) -> ServiceResult<Tag>
where
    R: TagWriter + ?Sized,
{
    let update = form
        .into_update_tag()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    Ok(repo.update_tag(tag_id, &update)?)
}

/// Deletes a tag and its options. Tags still attached to products are
/// rejected with a conflict rather than silently rewriting those products.
pub fn remove_tag<R>(repo: &R, tag_id: i32) -> ServiceResult<()>
where
    R: TagWriter + ?Sized,
{
    Ok(repo.delete_tag(tag_id)?)
}

/// Adds an option to an existing tag.
pub fn add_tag_option<R>(repo: &R, tag_id: i32, form: TagOptionForm) -> ServiceResult<TagOption>
where
    R: TagReader + TagWriter + ?Sized,
{
    if repo.get_tag_by_id(tag_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let option = form
        .into_new_option()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    Ok(repo.add_tag_option(tag_id, &option)?)
}

/// Removes an option from a tag, cleaning up any product selections of it.
pub fn remove_tag_option<R>(repo: &R, tag_id: i32, option_id: i32) -> ServiceResult<()>
where
    R: TagWriter + ?Sized,
{
    Ok(repo.delete_tag_option(tag_id, option_id)?)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockTagWriter;

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_tag(id: i32, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
            required: true,
            multi_select: false,
            options: Vec::new(),
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    #[test]
    fn create_tag_validates_and_persists() {
        let mut repo = MockTagWriter::new();

        repo.expect_create_tag()
            .times(1)
            .withf(|new_tag, options| {
                assert_eq!(new_tag.name, "Sweetness");
                assert!(new_tag.required);
                assert_eq!(options.len(), 1);
                assert_eq!(options[0].value, "Less sweet");
                true
            })
            .returning(|_, _| Ok(sample_tag(1, "Sweetness")));

        let form = CreateTagForm {
            name: "  Sweetness ".to_string(),
            required: None,
            multi_select: None,
            options: vec![TagOptionForm {
                value: " Less sweet ".to_string(),
                is_default: false,
                additional_price: None,
                recommendation_level: 1,
            }],
        };

        let created = create_tag(&repo, form).expect("expected success");

        assert_eq!(created.id, 1);
    }

    #[test]
    fn create_tag_returns_validation_error_for_blank_name() {
        let repo = MockTagWriter::new();

        let form = CreateTagForm {
            name: "   ".to_string(),
            required: None,
            multi_select: None,
            options: Vec::new(),
        };

        let result = create_tag(&repo, form);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn remove_tag_propagates_in_use_conflict() {
        let mut repo = MockTagWriter::new();

        repo.expect_delete_tag()
            .times(1)
            .returning(|_| Err(RepositoryError::InUse));

        let result = remove_tag(&repo, 3);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn remove_missing_tag_is_not_found() {
        let mut repo = MockTagWriter::new();

        repo.expect_delete_tag()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let result = remove_tag(&repo, 404);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
