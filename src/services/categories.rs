use crate::domain::category::Category;
use crate::forms::categories::{CreateCategoryForm, UpdateCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Fetches all categories ordered by name.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    Ok(repo.list_categories()?)
}

/// Fetches a single category.
pub fn get_category<R>(repo: &R, category_id: i32) -> ServiceResult<Category>
where
    R: CategoryReader + ?Sized,
{
    repo.get_category_by_id(category_id)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a new category. A duplicate name surfaces as a conflict from the
/// unique constraint.
pub fn create_category<R>(repo: &R, form: CreateCategoryForm) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    Ok(repo.create_category(&new_category)?)
}

/// Renames an existing category.
pub fn modify_category<R>(
    repo: &R,
    category_id: i32,
    form: UpdateCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let update = form
        .into_update_category()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    Ok(repo.update_category(category_id, &update)?)
}

/// Deletes a category. Products referencing it keep existing with their
/// category reference cleared.
pub fn remove_category<R>(repo: &R, category_id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    Ok(repo.delete_category(category_id)?)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockCategoryWriter;

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    #[test]
    fn create_category_sanitizes_and_persists() {
        let mut repo = MockCategoryWriter::new();

        repo.expect_create_category()
            .times(1)
            .withf(|new_category| {
                assert_eq!(new_category.name, "Cakes");
                true
            })
            .returning(|_| Ok(sample_category(1, "Cakes")));

        let form = CreateCategoryForm {
            name: "  Cakes ".to_string(),
        };

        let created = create_category(&repo, form).expect("expected success");

        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Cakes");
    }

    #[test]
    fn create_duplicate_category_is_a_conflict() {
        let mut repo = MockCategoryWriter::new();

        repo.expect_create_category()
            .times(1)
            .returning(|_| Err(RepositoryError::Conflict));

        let form = CreateCategoryForm {
            name: "Cakes".to_string(),
        };

        let result = create_category(&repo, form);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn remove_missing_category_is_not_found() {
        let mut repo = MockCategoryWriter::new();

        repo.expect_delete_category()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let result = remove_category(&repo, 404);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
