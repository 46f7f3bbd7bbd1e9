use bcrypt::{DEFAULT_COST, hash, verify};
use serde::Serialize;
use validator::Validate;

use crate::auth;
use crate::domain::admin::{Admin, NewAdmin, UpdateAdmin};
use crate::forms::admins::{CreateAdminForm, LoginForm, UpdateAdminForm};
use crate::repository::{AdminReader, AdminWriter};
use crate::services::{ServiceError, ServiceResult};

/// Successful login payload.
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub admin: Admin,
}

/// Verifies the credentials and issues a signed token.
///
/// Unknown usernames and wrong passwords are indistinguishable to the caller.
pub fn login<R>(repo: &R, jwt_secret: &str, form: LoginForm) -> ServiceResult<LoginData>
where
    R: AdminReader + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let admin = repo
        .get_admin_by_username(&form.username)?
        .ok_or(ServiceError::Unauthorized)?;

    let valid = verify(&form.password, &admin.password_hash)
        .map_err(|err| ServiceError::Internal(format!("password verification failed: {err}")))?;
    if !valid {
        return Err(ServiceError::Unauthorized);
    }

    let token = auth::issue_token(admin.id, &admin.username, jwt_secret)
        .map_err(|err| ServiceError::Internal(format!("token issuing failed: {err}")))?;

    Ok(LoginData { token, admin })
}

/// Fetches all admin accounts.
pub fn list_admins<R>(repo: &R) -> ServiceResult<Vec<Admin>>
where
    R: AdminReader + ?Sized,
{
    Ok(repo.list_admins()?)
}

/// Creates a new admin account with a freshly hashed password.
pub fn create_admin<R>(repo: &R, form: CreateAdminForm) -> ServiceResult<Admin>
where
    R: AdminReader + AdminWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    if repo.get_admin_by_username(&form.username)?.is_some() {
        return Err(ServiceError::Conflict);
    }

    let password_hash = hash(&form.password, DEFAULT_COST)
        .map_err(|err| ServiceError::Internal(format!("password hashing failed: {err}")))?;

    let new_admin = NewAdmin::new(form.username, password_hash);

    Ok(repo.create_admin(&new_admin)?)
}

/// Updates an admin's username and/or password.
pub fn modify_admin<R>(repo: &R, admin_id: i32, form: UpdateAdminForm) -> ServiceResult<Admin>
where
    R: AdminWriter + ?Sized,
{
    let form = form
        .validated()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let mut update = UpdateAdmin::new();
    if let Some(username) = form.username {
        update = update.username(username);
    }
    if let Some(password) = form.password {
        let password_hash = hash(&password, DEFAULT_COST)
            .map_err(|err| ServiceError::Internal(format!("password hashing failed: {err}")))?;
        update = update.password_hash(password_hash);
    }

    Ok(repo.update_admin(admin_id, &update)?)
}

/// Deletes an admin account.
pub fn remove_admin<R>(repo: &R, admin_id: i32) -> ServiceResult<()>
where
    R: AdminWriter + ?Sized,
{
    Ok(repo.delete_admin(admin_id)?)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockAdminReader, MockAdminWriter};

    const SECRET: &str = "test-secret";

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn admin_with_password(id: i32, username: &str, password: &str) -> Admin {
        Admin {
            id,
            username: username.to_string(),
            password_hash: hash(password, 4).expect("hashing should succeed"),
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    #[test]
    fn login_issues_a_verifiable_token() {
        let mut repo = MockAdminReader::new();
        let stored = admin_with_password(3, "alice", "correct horse");

        repo.expect_get_admin_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let form = LoginForm {
            username: "alice".to_string(),
            password: "correct horse".to_string(),
        };

        let data = login(&repo, SECRET, form).expect("expected success");

        let claims = auth::verify_token(&data.token, SECRET).expect("token verifies");
        assert_eq!(claims.sub, 3);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn login_rejects_wrong_password() {
        let mut repo = MockAdminReader::new();
        let stored = admin_with_password(3, "alice", "correct horse");

        repo.expect_get_admin_by_username()
            .returning(move |_| Ok(Some(stored.clone())));

        let form = LoginForm {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        };

        let result = login(&repo, SECRET, form);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn login_rejects_unknown_username() {
        let mut repo = MockAdminReader::new();

        repo.expect_get_admin_by_username().returning(|_| Ok(None));

        let form = LoginForm {
            username: "nobody".to_string(),
            password: "whatever".to_string(),
        };

        let result = login(&repo, SECRET, form);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_admin_hashes_the_password() {
        struct FakeRepo {
            reader: MockAdminReader,
            writer: MockAdminWriter,
        }

        impl AdminReader for FakeRepo {
            fn get_admin_by_id(&self, id: i32) -> RepositoryResult<Option<Admin>> {
                self.reader.get_admin_by_id(id)
            }
            fn get_admin_by_username(&self, username: &str) -> RepositoryResult<Option<Admin>> {
                self.reader.get_admin_by_username(username)
            }
            fn list_admins(&self) -> RepositoryResult<Vec<Admin>> {
                self.reader.list_admins()
            }
        }

        impl AdminWriter for FakeRepo {
            fn create_admin(&self, new_admin: &NewAdmin) -> RepositoryResult<Admin> {
                self.writer.create_admin(new_admin)
            }
            fn update_admin(
                &self,
                admin_id: i32,
                updates: &UpdateAdmin,
            ) -> RepositoryResult<Admin> {
                self.writer.update_admin(admin_id, updates)
            }
            fn delete_admin(&self, admin_id: i32) -> RepositoryResult<()> {
                self.writer.delete_admin(admin_id)
            }
        }

        let mut repo = FakeRepo {
            reader: MockAdminReader::new(),
            writer: MockAdminWriter::new(),
        };

        repo.reader
            .expect_get_admin_by_username()
            .returning(|_| Ok(None));

        repo.writer
            .expect_create_admin()
            .times(1)
            .withf(|new_admin| {
                assert_eq!(new_admin.username, "manager");
                // The plaintext must never reach the repository.
                assert_ne!(new_admin.password_hash, "super secret pw");
                assert!(verify("super secret pw", &new_admin.password_hash).unwrap_or(false));
                true
            })
            .returning(|new_admin| {
                Ok(Admin {
                    id: 1,
                    username: new_admin.username.clone(),
                    password_hash: new_admin.password_hash.clone(),
                    created_at: datetime(),
                    updated_at: datetime(),
                })
            });

        let form = CreateAdminForm {
            username: "manager".to_string(),
            password: "super secret pw".to_string(),
        };

        let created = create_admin(&repo, form).expect("expected success");

        assert_eq!(created.username, "manager");
    }

    #[test]
    fn create_admin_rejects_duplicate_username() {
        struct FakeRepo {
            reader: MockAdminReader,
            writer: MockAdminWriter,
        }

        impl AdminReader for FakeRepo {
            fn get_admin_by_id(&self, id: i32) -> RepositoryResult<Option<Admin>> {
                self.reader.get_admin_by_id(id)
            }
            fn get_admin_by_username(&self, username: &str) -> RepositoryResult<Option<Admin>> {
                self.reader.get_admin_by_username(username)
            }
            fn list_admins(&self) -> RepositoryResult<Vec<Admin>> {
                self.reader.list_admins()
            }
        }

        impl AdminWriter for FakeRepo {
            fn create_admin(&self, new_admin: &NewAdmin) -> RepositoryResult<Admin> {
                self.writer.create_admin(new_admin)
            }
            fn update_admin(
                &self,
                admin_id: i32,
                updates: &UpdateAdmin,
            ) -> RepositoryResult<Admin> {
                self.writer.update_admin(admin_id, updates)
            }
            fn delete_admin(&self, admin_id: i32) -> RepositoryResult<()> {
                self.writer.delete_admin(admin_id)
            }
        }

        let mut repo = FakeRepo {
            reader: MockAdminReader::new(),
            writer: MockAdminWriter::new(),
        };

        let existing = admin_with_password(1, "manager", "pw123456");
        repo.reader
            .expect_get_admin_by_username()
            .returning(move |_| Ok(Some(existing.clone())));

        let form = CreateAdminForm {
            username: "manager".to_string(),
            password: "password123".to_string(),
        };

        let result = create_admin(&repo, form);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }
}
