use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::admin::{
    Admin as DomainAdmin, NewAdmin as DomainNewAdmin, UpdateAdmin as DomainUpdateAdmin,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::admins)]
pub struct Admin {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::admins)]
pub struct NewAdmin<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::admins)]
pub struct UpdateAdmin<'a> {
    pub username: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Admin> for DomainAdmin {
    fn from(value: Admin) -> Self {
        Self {
            id: value.id,
            username: value.username,
            password_hash: value.password_hash,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewAdmin> for NewAdmin<'a> {
    fn from(value: &'a DomainNewAdmin) -> Self {
        Self {
            username: value.username.as_str(),
            password_hash: value.password_hash.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateAdmin> for UpdateAdmin<'a> {
    fn from(value: &'a DomainUpdateAdmin) -> Self {
        Self {
            username: value.username.as_deref(),
            password_hash: value.password_hash.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
