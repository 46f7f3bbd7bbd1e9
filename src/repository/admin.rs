use diesel::prelude::*;

use crate::domain::admin::{
    Admin as DomainAdmin, NewAdmin as DomainNewAdmin, UpdateAdmin as DomainUpdateAdmin,
};
use crate::models::admin::{
    Admin as DbAdmin, NewAdmin as DbNewAdmin, UpdateAdmin as DbUpdateAdmin,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AdminReader, AdminWriter, DieselRepository};

impl AdminReader for DieselRepository {
    fn get_admin_by_id(&self, id: i32) -> RepositoryResult<Option<DomainAdmin>> {
        use crate::schema::admins;

        let mut conn = self.conn()?;
        let admin = admins::table
            .filter(admins::id.eq(id))
            .first::<DbAdmin>(&mut conn)
            .optional()?;

        Ok(admin.map(DomainAdmin::from))
    }

    fn get_admin_by_username(&self, username: &str) -> RepositoryResult<Option<DomainAdmin>> {
        use crate::schema::admins;

        let mut conn = self.conn()?;
        let admin = admins::table
            .filter(admins::username.eq(username))
            .first::<DbAdmin>(&mut conn)
            .optional()?;

        Ok(admin.map(DomainAdmin::from))
    }

    fn list_admins(&self) -> RepositoryResult<Vec<DomainAdmin>> {
        use crate::schema::admins;

        let mut conn = self.conn()?;
        let rows = admins::table
            .order(admins::username.asc())
            .load::<DbAdmin>(&mut conn)?;

        Ok(rows.into_iter().map(DomainAdmin::from).collect())
    }
}

impl AdminWriter for DieselRepository {
    fn create_admin(&self, new_admin: &DomainNewAdmin) -> RepositoryResult<DomainAdmin> {
        use crate::schema::admins;

        let mut conn = self.conn()?;
        let insertable = DbNewAdmin::from(new_admin);

        let created = diesel::insert_into(admins::table)
            .values(&insertable)
            .get_result::<DbAdmin>(&mut conn)?;

        Ok(created.into())
    }

    fn update_admin(
        &self,
        admin_id: i32,
        updates: &DomainUpdateAdmin,
    ) -> RepositoryResult<DomainAdmin> {
        use crate::schema::admins;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateAdmin::from(updates);

        let target = admins::table.filter(admins::id.eq(admin_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbAdmin>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_admin(&self, admin_id: i32) -> RepositoryResult<()> {
        use crate::schema::admins;

        let mut conn = self.conn()?;
        let deleted =
            diesel::delete(admins::table.filter(admins::id.eq(admin_id))).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
