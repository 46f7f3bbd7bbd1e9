use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::tag::{
    NewTag as DomainNewTag, NewTagOption as DomainNewTagOption, Tag as DomainTag, TagListQuery,
    TagOption as DomainTagOption, UpdateTag as DomainUpdateTag,
};
use crate::models::tag::{
    NewTag as DbNewTag, NewTagOption as DbNewTagOption, Tag as DbTag, TagOption as DbTagOption,
    UpdateTag as DbUpdateTag,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TagReader, TagWriter};

impl TagReader for DieselRepository {
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<DomainTag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let tag = tags::table
            .filter(tags::id.eq(id))
            .first::<DbTag>(&mut conn)
            .optional()?;

        if let Some(db_tag) = tag {
            let mut option_map = load_options_for_tags(&mut conn, &[db_tag.id])?;
            let options = option_map.remove(&db_tag.id).unwrap_or_default();
            Ok(Some(db_tag.into_domain(options)))
        } else {
            Ok(None)
        }
    }

    fn list_tags(&self, query: TagListQuery) -> RepositoryResult<(usize, Vec<DomainTag>)> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let mut count_query = tags::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(search) = query.search.as_ref() {
            let pattern = format!("%{}%", search);
            count_query = count_query.filter(tags::name.like(pattern));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items_query = tags::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(search) = query.search.as_ref() {
            let pattern = format!("%{}%", search);
            items_query = items_query.filter(tags::name.like(pattern));
        }

        items_query = items_query.order(tags::name.asc());

        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1);
            let per_page = pagination.per_page as i64;
            let offset = ((page - 1) * pagination.per_page) as i64;
            items_query = items_query.offset(offset).limit(per_page);
        }

        let db_tags = items_query.load::<DbTag>(&mut conn)?;

        let tag_ids: Vec<i32> = db_tags.iter().map(|tag| tag.id).collect();
        let mut option_map = load_options_for_tags(&mut conn, &tag_ids)?;

        let tags = db_tags
            .into_iter()
            .map(|tag| {
                let options = option_map.remove(&tag.id).unwrap_or_default();
                tag.into_domain(options)
            })
            .collect();

        Ok((total, tags))
    }

    fn get_option_by_id(&self, option_id: i32) -> RepositoryResult<Option<DomainTagOption>> {
        use crate::schema::tag_options;

        let mut conn = self.conn()?;
        let option = tag_options::table
            .filter(tag_options::id.eq(option_id))
            .first::<DbTagOption>(&mut conn)
            .optional()?;

        Ok(option.map(DomainTagOption::from))
    }
}

impl TagWriter for DieselRepository {
    fn create_tag(
        &self,
        new_tag: &DomainNewTag,
        options: &[DomainNewTagOption],
    ) -> RepositoryResult<DomainTag> {
        use crate::schema::{tag_options, tags};

        let mut conn = self.conn()?;

        let created = conn.transaction::<(DbTag, Vec<DbTagOption>), diesel::result::Error, _>(
            |conn| {
                let insertable = DbNewTag::from(new_tag);
                let created = diesel::insert_into(tags::table)
                    .values(&insertable)
                    .get_result::<DbTag>(conn)?;

                let mut created_options = Vec::with_capacity(options.len());
                for option in options {
                    let row = diesel::insert_into(tag_options::table)
                        .values(&DbNewTagOption::from_domain(created.id, option))
                        .get_result::<DbTagOption>(conn)?;
                    created_options.push(row);
                }

                Ok((created, created_options))
            },
        )?;

        let (tag, options) = created;
        Ok(tag.into_domain(options.into_iter().map(DomainTagOption::from).collect()))
    }

    fn update_tag(&self, tag_id: i32, updates: &DomainUpdateTag) -> RepositoryResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateTag::from(updates);

        let target = tags::table.filter(tags::id.eq(tag_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbTag>(&mut conn)?;

        let mut option_map = load_options_for_tags(&mut conn, &[updated.id])?;
        let options = option_map.remove(&updated.id).unwrap_or_default();

        Ok(updated.into_domain(options))
    }

    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()> {
        use crate::schema::{product_tags, tag_options, tags};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let in_use: i64 = product_tags::table
                .filter(product_tags::tag_id.eq(tag_id))
                .count()
                .get_result(conn)?;
            if in_use > 0 {
                return Err(RepositoryError::InUse);
            }

            diesel::delete(tag_options::table.filter(tag_options::tag_id.eq(tag_id)))
                .execute(conn)?;

            let deleted =
                diesel::delete(tags::table.filter(tags::id.eq(tag_id))).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }

    fn add_tag_option(
        &self,
        tag_id: i32,
        option: &DomainNewTagOption,
    ) -> RepositoryResult<DomainTagOption> {
        use crate::schema::tag_options;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(tag_options::table)
            .values(&DbNewTagOption::from_domain(tag_id, option))
            .get_result::<DbTagOption>(&mut conn)?;

        Ok(created.into())
    }

    fn delete_tag_option(&self, tag_id: i32, option_id: i32) -> RepositoryResult<()> {
        use crate::schema::{product_tag_options, tag_options};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(
                product_tag_options::table.filter(product_tag_options::option_id.eq(option_id)),
            )
            .execute(conn)?;

            let deleted = diesel::delete(
                tag_options::table
                    .filter(tag_options::id.eq(option_id))
                    .filter(tag_options::tag_id.eq(tag_id)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

/// Batch-load the options for a set of tags, keyed by tag id.
pub(crate) fn load_options_for_tags(
    conn: &mut SqliteConnection,
    tag_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainTagOption>>> {
    use crate::schema::tag_options;

    if tag_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = tag_options::table
        .filter(tag_options::tag_id.eq_any(tag_ids))
        .order(tag_options::id.asc())
        .load::<DbTagOption>(conn)?;

    let mut map: HashMap<i32, Vec<DomainTagOption>> = HashMap::new();
    for row in rows {
        map.entry(row.tag_id).or_default().push(row.into());
    }

    Ok(map)
}
