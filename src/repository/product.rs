use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
    UpdateProduct as DomainUpdateProduct,
};
use crate::domain::tag::{Tag as DomainTag, TagOption as DomainTagOption, TagSelection};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::models::product_tag::{NewProductTag, NewProductTagOption};
use crate::models::tag::{Tag as DbTag, TagOption as DbTagOption};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::tag::load_options_for_tags;
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, product_id: &str) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::product_id.eq(product_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(DomainProduct::from))
    }

    fn get_product_by_name(&self, name: &str) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::name.eq(name))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(DomainProduct::from))
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut count_query = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern)),
            );
        }

        if let Some(category_id) = query.category_id {
            count_query = count_query.filter(products::category_id.eq(category_id));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern)),
            );
        }

        if let Some(category_id) = query.category_id {
            items = items.filter(products::category_id.eq(category_id));
        }

        items = items.order(products::created_at.desc());

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;
        let products = db_products.into_iter().map(DomainProduct::from).collect();

        Ok((total, products))
    }

    fn list_product_tags(&self, product_id: &str) -> RepositoryResult<Vec<DomainTag>> {
        use crate::schema::{product_tags, tags};

        let mut conn = self.conn()?;
        let db_tags = product_tags::table
            .inner_join(tags::table)
            .filter(product_tags::product_id.eq(product_id))
            .order(tags::name.asc())
            .select(DbTag::as_select())
            .load::<DbTag>(&mut conn)?;

        let tag_ids: Vec<i32> = db_tags.iter().map(|tag| tag.id).collect();
        let mut option_map = load_options_for_tags(&mut conn, &tag_ids)?;

        Ok(db_tags
            .into_iter()
            .map(|tag| {
                let options = option_map.remove(&tag.id).unwrap_or_default();
                tag.into_domain(options)
            })
            .collect())
    }

    fn list_product_tag_options(
        &self,
        product_id: &str,
        tag_id: i32,
    ) -> RepositoryResult<Vec<DomainTagOption>> {
        use crate::schema::{product_tag_options, tag_options};

        let mut conn = self.conn()?;
        let rows = product_tag_options::table
            .inner_join(tag_options::table)
            .filter(product_tag_options::product_id.eq(product_id))
            .filter(tag_options::tag_id.eq(tag_id))
            .order(tag_options::id.asc())
            .select(DbTagOption::as_select())
            .load::<DbTagOption>(&mut conn)?;

        Ok(rows.into_iter().map(DomainTagOption::from).collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(
        &self,
        new_product: &DomainNewProduct,
        selections: &[TagSelection],
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let created = conn.transaction::<DbProduct, diesel::result::Error, _>(|conn| {
            let db_new = DbNewProduct::from(new_product);
            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            insert_tag_selections(conn, &created.product_id, selections)?;

            Ok(created)
        })?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: &str,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let target = products::table.filter(products::product_id.eq(product_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_product(&self, product_id: &str) -> RepositoryResult<()> {
        use crate::schema::{product_tag_options, product_tags, products};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(
                product_tag_options::table
                    .filter(product_tag_options::product_id.eq(product_id)),
            )
            .execute(conn)?;

            diesel::delete(product_tags::table.filter(product_tags::product_id.eq(product_id)))
                .execute(conn)?;

            let deleted =
                diesel::delete(products::table.filter(products::product_id.eq(product_id)))
                    .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }

    fn add_product_tags(
        &self,
        product_id: &str,
        selections: &[TagSelection],
    ) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        conn.transaction::<(), diesel::result::Error, _>(|conn| {
            insert_tag_selections(conn, product_id, selections)
        })?;

        Ok(())
    }

    fn remove_product_tags(&self, product_id: &str, tag_ids: &[i32]) -> RepositoryResult<()> {
        use crate::schema::{product_tag_options, product_tags, tag_options};

        let mut conn = self.conn()?;

        conn.transaction::<(), diesel::result::Error, _>(|conn| {
            let option_ids: Vec<i32> = tag_options::table
                .filter(tag_options::tag_id.eq_any(tag_ids))
                .select(tag_options::id)
                .load::<i32>(conn)?;

            diesel::delete(
                product_tag_options::table
                    .filter(product_tag_options::product_id.eq(product_id))
                    .filter(product_tag_options::option_id.eq_any(&option_ids)),
            )
            .execute(conn)?;

            diesel::delete(
                product_tags::table
                    .filter(product_tags::product_id.eq(product_id))
                    .filter(product_tags::tag_id.eq_any(tag_ids)),
            )
            .execute(conn)?;

            Ok(())
        })?;

        Ok(())
    }

    fn remove_product_tag_option(
        &self,
        product_id: &str,
        tag_id: i32,
        option_id: i32,
    ) -> RepositoryResult<()> {
        use crate::schema::{product_tag_options, product_tags, tag_options};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let deleted = diesel::delete(
                product_tag_options::table
                    .filter(product_tag_options::product_id.eq(product_id))
                    .filter(product_tag_options::option_id.eq(option_id)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            let remaining: i64 = product_tag_options::table
                .inner_join(tag_options::table)
                .filter(product_tag_options::product_id.eq(product_id))
                .filter(tag_options::tag_id.eq(tag_id))
                .count()
                .get_result(conn)?;

            // The tag link carries no information once its last option is gone.
            if remaining == 0 {
                diesel::delete(
                    product_tags::table
                        .filter(product_tags::product_id.eq(product_id))
                        .filter(product_tags::tag_id.eq(tag_id)),
                )
                .execute(conn)?;
            }

            Ok(())
        })
    }
}

fn insert_tag_selections(
    conn: &mut SqliteConnection,
    product_id: &str,
    selections: &[TagSelection],
) -> Result<(), diesel::result::Error> {
    use crate::schema::{product_tag_options, product_tags};

    for selection in selections {
        diesel::insert_into(product_tags::table)
            .values(&NewProductTag {
                product_id,
                tag_id: selection.tag_id,
            })
            .execute(conn)?;

        for &option_id in &selection.option_ids {
            diesel::insert_into(product_tag_options::table)
                .values(&NewProductTagOption {
                    product_id,
                    option_id,
                    is_default: false,
                })
                .execute(conn)?;
        }
    }

    Ok(())
}
