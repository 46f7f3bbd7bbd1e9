use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::order::{
    NewOrder as DomainNewOrder, NewOrderItem as DomainNewOrderItem, Order as DomainOrder,
    OrderItem as DomainOrderItem, OrderListQuery, UpdateOrder as DomainUpdateOrder,
};
use crate::models::order::{
    NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
    OrderItem as DbOrderItem, UpdateOrder as DbUpdateOrder,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, OrderReader, OrderWriter};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, order_id: &str) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::order_id.eq(order_id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        if let Some(db_order) = order {
            let mut item_map = load_items_for_orders(&mut conn, &[db_order.order_id.clone()])?;
            let items = item_map.remove(&db_order.order_id).unwrap_or_default();
            Ok(Some(db_order.into_domain(items)))
        } else {
            Ok(None)
        }
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<DomainOrder>)> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let mut count_query = orders::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = query.status {
            count_query = count_query.filter(orders::status.eq(status.as_str()));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items_query = orders::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = query.status {
            items_query = items_query.filter(orders::status.eq(status.as_str()));
        }

        items_query = items_query.order(orders::created_at.desc());

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items_query = items_query.offset(offset).limit(limit);
        }

        let db_orders = items_query.load::<DbOrder>(&mut conn)?;

        if db_orders.is_empty() {
            return Ok((total, Vec::new()));
        }

        let order_ids: Vec<String> = db_orders
            .iter()
            .map(|order| order.order_id.clone())
            .collect();
        let mut item_map = load_items_for_orders(&mut conn, &order_ids)?;

        let mut orders = Vec::with_capacity(db_orders.len());
        for db_order in db_orders {
            let items = item_map.remove(&db_order.order_id).unwrap_or_default();
            orders.push(db_order.into_domain(items));
        }

        Ok((total, orders))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(
        &self,
        new_order: &DomainNewOrder,
        items: &[DomainNewOrderItem],
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        let created = conn.transaction::<(DbOrder, Vec<DbOrderItem>), diesel::result::Error, _>(
            |conn| {
                let insertable = DbNewOrder::from(new_order);
                let created = diesel::insert_into(orders::table)
                    .values(&insertable)
                    .get_result::<DbOrder>(conn)?;

                let mut created_items = Vec::with_capacity(items.len());
                for item in items {
                    let row = diesel::insert_into(order_items::table)
                        .values(&DbNewOrderItem::from_domain(&created.order_id, item))
                        .get_result::<DbOrderItem>(conn)?;
                    created_items.push(row);
                }

                Ok((created, created_items))
            },
        )?;

        let (order, items) = created;
        Ok(order.into_domain(items.into_iter().map(DomainOrderItem::from).collect()))
    }

    fn update_order(
        &self,
        order_id: &str,
        updates: &DomainUpdateOrder,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateOrder::from(updates);

        let target = orders::table.filter(orders::order_id.eq(order_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbOrder>(&mut conn)?;

        let mut item_map = load_items_for_orders(&mut conn, &[updated.order_id.clone()])?;
        let items = item_map.remove(&updated.order_id).unwrap_or_default();

        Ok(updated.into_domain(items))
    }

    fn delete_order(&self, order_id: &str) -> RepositoryResult<()> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(order_items::table.filter(order_items::order_id.eq(order_id)))
                .execute(conn)?;

            let deleted =
                diesel::delete(orders::table.filter(orders::order_id.eq(order_id)))
                    .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

fn load_items_for_orders(
    conn: &mut SqliteConnection,
    order_ids: &[String],
) -> RepositoryResult<HashMap<String, Vec<DomainOrderItem>>> {
    use crate::schema::order_items;

    if order_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = order_items::table
        .filter(order_items::order_id.eq_any(order_ids))
        .order(order_items::id.asc())
        .load::<DbOrderItem>(conn)?;

    let mut map: HashMap<String, Vec<DomainOrderItem>> = HashMap::new();
    for row in rows {
        map.entry(row.order_id.clone()).or_default().push(row.into());
    }

    Ok(map)
}
