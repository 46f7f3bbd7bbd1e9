use serde::Deserialize;

use crate::domain::order::{Order, OrderListQuery, OrderStatus, UpdateOrder};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{OrderReader, OrderWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the order listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Optional status filter (`paid`, `completed` or `canceled`).
    pub status: Option<String>,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Fetches a page of orders with their line items.
pub fn list_orders<R>(repo: &R, query: OrdersQuery) -> ServiceResult<Paginated<Order>>
where
    R: OrderReader + ?Sized,
{
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
        .clamp(1, 100);

    let mut list_query = OrderListQuery::new().paginate(page, per_page);
    if let Some(raw) = query.status.as_deref() {
        let status = OrderStatus::parse(raw)
            .ok_or_else(|| ServiceError::Validation(format!("unknown order status `{raw}`")))?;
        list_query = list_query.status(status);
    }

    let (total, orders) = repo.list_orders(list_query)?;

    Ok(Paginated::new(orders, total, page, per_page))
}

/// Fetches a single order with its line items.
pub fn get_order<R>(repo: &R, order_id: &str) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    repo.get_order_by_id(order_id)?.ok_or(ServiceError::NotFound)
}

/// Moves an order to a new status.
pub fn update_order_status<R>(repo: &R, order_id: &str, raw_status: &str) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    let status = OrderStatus::parse(raw_status).ok_or_else(|| {
        ServiceError::Validation(format!("unknown order status `{raw_status}`"))
    })?;

    let update = UpdateOrder::new().status(status);

    Ok(repo.update_order(order_id, &update)?)
}

/// Deletes an order together with its line items.
pub fn remove_order<R>(repo: &R, order_id: &str) -> ServiceResult<()>
where
    R: OrderWriter + ?Sized,
{
    Ok(repo.delete_order(order_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::{MockOrderReader, MockOrderWriter};

    #[test]
    fn list_orders_rejects_unknown_status_filter() {
        let repo = MockOrderReader::new();

        let query = OrdersQuery {
            status: Some("shipped".to_string()),
            page: None,
            per_page: None,
        };

        let result = list_orders(&repo, query);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn list_orders_passes_status_filter_to_repository() {
        let mut repo = MockOrderReader::new();

        repo.expect_list_orders()
            .times(1)
            .withf(|query| {
                assert_eq!(query.status, Some(OrderStatus::Completed));
                match &query.pagination {
                    Some(pagination) => {
                        assert_eq!(pagination.page, 2);
                        assert_eq!(pagination.per_page, DEFAULT_ITEMS_PER_PAGE);
                    }
                    None => panic!("expected pagination to be set"),
                }
                true
            })
            .returning(|_| Ok((0, Vec::new())));

        let query = OrdersQuery {
            status: Some("completed".to_string()),
            page: Some(2),
            per_page: None,
        };

        let page = list_orders(&repo, query).expect("expected success");

        assert_eq!(page.total, 0);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn update_order_status_rejects_unknown_status() {
        let repo = MockOrderWriter::new();

        let result = update_order_status(&repo, "O202503011230000001", "refunded");

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
