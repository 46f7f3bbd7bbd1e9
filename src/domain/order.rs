use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Payment/fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Paid,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Paid => "paid",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "paid" => Some(OrderStatus::Paid),
            "completed" => Some(OrderStatus::Completed),
            "canceled" => Some(OrderStatus::Canceled),
            _ => None,
        }
    }
}

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    Pickup,
    Delivery,
}

impl DeliveryType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryType::Pickup => "pickup",
            DeliveryType::Delivery => "delivery",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pickup" => Some(DeliveryType::Pickup),
            "delivery" => Some(DeliveryType::Delivery),
            _ => None,
        }
    }
}

/// Domain representation of a customer order as seen by the backend.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Order {
    /// Generated identifier, immutable after creation.
    pub order_id: String,
    pub status: OrderStatus,
    pub delivery_type: DeliveryType,
    /// Delivery address, absent for pickup orders.
    pub address: Option<String>,
    /// Order total in cents.
    pub total_cents: i64,
    /// Line items, loaded together with the order.
    pub items: Vec<OrderItem>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One line of an order, snapshotting the product name and price at purchase
/// time so later catalog edits do not rewrite history.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: String,
    /// Product reference, cleared when the product is deleted.
    pub product_id: Option<String>,
    pub name: String,
    pub price_cents: i64,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_id: String,
    pub status: OrderStatus,
    pub delivery_type: DeliveryType,
    pub address: Option<String>,
    pub total_cents: i64,
}

impl NewOrder {
    pub fn new(order_id: impl Into<String>, delivery_type: DeliveryType, total_cents: i64) -> Self {
        Self {
            order_id: order_id.into(),
            status: OrderStatus::Paid,
            delivery_type,
            address: None,
            total_cents,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Payload required to insert one order line.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: Option<String>,
    pub name: String,
    pub price_cents: i64,
    pub quantity: i32,
}

impl NewOrderItem {
    pub fn new(name: impl Into<String>, price_cents: i64, quantity: i32) -> Self {
        Self {
            product_id: None,
            name: name.into(),
            price_cents,
            quantity,
        }
    }

    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }
}

/// Patch data applied when updating an existing order.
#[derive(Debug, Clone)]
pub struct UpdateOrder {
    pub status: Option<OrderStatus>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateOrder {
    pub fn new() -> Self {
        Self {
            status: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Query definition used to list orders.
#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    /// Optional status filter.
    pub status: Option<OrderStatus>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results to orders in the given status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
