use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    DeliveryType, NewOrder as DomainNewOrder, NewOrderItem as DomainNewOrderItem,
    Order as DomainOrder, OrderItem as DomainOrderItem, OrderStatus,
    UpdateOrder as DomainUpdateOrder,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders, primary_key(order_id))]
pub struct Order {
    pub order_id: String,
    pub status: String,
    pub delivery_type: String,
    pub address: Option<String>,
    pub total_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub order_id: &'a str,
    pub status: &'a str,
    pub delivery_type: &'a str,
    pub address: Option<&'a str>,
    pub total_cents: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::orders)]
pub struct UpdateOrder<'a> {
    pub status: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::order_items,
    belongs_to(Order, foreign_key = order_id)
)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: String,
    pub product_id: Option<String>,
    pub name: String,
    pub price_cents: i64,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem<'a> {
    pub order_id: &'a str,
    pub product_id: Option<&'a str>,
    pub name: &'a str,
    pub price_cents: i64,
    pub quantity: i32,
}

impl Order {
    /// Combine the row with its loaded items into the domain shape.
    pub fn into_domain(self, items: Vec<DomainOrderItem>) -> DomainOrder {
        DomainOrder {
            order_id: self.order_id,
            status: OrderStatus::parse(&self.status).unwrap_or(OrderStatus::Paid),
            delivery_type: DeliveryType::parse(&self.delivery_type)
                .unwrap_or(DeliveryType::Pickup),
            address: self.address,
            total_cents: self.total_cents,
            items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<OrderItem> for DomainOrderItem {
    fn from(value: OrderItem) -> Self {
        Self {
            id: value.id,
            order_id: value.order_id,
            product_id: value.product_id,
            name: value.name,
            price_cents: value.price_cents,
            quantity: value.quantity,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(value: &'a DomainNewOrder) -> Self {
        Self {
            order_id: value.order_id.as_str(),
            status: value.status.as_str(),
            delivery_type: value.delivery_type.as_str(),
            address: value.address.as_deref(),
            total_cents: value.total_cents,
        }
    }
}

impl<'a> NewOrderItem<'a> {
    /// Bind a domain line-item payload to its owning order row.
    pub fn from_domain(order_id: &'a str, value: &'a DomainNewOrderItem) -> Self {
        Self {
            order_id,
            product_id: value.product_id.as_deref(),
            name: value.name.as_str(),
            price_cents: value.price_cents,
            quantity: value.quantity,
        }
    }
}

impl<'a> From<&'a DomainUpdateOrder> for UpdateOrder<'a> {
    fn from(value: &'a DomainUpdateOrder) -> Self {
        Self {
            status: value.status.map(OrderStatus::as_str),
            updated_at: value.updated_at,
        }
    }
}
