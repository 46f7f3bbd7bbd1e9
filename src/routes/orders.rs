use actix_web::{Responder, delete, get, put, web};
use serde::Deserialize;

use crate::auth::AuthenticatedAdmin;
use crate::repository::DieselRepository;
use crate::routes::{error_response, ok, ok_message};
use crate::services::orders::{self, OrdersQuery};

/// JSON body of the status-change endpoint.
#[derive(Debug, Deserialize)]
pub struct OrderStatusForm {
    pub status: String,
}

#[get("/orders")]
pub async fn show_orders(
    _admin: AuthenticatedAdmin,
    params: web::Query<OrdersQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders::list_orders(repo.get_ref(), params.into_inner()) {
        Ok(page) => ok(page),
        Err(err) => error_response(&err),
    }
}

#[get("/orders/{order_id}")]
pub async fn show_order(
    _admin: AuthenticatedAdmin,
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders::get_order(repo.get_ref(), &path.into_inner()) {
        Ok(order) => ok(order),
        Err(err) => error_response(&err),
    }
}

#[put("/orders/{order_id}/status")]
pub async fn edit_order_status(
    _admin: AuthenticatedAdmin,
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    form: web::Json<OrderStatusForm>,
) -> impl Responder {
    match orders::update_order_status(repo.get_ref(), &path.into_inner(), &form.status) {
        Ok(order) => ok(order),
        Err(err) => error_response(&err),
    }
}

#[delete("/orders/{order_id}")]
pub async fn remove_order(
    _admin: AuthenticatedAdmin,
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders::remove_order(repo.get_ref(), &path.into_inner()) {
        Ok(()) => ok_message("order deleted"),
        Err(err) => error_response(&err),
    }
}
