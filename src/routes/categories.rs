use actix_web::{Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedAdmin;
use crate::forms::categories::{CreateCategoryForm, UpdateCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{created, error_response, ok, ok_message};
use crate::services::categories;

#[get("/categories")]
pub async fn show_categories(
    _admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match categories::list_categories(repo.get_ref()) {
        Ok(list) => ok(list),
        Err(err) => error_response(&err),
    }
}

#[get("/categories/{category_id}")]
pub async fn show_category(
    _admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match categories::get_category(repo.get_ref(), path.into_inner()) {
        Ok(category) => ok(category),
        Err(err) => error_response(&err),
    }
}

#[post("/categories")]
pub async fn add_category(
    _admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
    form: web::Json<CreateCategoryForm>,
) -> impl Responder {
    match categories::create_category(repo.get_ref(), form.into_inner()) {
        Ok(category) => created(category),
        Err(err) => error_response(&err),
    }
}

#[put("/categories/{category_id}")]
pub async fn edit_category(
    _admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateCategoryForm>,
) -> impl Responder {
    match categories::modify_category(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(category) => ok(category),
        Err(err) => error_response(&err),
    }
}

#[delete("/categories/{category_id}")]
pub async fn remove_category(
    _admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match categories::remove_category(repo.get_ref(), path.into_inner()) {
        Ok(()) => ok_message("category deleted"),
        Err(err) => error_response(&err),
    }
}
