use actix_web::{Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedAdmin;
use crate::config::ServerConfig;
use crate::forms::admins::{CreateAdminForm, LoginForm, UpdateAdminForm};
use crate::repository::DieselRepository;
use crate::routes::{created, error_response, ok, ok_message};
use crate::services::admins;

#[post("/admins/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    form: web::Json<LoginForm>,
) -> impl Responder {
    match admins::login(repo.get_ref(), &config.jwt_secret, form.into_inner()) {
        Ok(data) => ok(data),
        Err(err) => error_response(&err),
    }
}

#[get("/admins")]
pub async fn show_admins(
    _admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match admins::list_admins(repo.get_ref()) {
        Ok(list) => ok(list),
        Err(err) => error_response(&err),
    }
}

#[post("/admins")]
pub async fn add_admin(
    _admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
    form: web::Json<CreateAdminForm>,
) -> impl Responder {
    match admins::create_admin(repo.get_ref(), form.into_inner()) {
        Ok(admin) => created(admin),
        Err(err) => error_response(&err),
    }
}

#[put("/admins/{admin_id}")]
pub async fn edit_admin(
    _admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateAdminForm>,
) -> impl Responder {
    match admins::modify_admin(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(admin) => ok(admin),
        Err(err) => error_response(&err),
    }
}

#[delete("/admins/{admin_id}")]
pub async fn remove_admin(
    _admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match admins::remove_admin(repo.get_ref(), path.into_inner()) {
        Ok(()) => ok_message("admin deleted"),
        Err(err) => error_response(&err),
    }
}
