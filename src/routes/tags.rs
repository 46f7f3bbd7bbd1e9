use actix_web::{Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedAdmin;
use crate::forms::tags::{CreateTagForm, TagOptionForm, UpdateTagForm};
use crate::repository::DieselRepository;
use crate::routes::{created, error_response, ok, ok_message};
use crate::services::tags::{self, TagsQuery};

#[get("/tags")]
pub async fn show_tags(
    _admin: AuthenticatedAdmin,
    params: web::Query<TagsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match tags::list_tags(repo.get_ref(), params.into_inner()) {
        Ok(page) => ok(page),
        Err(err) => error_response(&err),
    }
}

#[get("/tags/{tag_id}")]
pub async fn show_tag(
    _admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match tags::get_tag(repo.get_ref(), path.into_inner()) {
        Ok(tag) => ok(tag),
        Err(err) => error_response(&err),
    }
}

#[post("/tags")]
pub async fn add_tag(
    _admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
    form: web::Json<CreateTagForm>,
) -> impl Responder {
    match tags::create_tag(repo.get_ref(), form.into_inner()) {
        Ok(tag) => created(tag),
        Err(err) => error_response(&err),
    }
}

#[put("/tags/{tag_id}")]
pub async fn edit_tag(
    _admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateTagForm>,
) -> impl Responder {
    match tags::modify_tag(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(tag) => ok(tag),
        Err(err) => error_response(&err),
    }
}

#[delete("/tags/{tag_id}")]
pub async fn remove_tag(
    _admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match tags::remove_tag(repo.get_ref(), path.into_inner()) {
        Ok(()) => ok_message("tag deleted"),
        Err(err) => error_response(&err),
    }
}

#[post("/tags/{tag_id}/options")]
pub async fn add_tag_option(
    _admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<TagOptionForm>,
) -> impl Responder {
    match tags::add_tag_option(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(option) => created(option),
        Err(err) => error_response(&err),
    }
}

#[delete("/tags/{tag_id}/options/{option_id}")]
pub async fn remove_tag_option(
    _admin: AuthenticatedAdmin,
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (tag_id, option_id) = path.into_inner();

    match tags::remove_tag_option(repo.get_ref(), tag_id, option_id) {
        Ok(()) => ok_message("tag option deleted"),
        Err(err) => error_response(&err),
    }
}
