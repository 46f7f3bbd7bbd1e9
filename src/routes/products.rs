use actix_multipart::form::MultipartForm;
use actix_web::{Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedAdmin;
use crate::forms::products::{AddProductTagsForm, CreateProductForm, RemoveProductTagsForm, UpdateProductForm};
use crate::repository::DieselRepository;
use crate::routes::{created, error_response, ok, ok_message};
use crate::services::images::ImageStore;
use crate::services::products::{self, ProductsQuery};

#[get("/products")]
pub async fn show_products(
    _admin: AuthenticatedAdmin,
    params: web::Query<ProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_products(repo.get_ref(), params.into_inner()) {
        Ok(page) => ok(page),
        Err(err) => error_response(&err),
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    _admin: AuthenticatedAdmin,
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::get_product(repo.get_ref(), &path.into_inner()) {
        Ok(product) => ok(product),
        Err(err) => error_response(&err),
    }
}

#[post("/products")]
pub async fn add_product(
    _admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
    images: web::Data<ImageStore>,
    MultipartForm(form): MultipartForm<CreateProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), images.get_ref(), form) {
        Ok(product) => created(product),
        Err(err) => error_response(&err),
    }
}

#[put("/products/{product_id}")]
pub async fn edit_product(
    _admin: AuthenticatedAdmin,
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    images: web::Data<ImageStore>,
    MultipartForm(form): MultipartForm<UpdateProductForm>,
) -> impl Responder {
    match products::update_product(repo.get_ref(), images.get_ref(), &path.into_inner(), form) {
        Ok(product) => ok(product),
        Err(err) => error_response(&err),
    }
}

#[delete("/products/{product_id}")]
pub async fn remove_product(
    _admin: AuthenticatedAdmin,
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    images: web::Data<ImageStore>,
) -> impl Responder {
    match products::delete_product(repo.get_ref(), images.get_ref(), &path.into_inner()) {
        Ok(()) => ok_message("product deleted"),
        Err(err) => error_response(&err),
    }
}

#[get("/products/{product_id}/tags")]
pub async fn show_product_tags(
    _admin: AuthenticatedAdmin,
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::get_product_tags(repo.get_ref(), &path.into_inner()) {
        Ok(tags) => ok(tags),
        Err(err) => error_response(&err),
    }
}

#[get("/products/{product_id}/tags/{tag_id}/options")]
pub async fn show_product_tag_options(
    _admin: AuthenticatedAdmin,
    path: web::Path<(String, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (product_id, tag_id) = path.into_inner();

    match products::get_product_tag_options(repo.get_ref(), &product_id, tag_id) {
        Ok(options) => ok(options),
        Err(err) => error_response(&err),
    }
}

#[post("/products/{product_id}/tags")]
pub async fn attach_product_tags(
    _admin: AuthenticatedAdmin,
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductTagsForm>,
) -> impl Responder {
    match products::add_product_tags(repo.get_ref(), &path.into_inner(), form.into_inner()) {
        Ok(()) => ok_message("tags attached"),
        Err(err) => error_response(&err),
    }
}

#[delete("/products/{product_id}/tags")]
pub async fn detach_product_tags(
    _admin: AuthenticatedAdmin,
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    form: web::Json<RemoveProductTagsForm>,
) -> impl Responder {
    match products::remove_product_tags(repo.get_ref(), &path.into_inner(), form.into_inner()) {
        Ok(()) => ok_message("tags detached"),
        Err(err) => error_response(&err),
    }
}

#[delete("/products/{product_id}/tags/{tag_id}/options/{option_id}")]
pub async fn detach_product_tag_option(
    _admin: AuthenticatedAdmin,
    path: web::Path<(String, i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (product_id, tag_id, option_id) = path.into_inner();

    match products::remove_product_tag_option(repo.get_ref(), &product_id, tag_id, option_id) {
        Ok(()) => ok_message("tag option detached"),
        Err(err) => error_response(&err),
    }
}
