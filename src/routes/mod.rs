use actix_web::{HttpResponse, Responder, get};
use serde::Serialize;

use crate::services::ServiceError;

pub mod admins;
pub mod categories;
pub mod orders;
pub mod products;
pub mod tags;

/// JSON envelope wrapping every API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.to_string()),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.to_string()),
        }
    }
}

/// 200 with data.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::data(data))
}

/// 201 with data.
pub fn created<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::data(data))
}

/// 200 with just a confirmation message.
pub fn ok_message(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::message(message))
}

/// Map a service error onto the status table: validation and tag-policy
/// violations to 400, bad credentials to 401, missing entities to 404,
/// conflicts to 409 and everything infrastructural to 500.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(_) | ServiceError::TagPolicy(_) => {
            HttpResponse::BadRequest().json(ApiResponse::error(&err.to_string()))
        }
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(ApiResponse::error("invalid credentials"))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(ApiResponse::error("resource not found"))
        }
        ServiceError::Conflict => {
            HttpResponse::Conflict().json(ApiResponse::error("conflicting resource state"))
        }
        ServiceError::Image(_) | ServiceError::Repository(_) | ServiceError::Internal(_) => {
            log::error!("request failed: {err}");
            HttpResponse::InternalServerError().json(ApiResponse::error("internal server error"))
        }
    }
}

#[get("/health")]
pub async fn health() -> impl Responder {
    ok_message("ok")
}
