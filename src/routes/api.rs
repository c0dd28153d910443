use actix_web::{HttpResponse, Responder, get, post, web};

use crate::dto::api::{NewClientPayload, ValidationErrorResponse};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, api as api_service};

#[get("/v1/clients")]
pub async fn api_v1_clients(repo: web::Data<DieselRepository>) -> impl Responder {
    match api_service::list_clients(repo.get_ref()) {
        Ok(clients) => HttpResponse::Ok().json(clients),
        Err(err) => {
            log::error!("Failed to list clients: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/v1/clients")]
pub async fn api_v1_create_client(
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<NewClientPayload>,
) -> impl Responder {
    match api_service::create_client(repo.get_ref(), payload) {
        Ok(clients) => HttpResponse::Ok().json(clients),
        Err(ServiceError::Validation(errors)) => {
            HttpResponse::UnprocessableEntity().json(ValidationErrorResponse { errors })
        }
        Err(err) => {
            log::error!("Failed to create client via API: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
