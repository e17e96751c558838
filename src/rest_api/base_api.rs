use actix_web::HttpResponse;
use log::error;

use crate::constants::APPLICATION_JSON;
use crate::persistence::dao::StoreError;
use crate::validation::ValidationErrors;

pub fn log_store_error_and_return_500(store_error: StoreError) -> HttpResponse {
    error!("StoreError: {}", store_error);
    HttpResponse::InternalServerError().finish()
}

pub fn bad_request_with_reason(reason: String) -> HttpResponse {
    HttpResponse::BadRequest()
        .content_type(APPLICATION_JSON)
        .json(ValidationErrors::single(reason))
}
