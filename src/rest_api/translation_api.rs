use actix_web::web::{Json, Path, Query, ThinData};
use actix_web::{delete, get, post, HttpRequest, HttpResponse};
use log::info;

use crate::auth::DynCurrentUser;
use crate::constants::APPLICATION_JSON;
use crate::dtos::offer::TranslationOfferDto;
use crate::dtos::search::{PageQuery, TranslationOfferQuery};
use crate::repository::DynTranslationOffers;
use crate::rest_api::base_api::{bad_request_with_reason, log_store_error_and_return_500};
use crate::search::TranslationSortKey;

#[post("/api/translation")]
pub async fn create_translation_offer(
    offers: ThinData<DynTranslationOffers>,
    current_user: ThinData<DynCurrentUser>,
    req: HttpRequest,
    dto: Json<TranslationOfferDto>,
) -> HttpResponse {
    info!("create_translation_offer called");
    let user_id = match current_user.current_user_id(&req) {
        Some(user_id) => user_id,
        None => return HttpResponse::Unauthorized().finish(),
    };
    let offer = match dto.into_inner().into_offer(user_id) {
        Ok(offer) => offer,
        Err(validation_errors) => {
            return HttpResponse::BadRequest()
                .content_type(APPLICATION_JSON)
                .json(validation_errors)
        }
    };
    let saved = match offers.create(offer).await {
        Ok(saved) => saved,
        Err(store_error) => return log_store_error_and_return_500(store_error),
    };
    HttpResponse::Created()
        .content_type(APPLICATION_JSON)
        .json(saved)
}

#[get("/api/translation")]
pub async fn search_translation_offers(
    offers: ThinData<DynTranslationOffers>,
    criteria_query: Query<TranslationOfferQuery>,
    page_query: Query<PageQuery>,
) -> HttpResponse {
    let criteria = criteria_query.into_inner().into_criteria();
    let (page, sort) = match page_query
        .into_inner()
        .into_page_and_sort::<TranslationSortKey>()
    {
        Ok(page_and_sort) => page_and_sort,
        Err(reason) => return bad_request_with_reason(reason),
    };
    let offers_page = match offers.search(&criteria, sort.as_ref(), &page).await {
        Ok(offers_page) => offers_page,
        Err(store_error) => return log_store_error_and_return_500(store_error),
    };
    HttpResponse::Ok()
        .content_type(APPLICATION_JSON)
        .json(offers_page)
}

#[get("/api/translation/{id}")]
pub async fn get_translation_offer(
    offers: ThinData<DynTranslationOffers>,
    id: Path<(i64,)>,
) -> HttpResponse {
    let offer_option = match offers.find_by_id(id.0).await {
        Ok(offer_option) => offer_option,
        Err(store_error) => return log_store_error_and_return_500(store_error),
    };
    match offer_option {
        Some(offer) => HttpResponse::Ok()
            .content_type(APPLICATION_JSON)
            .json(offer),
        None => HttpResponse::NotFound().finish(),
    }
}

#[delete("/api/translation/{id}")]
pub async fn delete_translation_offer(
    offers: ThinData<DynTranslationOffers>,
    id: Path<(i64,)>,
) -> HttpResponse {
    info!("delete_translation_offer called for id {}", id.0);
    match offers.delete(id.0).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().finish(),
        Err(store_error) => log_store_error_and_return_500(store_error),
    }
}
