use actix_web::web::{Json, Path, Query, ThinData};
use actix_web::{delete, get, post, HttpRequest, HttpResponse};
use log::info;

use crate::auth::DynCurrentUser;
use crate::constants::APPLICATION_JSON;
use crate::dtos::offer::TransportOfferDto;
use crate::dtos::search::{PageQuery, TransportOfferQuery};
use crate::repository::DynTransportOffers;
use crate::rest_api::base_api::{bad_request_with_reason, log_store_error_and_return_500};
use crate::search::TransportSortKey;

#[post("/api/transport")]
pub async fn create_transport_offer(
    offers: ThinData<DynTransportOffers>,
    current_user: ThinData<DynCurrentUser>,
    req: HttpRequest,
    dto: Json<TransportOfferDto>,
) -> HttpResponse {
    info!("create_transport_offer called");
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

#[get("/api/transport")]
pub async fn search_transport_offers(
    offers: ThinData<DynTransportOffers>,
    criteria_query: Query<TransportOfferQuery>,
    page_query: Query<PageQuery>,
) -> HttpResponse {
    let criteria = criteria_query.into_inner().into_criteria();
    let (page, sort) = match page_query
        .into_inner()
        .into_page_and_sort::<TransportSortKey>()
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

#[get("/api/transport/{id}")]
pub async fn get_transport_offer(
    offers: ThinData<DynTransportOffers>,
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

#[delete("/api/transport/{id}")]
pub async fn delete_transport_offer(
    offers: ThinData<DynTransportOffers>,
    id: Path<(i64,)>,
) -> HttpResponse {
    info!("delete_transport_offer called for id {}", id.0);
    match offers.delete(id.0).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().finish(),
        Err(store_error) => log_store_error_and_return_500(store_error),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::{test, App, Error};
    use serde_json::json;

    use super::*;
    use crate::constants::FAKE_USER_HEADER;
    use crate::dev::{FakeCurrentUser, InMemoryTransportOffers};
    use crate::entities::user::UserId;

    async fn test_app(
        default_user: Option<UserId>,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = Error> {
        let offers: DynTransportOffers = Arc::new(InMemoryTransportOffers::new());
        let current_user: DynCurrentUser = Arc::new(FakeCurrentUser::new(default_user));
        test::init_service(
            App::new()
                .app_data(ThinData(offers))
                .app_data(ThinData(current_user))
                .service(create_transport_offer)
                .service(search_transport_offers)
                .service(get_transport_offer)
                .service(delete_transport_offer),
        )
        .await
    }

    fn offer_body(title: &str, capacity: i32) -> serde_json::Value {
        json!({
            "title": title,
            "description": "Codziennie rano",
            "origin": {"region": "Pomorskie", "city": "Gdańsk"},
            "destination": {"region": "Podkarpackie", "city": "Medyka"},
            "capacity": capacity,
            "transportDate": "2022-04-01"
        })
    }

    async fn post_offer(
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = Error>,
        body: serde_json::Value,
    ) -> ServiceResponse {
        let req = test::TestRequest::post()
            .uri("/api/transport")
            .set_json(body)
            .to_request();
        test::call_service(app, req).await
    }

    #[actix_rt::test]
    async fn create_without_identity_is_unauthorized() {
        let app = test_app(None).await;
        let resp = post_offer(&app, offer_body("Bus", 7)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn create_with_empty_body_lists_all_violations() {
        let app = test_app(Some(UserId::new("1"))).await;
        let resp = post_offer(&app, json!({})).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let errors = body["errors"].as_array().unwrap();
        assert!(errors.contains(&json!("title is required")));
        assert!(errors.contains(&json!("origin is required")));
        assert!(errors.contains(&json!("destination is required")));
        assert!(errors.contains(&json!("capacity is required")));
        assert!(errors.contains(&json!("transportDate is required")));
    }

    #[actix_rt::test]
    async fn create_returns_the_stored_offer_flat_and_camel_cased() {
        let app = test_app(Some(UserId::new("1"))).await;
        let resp = post_offer(&app, offer_body("Bus do Medyki", 7)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], json!(1));
        assert_eq!(body["userId"], json!("1"));
        assert_eq!(body["title"], json!("Bus do Medyki"));
        assert_eq!(body["origin"]["city"], json!("Gdańsk"));
        assert_eq!(body["capacity"], json!(7));
        assert_eq!(body["transportDate"], json!("2022-04-01"));
        assert!(body["createdAt"].as_i64().unwrap() > 0);
    }

    #[actix_rt::test]
    async fn creator_identity_can_come_from_the_header() {
        let app = test_app(Some(UserId::new("1"))).await;
        let req = test::TestRequest::post()
            .uri("/api/transport")
            .insert_header((FAKE_USER_HEADER, "42"))
            .set_json(offer_body("Bus", 7))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["userId"], json!("42"));
    }

    #[actix_rt::test]
    async fn capacity_filter_is_a_lower_bound_over_http() {
        let app = test_app(Some(UserId::new("1"))).await;
        for capacity in [1, 10, 11] {
            let resp = post_offer(&app, offer_body(&format!("cap {}", capacity), capacity)).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri("/api/transport?capacity=10")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["totalElements"], json!(2));
        let capacities: Vec<i64> = body["content"]
            .as_array()
            .unwrap()
            .iter()
            .map(|offer| offer["capacity"].as_i64().unwrap())
            .collect();
        assert_eq!(capacities, vec![10, 11]);
    }

    #[actix_rt::test]
    async fn middle_page_keeps_the_full_total() {
        let app = test_app(Some(UserId::new("1"))).await;
        for capacity in 1..=6 {
            post_offer(&app, offer_body(&format!("offer {}", capacity), capacity)).await;
        }

        let req = test::TestRequest::get()
            .uri("/api/transport?page=1&size=2")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["totalElements"], json!(6));
        let capacities: Vec<i64> = body["content"]
            .as_array()
            .unwrap()
            .iter()
            .map(|offer| offer["capacity"].as_i64().unwrap())
            .collect();
        assert_eq!(capacities, vec![3, 4]);
    }

    #[actix_rt::test]
    async fn unusable_paging_or_sorting_is_a_bad_request() {
        let app = test_app(Some(UserId::new("1"))).await;
        for uri in [
            "/api/transport?page=-1",
            "/api/transport?size=0",
            "/api/transport?sort=colour",
            "/api/transport?sort=title,sideways",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[actix_rt::test]
    async fn offers_can_be_fetched_back_by_id() {
        let app = test_app(Some(UserId::new("1"))).await;
        post_offer(&app, offer_body("Bus", 7)).await;

        let req = test::TestRequest::get().uri("/api/transport/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], json!("Bus"));

        let req = test::TestRequest::get().uri("/api/transport/2").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn delete_removes_the_offer_then_turns_into_not_found() {
        let app = test_app(Some(UserId::new("1"))).await;
        post_offer(&app, offer_body("Bus", 7)).await;

        let req = test::TestRequest::delete()
            .uri("/api/transport/1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::delete()
            .uri("/api/transport/1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
