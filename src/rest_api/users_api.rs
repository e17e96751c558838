use actix_web::web::ThinData;
use actix_web::{get, HttpRequest, HttpResponse};

use crate::auth::DynCurrentUser;
use crate::constants::APPLICATION_JSON;
use crate::dtos::user::UserInfo;
use crate::repository::DynUsersRepository;
use crate::rest_api::base_api::log_store_error_and_return_500;

#[get("/api/secure/me")]
pub async fn me(
    users: ThinData<DynUsersRepository>,
    current_user: ThinData<DynCurrentUser>,
    req: HttpRequest,
) -> HttpResponse {
    let user_id = match current_user.current_user_id(&req) {
        Some(user_id) => user_id,
        None => return HttpResponse::Unauthorized().finish(),
    };
    let user_option = match users.find_by_id(&user_id).await {
        Ok(user_option) => user_option,
        Err(store_error) => return log_store_error_and_return_500(store_error),
    };
    match user_option {
        // An id we cannot resolve to a user is as good as no login at all.
        Some(user) => HttpResponse::Ok()
            .content_type(APPLICATION_JSON)
            .json(UserInfo::from(user)),
        None => HttpResponse::Unauthorized().finish(),
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
    use crate::dev::{FakeCurrentUser, FakeUsers};
    use crate::entities::user::{User, UserId};

    async fn test_app(
        default_user: Option<UserId>,
        users: Arc<FakeUsers>,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = Error> {
        let users: DynUsersRepository = users;
        let current_user: DynCurrentUser = Arc::new(FakeCurrentUser::new(default_user));
        test::init_service(
            App::new()
                .app_data(ThinData(users))
                .app_data(ThinData(current_user))
                .service(me),
        )
        .await
    }

    #[actix_rt::test]
    async fn me_without_identity_is_unauthorized() {
        let app = test_app(None, Arc::new(FakeUsers::new())).await;
        let req = test::TestRequest::get().uri("/api/secure/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn me_with_unknown_identity_is_unauthorized() {
        let app = test_app(Some(UserId::new("404")), Arc::new(FakeUsers::new())).await;
        let req = test::TestRequest::get().uri("/api/secure/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn me_returns_contact_details_for_the_logged_in_user() {
        let users = Arc::new(FakeUsers::new());
        users
            .save_user(User {
                id: UserId::new("7"),
                email: "aid@example.org".to_string(),
                phone_number: "+48123456789".to_string(),
            })
            .unwrap();
        let app = test_app(Some(UserId::new("7")), users).await;

        let req = test::TestRequest::get().uri("/api/secure/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "email": "aid@example.org",
                "phoneNumber": "+48123456789"
            })
        );
    }
}
