use std::sync::Arc;

use actix_session::SessionExt;
use actix_web::HttpRequest;

use crate::constants::SESSION_USER_ID_KEY;
use crate::entities::user::UserId;

/// Resolves the identity behind a request. Handlers never look at cookies or
/// headers themselves; they ask this and get an answer or not.
pub trait CurrentUser: Send + Sync {
    fn current_user_id(&self, req: &HttpRequest) -> Option<UserId>;
}

pub type DynCurrentUser = Arc<dyn CurrentUser>;

/// Production resolver: the user id lives in the session cookie.
#[derive(Clone)]
pub struct SessionCurrentUser {}

impl SessionCurrentUser {
    pub fn new() -> SessionCurrentUser {
        SessionCurrentUser {}
    }
}

impl CurrentUser for SessionCurrentUser {
    fn current_user_id(&self, req: &HttpRequest) -> Option<UserId> {
        // An unreadable or absent session entry is the same as not logged in.
        req.get_session()
            .get::<String>(SESSION_USER_ID_KEY)
            .ok()
            .flatten()
            .map(UserId)
    }
}
