use serde::Serialize;

use crate::entities::user::User;

/// What the logged-in user may see about themselves. The id stays internal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    pub phone_number: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> UserInfo {
        UserInfo {
            email: user.email,
            phone_number: user.phone_number,
        }
    }
}
