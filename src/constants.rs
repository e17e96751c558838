pub const APPLICATION_JSON: &str = "application/json";

pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Header the fake current user honours, so tests can pick an identity per request.
pub const FAKE_USER_HEADER: &str = "X-User-Id";

pub const DEFAULT_PAGE_SIZE: i64 = 20;
