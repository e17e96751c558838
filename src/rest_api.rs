pub(crate) mod base_api;
pub(crate) mod translation_api;
pub(crate) mod transport_api;
pub(crate) mod users_api;
