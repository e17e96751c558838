pub(crate) mod offer;
pub(crate) mod search;
pub(crate) mod user;
