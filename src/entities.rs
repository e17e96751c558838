pub(crate) mod location;
pub(crate) mod offer;
pub(crate) mod user;
