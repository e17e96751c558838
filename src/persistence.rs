pub(crate) mod dao;
pub(crate) mod translation;
pub(crate) mod transport;
pub(crate) mod users;
