use confik::Configuration;
use serde::Deserialize;

#[derive(Debug, Default, Configuration, Clone)]
pub struct AdsConfig {
    pub server_addr: String,
    #[confik(default = "info")]
    pub log_level: String,
    /// dev wires fake stores and a fake current user; prod wants Postgres
    /// and a session cookie.
    #[confik(default = "dev")]
    pub profile: String,
    /// Session signing key, at least 64 bytes. Generated on boot when
    /// absent, which logs everyone out on restart.
    pub session_key: Option<String>,
    /// Only read by the prod profile.
    #[confik(from = DbConfig, default = deadpool_postgres::Config::default())]
    pub pg: deadpool_postgres::Config,
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct DbConfig(deadpool_postgres::Config);

impl From<DbConfig> for deadpool_postgres::Config {
    fn from(value: DbConfig) -> Self {
        value.0
    }
}

impl From<deadpool_postgres::Config> for DbConfig {
    fn from(value: deadpool_postgres::Config) -> Self {
        DbConfig(value)
    }
}

impl confik::Configuration for DbConfig {
    type Builder = Option<Self>;
}
