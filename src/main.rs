use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::web::ThinData;
use actix_web::{middleware, App, HttpServer};
use confik::{Configuration as _, EnvSource};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use tokio_postgres::NoTls;

use crate::auth::{DynCurrentUser, SessionCurrentUser};
use crate::config::AdsConfig;
use crate::dev::{FakeCurrentUser, FakeUsers, InMemoryTranslationOffers, InMemoryTransportOffers};
use crate::entities::user::{User, UserId};
use crate::persistence::dao::Dao;
use crate::persistence::translation::PgTranslationOffers;
use crate::persistence::transport::PgTransportOffers;
use crate::persistence::users::PgUsers;
use crate::repository::{DynTranslationOffers, DynTransportOffers, DynUsersRepository};
use rest_api::translation_api;
use rest_api::transport_api;
use rest_api::users_api;

mod auth;
mod collation;
mod config;
mod constants;
mod dev;
mod dtos;
mod entities;
mod paging;
mod persistence;
mod repository;
mod rest_api;
mod search;
mod validation;

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    let config = match AdsConfig::builder()
        .override_with(EnvSource::new())
        .try_build()
    {
        Ok(config) => config,
        Err(build_error) => panic!("Could not create AdsConfig: {}", build_error),
    };

    env_logger::init_from_env(Env::default().default_filter_or(config.log_level.clone()));

    let (transport_offers, translation_offers, users, current_user) = build_backends(&config);

    let session_key = match &config.session_key {
        Some(secret) => match Key::try_from(secret.as_bytes()) {
            Ok(session_key) => session_key,
            Err(key_error) => panic!("SESSION_KEY is unusable: {}", key_error),
        },
        None => Key::generate(),
    };

    info!("Starting on {}", config.server_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(ThinData(transport_offers.clone()))
            .app_data(ThinData(translation_offers.clone()))
            .app_data(ThinData(users.clone()))
            .app_data(ThinData(current_user.clone()))
            .wrap(middleware::Logger::default())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                session_key.clone(),
            ))
            .wrap(
                Cors::permissive()
                    .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                    .max_age(3600),
            )
            .service(transport_api::create_transport_offer)
            .service(transport_api::search_transport_offers)
            .service(transport_api::get_transport_offer)
            .service(transport_api::delete_transport_offer)
            .service(translation_api::create_translation_offer)
            .service(translation_api::search_translation_offers)
            .service(translation_api::get_translation_offer)
            .service(translation_api::delete_translation_offer)
            .service(users_api::me)
    })
    .bind(config.server_addr)?
    .run()
    .await
}

fn build_backends(
    config: &AdsConfig,
) -> (
    DynTransportOffers,
    DynTranslationOffers,
    DynUsersRepository,
    DynCurrentUser,
) {
    match config.profile.as_str() {
        "prod" => {
            let pool = match config.pg.create_pool(None, NoTls) {
                Ok(pool) => pool,
                Err(pool_error) => {
                    panic!("Could not create database connection pool: {}", pool_error)
                }
            };
            let dao = Dao::new(pool);
            (
                Arc::new(PgTransportOffers::new(dao.clone())),
                Arc::new(PgTranslationOffers::new(dao.clone())),
                Arc::new(PgUsers::new(dao)),
                Arc::new(SessionCurrentUser::new()),
            )
        }
        profile => {
            info!(
                "Profile {} runs on in-memory stores with a fake current user",
                profile
            );
            let users = FakeUsers::new();
            if let Err(store_error) = users.save_user(User {
                id: UserId::new("1"),
                email: "dev@example.org".to_string(),
                phone_number: "+48123456789".to_string(),
            }) {
                error!("Could not seed the development user: {}", store_error);
            }
            (
                Arc::new(InMemoryTransportOffers::new()),
                Arc::new(InMemoryTranslationOffers::new()),
                Arc::new(users),
                Arc::new(FakeCurrentUser::new(Some(UserId::new("1")))),
            )
        }
    }
}
