use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::offer::{Language, Mode, OfferBase, TranslationOffer, TransportOffer};
use crate::entities::user::UserId;
use crate::validation::{require_location, require_text, ValidationErrors};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationDto {
    pub region: Option<String>,
    pub city: Option<String>,
}

/// Incoming transport offer. Everything is optional at the wire level; the
/// conversion into an entity collects every violated constraint at once.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransportOfferDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub origin: Option<LocationDto>,
    pub destination: Option<LocationDto>,
    pub capacity: Option<i32>,
    pub transport_date: Option<NaiveDate>,
}

impl TransportOfferDto {
    pub fn into_offer(self, user_id: UserId) -> Result<TransportOffer, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = require_text(self.title, "title", &mut errors);
        let description = self.description.unwrap_or_default();
        let (origin_region, origin_city) = location_components(self.origin);
        let origin = require_location(origin_region, origin_city, "origin", &mut errors);
        let (destination_region, destination_city) = location_components(self.destination);
        let destination = require_location(
            destination_region,
            destination_city,
            "destination",
            &mut errors,
        );
        let capacity = match self.capacity {
            Some(capacity) if (1..=99).contains(&capacity) => Some(capacity),
            Some(_) => {
                errors.add("capacity must be between 1 and 99");
                None
            }
            None => {
                errors.add("capacity is required");
                None
            }
        };
        let transport_date = match self.transport_date {
            Some(transport_date) => Some(transport_date),
            None => {
                errors.add("transportDate is required");
                None
            }
        };

        match (title, origin, destination, capacity, transport_date) {
            (Some(title), Some(origin), Some(destination), Some(capacity), Some(transport_date)) => {
                Ok(TransportOffer {
                    base: OfferBase {
                        id: 0,
                        user_id,
                        title,
                        description,
                        created_at: Utc::now().timestamp_millis(),
                    },
                    origin,
                    destination,
                    capacity,
                    transport_date,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TranslationOfferDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub mode: Option<Mode>,
    pub language: Option<Vec<Language>>,
    pub location: Option<LocationDto>,
    pub sworn: Option<bool>,
}

impl TranslationOfferDto {
    pub fn into_offer(self, user_id: UserId) -> Result<TranslationOffer, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = require_text(self.title, "title", &mut errors);
        let description = self.description.unwrap_or_default();
        let mode = match self.mode {
            Some(mode) => Some(mode),
            None => {
                errors.add("mode is required");
                None
            }
        };
        let language = match self.language {
            Some(language) if !language.is_empty() => Some(language),
            Some(_) => {
                errors.add("language must not be empty");
                None
            }
            None => {
                errors.add("language is required");
                None
            }
        };
        // A location is optional here, but once one is sent it has to be
        // complete.
        let location = match self.location {
            Some(location) => {
                require_location(location.region, location.city, "location", &mut errors)
                    .map(Some)
            }
            None => Some(None),
        };
        let sworn = self.sworn.unwrap_or(false);

        match (title, mode, language, location) {
            (Some(title), Some(mode), Some(language), Some(location)) => Ok(TranslationOffer {
                base: OfferBase {
                    id: 0,
                    user_id,
                    title,
                    description,
                    created_at: Utc::now().timestamp_millis(),
                },
                mode,
                language,
                location,
                sworn,
            }),
            _ => Err(errors),
        }
    }
}

fn location_components(location: Option<LocationDto>) -> (Option<String>, Option<String>) {
    match location {
        Some(location) => (location.region, location.city),
        None => (None, None),
    }
}
