use crate::entities::location::Location;
use crate::entities::offer::{Language, TranslationOffer, TransportOffer};
use chrono::NaiveDate;
use std::str::FromStr;

/// Filter holder for transport offer listings. `None` fields are wildcards;
/// populated fields are AND-combined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportOfferSearchCriteria {
    pub origin: Option<Location>,
    pub destination: Option<Location>,
    pub capacity: Option<i32>,
    pub transport_date: Option<NaiveDate>,
}

impl TransportOfferSearchCriteria {
    /// Conjunctive predicate over one offer. The capacity filter is a
    /// lower bound: capacity=10 matches offers for 10 and 11 people, not 1.
    pub fn matches(&self, offer: &TransportOffer) -> bool {
        if let Some(origin) = &self.origin {
            if !offer.origin.matches_ignore_case(origin) {
                return false;
            }
        }
        if let Some(destination) = &self.destination {
            if !offer.destination.matches_ignore_case(destination) {
                return false;
            }
        }
        if let Some(capacity) = self.capacity {
            if offer.capacity < capacity {
                return false;
            }
        }
        if let Some(transport_date) = self.transport_date {
            if offer.transport_date != transport_date {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationOfferSearchCriteria {
    pub location: Option<Location>,
    pub sworn: Option<bool>,
    pub language: Option<Language>,
}

impl TranslationOfferSearchCriteria {
    pub fn matches(&self, offer: &TranslationOffer) -> bool {
        if let Some(location) = &self.location {
            let located = offer
                .location
                .as_ref()
                .map_or(false, |offer_location| offer_location.matches_ignore_case(location));
            if !located {
                return false;
            }
        }
        if let Some(sworn) = self.sworn {
            if offer.sworn != sworn {
                return false;
            }
        }
        if let Some(language) = self.language {
            if !offer.language.contains(&language) {
                return false;
            }
        }
        true
    }
}

/// Sortable transport offer fields, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportSortKey {
    Id,
    Title,
    Description,
    Capacity,
    TransportDate,
    CreatedAt,
}

impl FromStr for TransportSortKey {
    type Err = ();
    fn from_str(input: &str) -> Result<TransportSortKey, Self::Err> {
        match input {
            "id" => Ok(TransportSortKey::Id),
            "title" => Ok(TransportSortKey::Title),
            "description" => Ok(TransportSortKey::Description),
            "capacity" => Ok(TransportSortKey::Capacity),
            "transportDate" => Ok(TransportSortKey::TransportDate),
            "createdAt" => Ok(TransportSortKey::CreatedAt),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationSortKey {
    Id,
    Title,
    Description,
    Sworn,
    CreatedAt,
}

impl FromStr for TranslationSortKey {
    type Err = ();
    fn from_str(input: &str) -> Result<TranslationSortKey, Self::Err> {
        match input {
            "id" => Ok(TranslationSortKey::Id),
            "title" => Ok(TranslationSortKey::Title),
            "description" => Ok(TranslationSortKey::Description),
            "sworn" => Ok(TranslationSortKey::Sworn),
            "createdAt" => Ok(TranslationSortKey::CreatedAt),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::entities::location::Location;
    use crate::entities::offer::{Language, Mode, OfferBase, TranslationOffer, TransportOffer};
    use crate::entities::user::UserId;
    use crate::search::{
        TranslationOfferSearchCriteria, TransportOfferSearchCriteria, TransportSortKey,
    };
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn transport_offer(capacity: i32, transport_date: NaiveDate) -> TransportOffer {
        TransportOffer {
            base: OfferBase {
                id: 1,
                user_id: UserId::new("1"),
                title: "some title".to_string(),
                description: "some description".to_string(),
                created_at: 0,
            },
            origin: Location::new("mazowieckie", "warszawa"),
            destination: Location::new("pomorskie", "gdańsk"),
            capacity,
            transport_date,
        }
    }

    fn translation_offer(location: Option<Location>, sworn: bool, language: Vec<Language>) -> TranslationOffer {
        TranslationOffer {
            base: OfferBase {
                id: 1,
                user_id: UserId::new("1"),
                title: "some title".to_string(),
                description: "some description".to_string(),
                created_at: 0,
            },
            mode: Mode::Remote,
            language,
            location,
            sworn,
        }
    }

    #[test]
    fn empty_criteria_match_everything() {
        let criteria = TransportOfferSearchCriteria::default();
        let offer = transport_offer(1, NaiveDate::from_ymd_opt(2022, 3, 21).unwrap());
        assert!(criteria.matches(&offer));
    }

    #[test]
    fn capacity_filters_as_an_inclusive_lower_bound() {
        let date = NaiveDate::from_ymd_opt(2022, 3, 21).unwrap();
        let criteria = TransportOfferSearchCriteria {
            capacity: Some(10),
            ..Default::default()
        };
        assert!(criteria.matches(&transport_offer(10, date)));
        assert!(criteria.matches(&transport_offer(11, date)));
        assert!(!criteria.matches(&transport_offer(1, date)));
    }

    #[test]
    fn transport_date_must_match_exactly() {
        let criteria = TransportOfferSearchCriteria {
            transport_date: NaiveDate::from_ymd_opt(2022, 3, 21),
            ..Default::default()
        };
        assert!(criteria.matches(&transport_offer(1, NaiveDate::from_ymd_opt(2022, 3, 21).unwrap())));
        assert!(!criteria.matches(&transport_offer(1, NaiveDate::from_ymd_opt(2022, 3, 22).unwrap())));
    }

    #[test]
    fn origin_matches_case_insensitively() {
        let date = NaiveDate::from_ymd_opt(2022, 3, 21).unwrap();
        let criteria = TransportOfferSearchCriteria {
            origin: Some(Location::new("Mazowieckie", "Warszawa")),
            ..Default::default()
        };
        assert!(criteria.matches(&transport_offer(1, date)));

        let elsewhere = TransportOfferSearchCriteria {
            origin: Some(Location::new("Pomorskie", "Wejherowo")),
            ..Default::default()
        };
        assert!(!elsewhere.matches(&transport_offer(1, date)));
    }

    #[test]
    fn all_provided_filters_must_hold_together() {
        let date = NaiveDate::from_ymd_opt(2022, 3, 21).unwrap();
        let criteria = TransportOfferSearchCriteria {
            origin: Some(Location::new("mazowieckie", "warszawa")),
            capacity: Some(5),
            ..Default::default()
        };
        assert!(criteria.matches(&transport_offer(5, date)));
        // origin matches but the capacity bound does not
        assert!(!criteria.matches(&transport_offer(4, date)));
    }

    #[test]
    fn language_filter_checks_containment() {
        let criteria = TranslationOfferSearchCriteria {
            language: Some(Language::Ua),
            ..Default::default()
        };
        assert!(criteria.matches(&translation_offer(None, false, vec![Language::Ua, Language::Pl])));
        assert!(!criteria.matches(&translation_offer(None, false, vec![Language::Pl])));
    }

    #[test]
    fn location_filter_skips_offers_without_location() {
        let criteria = TranslationOfferSearchCriteria {
            location: Some(Location::new("Pomorskie", "Gdynia")),
            ..Default::default()
        };
        assert!(!criteria.matches(&translation_offer(None, false, vec![Language::Ua])));
        assert!(criteria.matches(&translation_offer(
            Some(Location::new("pomorskie", "GdyniA")),
            false,
            vec![Language::Ua]
        )));
    }

    #[test]
    fn sworn_filter_is_exact() {
        let criteria = TranslationOfferSearchCriteria {
            sworn: Some(true),
            ..Default::default()
        };
        assert!(criteria.matches(&translation_offer(None, true, vec![Language::Ua])));
        assert!(!criteria.matches(&translation_offer(None, false, vec![Language::Ua])));
    }

    #[test]
    fn sort_keys_parse_their_wire_names() {
        assert_eq!(TransportSortKey::from_str("title"), Ok(TransportSortKey::Title));
        assert_eq!(
            TransportSortKey::from_str("transportDate"),
            Ok(TransportSortKey::TransportDate)
        );
        assert!(TransportSortKey::from_str("owner").is_err());
        assert!(TransportSortKey::from_str("Title").is_err());
    }
}
