use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::entities::location::Location;
use crate::entities::offer::Language;
use crate::paging::{PageRequest, Sort, SortDirection};
use crate::search::{TranslationOfferSearchCriteria, TransportOfferSearchCriteria};

/// Transport listing filters. The dotted names mirror the nested criteria
/// they fill, so clients write origin.region=pomorskie&capacity=2.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransportOfferQuery {
    #[serde(rename = "origin.region")]
    pub origin_region: Option<String>,
    #[serde(rename = "origin.city")]
    pub origin_city: Option<String>,
    #[serde(rename = "destination.region")]
    pub destination_region: Option<String>,
    #[serde(rename = "destination.city")]
    pub destination_city: Option<String>,
    pub capacity: Option<i32>,
    #[serde(rename = "transportDate")]
    pub transport_date: Option<NaiveDate>,
}

impl TransportOfferQuery {
    pub fn into_criteria(self) -> TransportOfferSearchCriteria {
        TransportOfferSearchCriteria {
            origin: optional_location(self.origin_region, self.origin_city),
            destination: optional_location(self.destination_region, self.destination_city),
            capacity: self.capacity,
            transport_date: self.transport_date,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationOfferQuery {
    #[serde(rename = "location.region")]
    pub location_region: Option<String>,
    #[serde(rename = "location.city")]
    pub location_city: Option<String>,
    pub sworn: Option<bool>,
    pub language: Option<Language>,
}

impl TranslationOfferQuery {
    pub fn into_criteria(self) -> TranslationOfferSearchCriteria {
        TranslationOfferSearchCriteria {
            location: optional_location(self.location_region, self.location_city),
            sworn: self.sworn,
            language: self.language,
        }
    }
}

// A half-specified location cannot match anything sensibly, so the filter
// only engages once both components are present.
fn optional_location(region: Option<String>, city: Option<String>) -> Option<Location> {
    match (region, city) {
        (Some(region), Some(city)) => Some(Location { region, city }),
        _ => None,
    }
}

/// Shared paging and sorting parameters, Spring style: page, size and an
/// optional sort of the form field or field,direction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl PageQuery {
    pub fn into_page_and_sort<K: FromStr>(
        self,
    ) -> Result<(PageRequest, Option<Sort<K>>), String> {
        let page = self.page.unwrap_or(0);
        if page < 0 {
            return Err(format!("page must not be negative: {}", page));
        }
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size < 1 {
            return Err(format!("size must be positive: {}", size));
        }
        let sort = match &self.sort {
            Some(sort) => Some(parse_sort(sort)?),
            None => None,
        };
        Ok((PageRequest::of(page, size), sort))
    }
}

fn parse_sort<K: FromStr>(raw: &str) -> Result<Sort<K>, String> {
    let (field, direction) = match raw.split_once(',') {
        Some((field, direction)) => {
            let direction = SortDirection::from_str(direction)
                .map_err(|_| format!("unknown sort direction: {}", direction))?;
            (field, direction)
        }
        None => (raw, SortDirection::Asc),
    };
    let key = K::from_str(field).map_err(|_| format!("unknown sort field: {}", field))?;
    Ok(Sort { key, direction })
}
