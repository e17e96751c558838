use crate::entities::location::Location;
use serde::Serialize;

/// Accumulates every violated constraint so the client sees the full list,
/// not just the first failure. Serialized as the body of a 400 response.
#[derive(Debug, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> ValidationErrors {
        ValidationErrors { errors: vec![] }
    }

    pub fn single(message: String) -> ValidationErrors {
        ValidationErrors {
            errors: vec![message],
        }
    }

    pub fn add(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn require_text(
    value: Option<String>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        Some(_) => {
            errors.add(&format!("{} must not be blank", field));
            None
        }
        None => {
            errors.add(&format!("{} is required", field));
            None
        }
    }
}

pub fn require_location(
    region: Option<String>,
    city: Option<String>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<Location> {
    if region.is_none() && city.is_none() {
        errors.add(&format!("{} is required", field));
        return None;
    }
    let region = require_text(region, &format!("{}.region", field), errors);
    let city = require_text(city, &format!("{}.city", field), errors);
    match (region, city) {
        (Some(region), Some(city)) => Some(Location { region, city }),
        _ => None,
    }
}
