use serde::{Deserialize, Serialize};

/// Region + city pair used for origin/destination matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub region: String,
    pub city: String,
}

impl Location {
    pub fn new(region: &str, city: &str) -> Location {
        Location {
            region: region.to_string(),
            city: city.to_string(),
        }
    }

    /// Case-insensitive match on both components. Unicode-aware, since the
    /// data carries names like "Gdańsk" and "Pruszcz Gdański".
    pub fn matches_ignore_case(&self, other: &Location) -> bool {
        self.region.to_lowercase() == other.region.to_lowercase()
            && self.city.to_lowercase() == other.city.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use crate::entities::location::Location;

    #[test]
    fn matches_regardless_of_letter_case() {
        let stored = Location::new("mazowieckie", "warszawa");
        let queried = Location::new("Mazowieckie", "Warszawa");
        assert!(stored.matches_ignore_case(&queried));
    }

    #[test]
    fn matches_polish_diacritics_case_insensitively() {
        let stored = Location::new("pomorskie", "GdyniA");
        let queried = Location::new("Pomorskie", "Gdynia");
        assert!(stored.matches_ignore_case(&queried));

        let stored = Location::new("Pomorskie", "GDAŃSK");
        let queried = Location::new("pomorskie", "gdańsk");
        assert!(stored.matches_ignore_case(&queried));
    }

    #[test]
    fn rejects_different_city_in_same_region() {
        let stored = Location::new("Pomorskie", "Wejherowo");
        let queried = Location::new("Pomorskie", "Gdynia");
        assert!(!stored.matches_ignore_case(&queried));
    }

    #[test]
    fn rejects_same_city_in_different_region() {
        let stored = Location::new("Wielkopolskie", "Warszawa");
        let queried = Location::new("Mazowieckie", "Warszawa");
        assert!(!stored.matches_ignore_case(&queried));
    }
}
