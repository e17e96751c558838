use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Zero-based page window. `size` is the window length, `offset` the number
/// of matching rows to skip before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    pub fn of(page: i64, size: i64) -> PageRequest {
        PageRequest { page, size }
    }

    pub fn offset(&self) -> i64 {
        self.page * self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();
    fn from_str(input: &str) -> Result<SortDirection, Self::Err> {
        match input.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// A single sort specification: which field, and which way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort<K> {
    pub key: K,
    pub direction: SortDirection,
}

/// Page envelope returned by every listing endpoint: one window of content
/// plus the count of all matches across every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offers<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
}
