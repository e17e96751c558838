use crate::entities::location::Location;
use crate::entities::user::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fields shared by every offer type. Embedded in the concrete offer
/// structs rather than inherited; serde flattens it back into one JSON
/// object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferBase {
    pub id: i64,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOffer {
    #[serde(flatten)]
    pub base: OfferBase,
    pub origin: Location,
    pub destination: Location,
    pub capacity: i32,
    pub transport_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationOffer {
    #[serde(flatten)]
    pub base: OfferBase,
    pub mode: Mode,
    pub language: Vec<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub sworn: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "REMOTE")]
    Remote,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Mode::Remote => write!(f, "REMOTE"),
        }
    }
}

impl FromStr for Mode {
    type Err = ();
    fn from_str(input: &str) -> Result<Mode, Self::Err> {
        match input {
            "REMOTE" => Ok(Mode::Remote),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "UA")]
    Ua,
    #[serde(rename = "PL")]
    Pl,
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Language::Ua => write!(f, "UA"),
            Language::Pl => write!(f, "PL"),
        }
    }
}

impl FromStr for Language {
    type Err = ();
    fn from_str(input: &str) -> Result<Language, Self::Err> {
        match input {
            "UA" => Ok(Language::Ua),
            "PL" => Ok(Language::Pl),
            _ => Err(()),
        }
    }
}
