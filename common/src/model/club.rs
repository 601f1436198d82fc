use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discipline a club is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClubType {
    Football,
    Futsal,
}

impl ClubType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubType::Football => "football",
            ClubType::Futsal => "futsal",
        }
    }
}

impl fmt::Display for ClubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClubType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "football" => Ok(ClubType::Football),
            "futsal" => Ok(ClubType::Futsal),
            _ => Err(()),
        }
    }
}

/// A club identity as returned by one of the lookup sources.
///
/// The `id` is only unique within the source that produced it; identities
/// are request-scoped and never persisted as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Club {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub club_type: Option<ClubType>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub website: String,
    #[serde(rename = "logo_url", default, skip_serializing_if = "String::is_empty")]
    pub logo_url: String,
}
