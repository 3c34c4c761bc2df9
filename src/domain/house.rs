use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a listing. Never changes once a house is created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct HouseId(pub u64);

impl fmt::Display for HouseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HouseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(HouseId)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct House {
    #[serde(rename = "objectID")]
    pub id: HouseId,
    pub address: String,
    pub country: String, // Search key
    pub price: f64,
}

impl House {
    pub fn new(id: u64, address: impl Into<String>, country: impl Into<String>, price: f64) -> Self {
        Self {
            id: HouseId(id),
            address: address.into(),
            country: country.into(),
            price,
        }
    }

    /// Case-insensitive substring match on the country. An empty query matches everything.
    pub fn matches_country(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.country.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Envelope returned by the listing fetch: `{ "data": { "houses": [...] } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HouseFeed {
    pub data: FeedData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeedData {
    pub houses: Vec<House>,
}

impl HouseFeed {
    pub fn new(houses: Vec<House>) -> Self {
        Self {
            data: FeedData { houses },
        }
    }

    pub fn into_houses(self) -> Vec<House> {
        self.data.houses
    }
}
