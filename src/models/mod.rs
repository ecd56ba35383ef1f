use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MalnadError;

/// A point on the earth's surface, in degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl FromStr for Coordinate {
    type Err = MalnadError;

    /// Parses `"lat,lng"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| MalnadError::invalid_argument(format!("expected LAT,LNG, got '{s}'")))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| MalnadError::invalid_argument(format!("invalid coordinate '{s}'")))
        };

        Ok(Self::new(parse(lat)?, parse(lng)?))
    }
}

/// Kind of property being let
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Villa,
    #[serde(rename = "PG")]
    Pg,
    Apartment,
    Hostel,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Villa => "Villa",
            Category::Pg => "PG",
            Category::Apartment => "Apartment",
            Category::Hostel => "Hostel",
        };
        f.write_str(label)
    }
}

impl FromStr for Category {
    type Err = MalnadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "villa" => Ok(Category::Villa),
            "pg" => Ok(Category::Pg),
            "apartment" | "apt" => Ok(Category::Apartment),
            "hostel" => Ok(Category::Hostel),
            other => Err(MalnadError::invalid_argument(format!("unknown category '{other}'"))),
        }
    }
}

/// Who the owner is willing to let to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum GuestType {
    #[default]
    Any,
    Family,
    Male,
    Female,
}

impl fmt::Display for GuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GuestType::Any => "Any",
            GuestType::Family => "Family",
            GuestType::Male => "Male",
            GuestType::Female => "Female",
        };
        f.write_str(label)
    }
}

impl FromStr for GuestType {
    type Err = MalnadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" => Ok(GuestType::Any),
            "family" => Ok(GuestType::Family),
            "male" => Ok(GuestType::Male),
            "female" => Ok(GuestType::Female),
            other => Err(MalnadError::invalid_argument(format!("unknown guest type '{other}'"))),
        }
    }
}

/// Moderation state of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Approved => "approved",
            ListingStatus::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// Core listing data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub location: String,
    pub category: Category,
    /// Display price, e.g. "₹5,000"
    #[serde(default)]
    pub price_label: String,
    pub price_value: u64,
    /// 0 means unrated
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub allowed_guest: GuestType,
    #[serde(default)]
    pub coordinates: Option<Coordinate>,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub main_image: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub submitted_at: DateTime<Utc>,
}

/// A listing as returned from a query, with its distance from the origin
/// when one was supplied
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AugmentedListing {
    #[serde(flatten)]
    pub listing: Listing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}
