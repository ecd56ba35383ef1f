//! Shared listing builders for unit tests.

use chrono::{TimeZone, Utc};

use crate::models::{Category, Coordinate, GuestType, Listing, ListingStatus};

pub(crate) fn approved(id: &str) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Cozy PG {id}"),
        location: "Nehru Nagar, Puttur".to_string(),
        category: Category::Pg,
        price_label: "₹5000".to_string(),
        price_value: 5000,
        rating: 4.2,
        amenities: vec!["Wi-Fi".to_string(), "Food".to_string()],
        allowed_guest: GuestType::Any,
        coordinates: Some(Coordinate::new(12.7685, 75.2023)),
        status: ListingStatus::Approved,
        description: "Walking distance to college.".to_string(),
        main_image: format!("https://img.example/{id}.jpg"),
        owner_id: Some("owner-1".to_string()),
        submitted_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap(),
    }
}

pub(crate) fn with_status(id: &str, status: ListingStatus) -> Listing {
    Listing {
        status,
        ..approved(id)
    }
}
