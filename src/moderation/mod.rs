//! Owner submissions and admin review.
//!
//! Owners submit listings which start out `pending`; an admin then approves
//! or rejects each one. Only approved listings reach the browse page.


use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{MalnadError, Result};
use crate::models::{Category, Coordinate, GuestType, Listing, ListingStatus};
use crate::repository::ListingRepository;

/// Where the owner portal places listings submitted without a position
pub const DEFAULT_COORDINATES: Coordinate = Coordinate {
    lat: 12.7685,
    lng: 75.2023,
};

/// Payload of the owner portal's upload form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    pub category: Category,
    pub location: String,
    pub price_value: u64,
    pub description: String,
    pub main_image: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub allowed_guest: GuestType,
    #[serde(default)]
    pub coordinates: Option<Coordinate>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl NewListing {
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("title", &self.title),
            ("location", &self.location),
            ("description", &self.description),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(MalnadError::invalid_argument(format!("{field} is required")));
            }
        }
        if self.main_image.trim().is_empty() {
            return Err(MalnadError::invalid_argument("Upload an image first"));
        }
        if let Some(coords) = &self.coordinates {
            if !coords.is_finite() {
                return Err(MalnadError::invalid_argument("coordinates must be finite"));
            }
        }
        Ok(())
    }

    fn into_listing(self) -> Listing {
        Listing {
            id: format!("prop_{}", Uuid::new_v4().simple()),
            title: self.title.trim().to_string(),
            location: self.location.trim().to_string(),
            category: self.category,
            price_label: format!("₹{}", self.price_value),
            price_value: self.price_value,
            rating: 0.0,
            amenities: self.amenities,
            allowed_guest: self.allowed_guest,
            coordinates: Some(self.coordinates.unwrap_or(DEFAULT_COORDINATES)),
            status: ListingStatus::Pending,
            description: self.description,
            main_image: self.main_image,
            owner_id: self.owner_id,
            submitted_at: Utc::now(),
        }
    }
}

/// Validate and store a new listing awaiting review
pub async fn submit(repo: &dyn ListingRepository, new_listing: NewListing) -> Result<Listing> {
    new_listing.validate()?;
    let listing = new_listing.into_listing();
    repo.list_append(listing.clone()).await?;

    info!("📥 Listing {} ({}) submitted for review", listing.id, listing.title);
    Ok(listing)
}

/// Listings awaiting review, oldest first
pub async fn pending(repo: &dyn ListingRepository) -> Result<Vec<Listing>> {
    let listings = repo.list_load().await?;
    Ok(listings
        .into_iter()
        .filter(|l| l.status == ListingStatus::Pending)
        .collect())
}

/// Move a pending listing to `approved` or `rejected`
pub async fn set_status(
    repo: &dyn ListingRepository,
    id: &str,
    to: ListingStatus,
) -> Result<Listing> {
    let updated = repo
        .list_update(
            id,
            Box::new(move |listing: &mut Listing| {
                if listing.status != ListingStatus::Pending || to == ListingStatus::Pending {
                    return Err(MalnadError::InvalidTransition {
                        id: listing.id.clone(),
                        from: listing.status,
                        to,
                    });
                }
                listing.status = to;
                Ok(())
            }),
        )
        .await?;

    info!("Listing {} is now {}", id, to);
    Ok(updated)
}

pub async fn approve(repo: &dyn ListingRepository, id: &str) -> Result<Listing> {
    set_status(repo, id, ListingStatus::Approved).await
}

pub async fn reject(repo: &dyn ListingRepository, id: &str) -> Result<Listing> {
    set_status(repo, id, ListingStatus::Rejected).await
}
