//! Independent filter stages. A listing is shown iff every stage accepts it.

use crate::error::{MalnadError, Result};
use crate::models::{Category, Coordinate, GuestType, Listing};
use crate::query::geo::haversine_km;
use crate::query::types::{FilterParams, Selection};

pub fn matches_text(listing: &Listing, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();
    listing.title.to_lowercase().contains(&needle)
        || listing.location.to_lowercase().contains(&needle)
}

pub fn matches_price(listing: &Listing, max_price: u64) -> bool {
    listing.price_value <= max_price
}

pub fn matches_category(listing: &Listing, category: Selection<Category>) -> bool {
    match category {
        Selection::All => true,
        Selection::Only(c) => listing.category == c,
    }
}

/// Wildcard-or-exact: a Family-only listing is hidden from a Male filter.
pub fn matches_guest(listing: &Listing, guest_type: Selection<GuestType>) -> bool {
    match guest_type {
        Selection::All => true,
        Selection::Only(g) => listing.allowed_guest == GuestType::Any || listing.allowed_guest == g,
    }
}

/// "AC" is satisfied by an amenity called "AC / Cooling".
pub fn matches_amenities<S: AsRef<str>>(listing: &Listing, required: &[S]) -> bool {
    required.iter().all(|req| {
        let req = req.as_ref().to_lowercase();
        listing
            .amenities
            .iter()
            .any(|have| have.to_lowercase().contains(&req))
    })
}

/// Distance from `origin` to the listing, failing if the listing cannot be
/// placed on the map.
pub fn distance_from(listing: &Listing, origin: &Coordinate) -> Result<f64> {
    match listing.coordinates {
        Some(coords) if coords.is_finite() => Ok(haversine_km(origin, &coords)),
        Some(_) => Err(MalnadError::invalid_argument(format!(
            "listing {} has non-finite coordinates",
            listing.id
        ))),
        None => Err(MalnadError::invalid_argument(format!(
            "listing {} has no coordinates but a distance filter is active",
            listing.id
        ))),
    }
}

pub fn matches_distance(
    listing: &Listing,
    origin: Option<&Coordinate>,
    max_distance_km: f64,
) -> Result<bool> {
    match origin {
        None => Ok(true),
        Some(origin) => Ok(within_radius(distance_from(listing, origin)?, max_distance_km)),
    }
}

/// False for a NaN distance, so an unplaceable listing never slips through.
pub fn within_radius(distance_km: f64, max_distance_km: f64) -> bool {
    distance_km <= max_distance_km
}

/// Conjunction of every stage. The distance stage runs first so that a
/// listing without coordinates is reported whatever the other stages say.
pub fn passes_filter(listing: &Listing, params: &FilterParams) -> Result<bool> {
    Ok(
        matches_distance(listing, params.origin.as_ref(), params.max_distance_km)?
            && matches_attributes(listing, params),
    )
}

/// Every stage except distance.
pub(crate) fn matches_attributes(listing: &Listing, params: &FilterParams) -> bool {
    matches_text(listing, &params.text)
        && matches_price(listing, params.max_price)
        && matches_category(listing, params.category)
        && matches_guest(listing, params.guest_type)
        && matches_amenities(listing, &params.amenities)
}
