use tracing::debug;

use crate::error::{MalnadError, Result};
use crate::models::{AugmentedListing, Listing};
use crate::query::predicates::{distance_from, matches_attributes, within_radius};
use crate::query::types::{FilterParams, QueryPage, SortMode};

/// Filter, sort and paginate a snapshot of approved listings.
///
/// Input listings are never modified; the returned page holds clones
/// augmented with the distance from `params.origin` when one is set.
/// Sorting is stable, so equal keys keep their input order.
pub fn execute(listings: &[Listing], params: &FilterParams) -> Result<QueryPage> {
    validate(params)?;

    let origin = params.origin.as_ref();
    let mut matched = Vec::new();

    for listing in listings {
        let distance_km = origin
            .map(|origin| distance_from(listing, origin))
            .transpose()?;

        if let Some(d) = distance_km {
            if !within_radius(d, params.max_distance_km) {
                continue;
            }
        }

        if matches_attributes(listing, params) {
            matched.push(AugmentedListing {
                listing: listing.clone(),
                distance_km,
            });
        }
    }

    sort(&mut matched, params);

    let total_count = matched.len();
    let total_pages = total_count.div_ceil(params.page_size);

    let start = (params.page_number - 1).saturating_mul(params.page_size);
    let page: Vec<AugmentedListing> = matched
        .into_iter()
        .skip(start)
        .take(params.page_size)
        .collect();

    debug!(
        "Query matched {} of {} listings, page {}/{} holds {}",
        total_count,
        listings.len(),
        params.page_number,
        total_pages,
        page.len()
    );

    Ok(QueryPage {
        page,
        total_count,
        total_pages,
    })
}

fn validate(params: &FilterParams) -> Result<()> {
    if params.page_size == 0 {
        return Err(MalnadError::invalid_argument("page size must be at least 1"));
    }
    if params.page_number == 0 {
        return Err(MalnadError::invalid_argument("page numbers start at 1"));
    }
    if let Some(origin) = &params.origin {
        if !origin.is_finite() {
            return Err(MalnadError::invalid_argument("origin coordinate is not finite"));
        }
        if params.max_distance_km.is_nan() {
            return Err(MalnadError::invalid_argument("search radius is not a number"));
        }
    }
    Ok(())
}

fn sort(matched: &mut [AugmentedListing], params: &FilterParams) {
    match (params.sort, params.origin.is_some()) {
        // Recommended means nearest once there is a reference point
        (SortMode::Recommended, true) => matched.sort_by(|a, b| {
            let da = a.distance_km.unwrap_or(f64::INFINITY);
            let db = b.distance_km.unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
        }),
        (SortMode::Recommended, false) => {
            matched.sort_by(|a, b| b.listing.rating.total_cmp(&a.listing.rating))
        }
        (SortMode::PriceAsc, _) => matched.sort_by_key(|item| item.listing.price_value),
        (SortMode::PriceDesc, _) => {
            matched.sort_by(|a, b| b.listing.price_value.cmp(&a.listing.price_value))
        }
    }
}
