//! Listing Query Engine
//!
//! Turns a snapshot of approved listings plus the browse page's filter
//! state into one page of results.
//!
//! - **geo**: haversine distance between two coordinates.
//! - **predicates**: text, price, category, guest, amenity and radius stages.
//! - **pipeline**: filter, attach distance, sort, paginate.

pub mod geo;
pub mod pipeline;
pub mod predicates;
pub mod types;

#[cfg(test)]
mod tests;

pub use geo::haversine_km;
pub use pipeline::execute;
pub use predicates::passes_filter;
pub use types::{FilterParams, QueryPage, Selection, SortMode};
