//! Listing search and moderation for Malnad Homes.
//!
//! The core is [`query::execute`], a pure pipeline that filters, sorts and
//! paginates a snapshot of approved listings. Listings come from a
//! [`repository::ListingRepository`], enter it through [`moderation`], and
//! "near me" origins are resolved through [`geolocation`]. Users keep
//! saved listings through [`favorites`].

pub mod config;
pub mod error;
pub mod favorites;
pub mod geolocation;
pub mod models;
pub mod moderation;
pub mod query;
pub mod repository;

#[cfg(test)]
mod fixtures;

pub use error::{MalnadError, Result};
