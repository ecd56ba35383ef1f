//! Per-user saved listings.
//!
//! Each signed-in user keeps a list of listing ids. Ids are stored as
//! given; ones that no longer resolve to a browsable listing are simply
//! skipped when the saved listings are shown.

pub mod store;


use async_trait::async_trait;
use tracing::info;

use crate::error::{MalnadError, Result};
use crate::models::Listing;
use crate::repository::ListingRepository;

pub use store::{InMemoryFavoriteStore, JsonFileFavoriteStore};

/// Where each user's favorite ids live
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// The user's favorite ids, oldest first
    async fn favorites(&self, user_id: &str) -> Result<Vec<String>>;

    /// Add `listing_id` if absent, remove it if present, atomically.
    /// Returns whether it is saved afterwards.
    async fn toggle(&self, user_id: &str, listing_id: &str) -> Result<bool>;
}

fn require_user(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(MalnadError::invalid_argument("sign in to save listings"));
    }
    Ok(())
}

/// Save or unsave a listing for a user. Returns whether it is now saved.
pub async fn toggle_favorite(
    store: &dyn FavoriteStore,
    user_id: &str,
    listing_id: &str,
) -> Result<bool> {
    require_user(user_id)?;
    if listing_id.trim().is_empty() {
        return Err(MalnadError::invalid_argument("listing id is required"));
    }

    let saved = store.toggle(user_id, listing_id).await?;
    if saved {
        info!("❤️ {} saved {}", user_id, listing_id);
    } else {
        info!("{} removed {} from favorites", user_id, listing_id);
    }
    Ok(saved)
}

pub async fn favorites(store: &dyn FavoriteStore, user_id: &str) -> Result<Vec<String>> {
    require_user(user_id)?;
    store.favorites(user_id).await
}

pub async fn is_favorite(store: &dyn FavoriteStore, user_id: &str, listing_id: &str) -> Result<bool> {
    Ok(favorites(store, user_id)
        .await?
        .iter()
        .any(|id| id == listing_id))
}

/// The user's saved listings that are currently browsable, in catalogue order
pub async fn saved_listings(
    store: &dyn FavoriteStore,
    repo: &dyn ListingRepository,
    user_id: &str,
) -> Result<Vec<Listing>> {
    let ids = favorites(store, user_id).await?;
    let listings = repo.load_approved().await?;
    Ok(listings
        .into_iter()
        .filter(|l| ids.contains(&l.id))
        .collect())
}
