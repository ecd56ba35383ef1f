use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{MalnadError, Result};
use crate::models::Listing;
use crate::repository::traits::{ListingEdit, ListingRepository};

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    listings: RwLock<Vec<Listing>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings: RwLock::new(listings),
        }
    }
}

#[async_trait]
impl ListingRepository for InMemoryRepository {
    async fn list_load(&self) -> Result<Vec<Listing>> {
        Ok(self.listings.read().await.clone())
    }

    async fn list_save(&self, listings: Vec<Listing>) -> Result<()> {
        *self.listings.write().await = listings;
        Ok(())
    }

    async fn list_append(&self, listing: Listing) -> Result<()> {
        let mut guard = self.listings.write().await;
        if guard.iter().any(|l| l.id == listing.id) {
            return Err(MalnadError::DuplicateListing(listing.id));
        }
        guard.push(listing);
        Ok(())
    }

    async fn list_update(&self, id: &str, edit: ListingEdit) -> Result<Listing> {
        let mut guard = self.listings.write().await;
        let slot = guard
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| MalnadError::not_found(id))?;

        let mut updated = slot.clone();
        edit(&mut updated)?;
        *slot = updated.clone();
        Ok(updated)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
