use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Listing, ListingStatus};

/// In-place edit applied by [`ListingRepository::list_update`]
pub type ListingEdit = Box<dyn FnOnce(&mut Listing) -> Result<()> + Send>;

/// Storage for listings, whatever sits behind it
/// (in-memory for tests, a JSON file for the CLI)
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Every stored listing, in insertion order
    async fn list_load(&self) -> Result<Vec<Listing>>;

    /// Replace the stored collection
    async fn list_save(&self, listings: Vec<Listing>) -> Result<()>;

    /// Append one listing. Fails with `DuplicateListing` if the id is taken.
    async fn list_append(&self, listing: Listing) -> Result<()>;

    /// Apply `edit` to the listing with `id` and store the result, holding
    /// the repository lock throughout. Nothing is written if `edit` fails.
    /// Fails with `NotFound` for an unknown id.
    async fn list_update(&self, id: &str, edit: ListingEdit) -> Result<Listing>;

    /// Listings visible on the browse page: approved, with a photo
    async fn load_approved(&self) -> Result<Vec<Listing>> {
        let listings = self.list_load().await?;
        Ok(listings
            .into_iter()
            .filter(|l| l.status == ListingStatus::Approved && !l.main_image.trim().is_empty())
            .collect())
    }

    fn backend_name(&self) -> &'static str;
}
