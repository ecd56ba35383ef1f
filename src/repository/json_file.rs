use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{MalnadError, Result};
use crate::models::Listing;
use crate::repository::traits::{ListingEdit, ListingRepository};

/// Listings kept as a pretty-printed JSON array in a single file
pub struct JsonFileRepository {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<Listing>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) if json.trim().is_empty() => Ok(Vec::new()),
            Ok(json) => {
                let listings: Vec<Listing> = serde_json::from_str(&json)?;
                debug!("Loaded {} listings from {}", listings.len(), self.path.display());
                Ok(listings)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, listings: &[Listing]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(listings)?;
        tokio::fs::write(&self.path, json).await?;
        info!("💾 Saved {} listings to {}", listings.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl ListingRepository for JsonFileRepository {
    async fn list_load(&self) -> Result<Vec<Listing>> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn list_save(&self, listings: Vec<Listing>) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write(&listings).await
    }

    async fn list_append(&self, listing: Listing) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut listings = self.read().await?;
        if listings.iter().any(|l| l.id == listing.id) {
            return Err(MalnadError::DuplicateListing(listing.id));
        }
        listings.push(listing);
        self.write(&listings).await
    }

    async fn list_update(&self, id: &str, edit: ListingEdit) -> Result<Listing> {
        let _guard = self.lock.lock().await;
        let mut listings = self.read().await?;
        let slot = listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| MalnadError::not_found(id))?;

        edit(slot)?;
        let updated = slot.clone();
        self.write(&listings).await?;
        Ok(updated)
    }

    fn backend_name(&self) -> &'static str {
        "json-file"
    }
}
