use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::favorites::FavoriteStore;

type FavoritesByUser = BTreeMap<String, Vec<String>>;

fn toggle_in(map: &mut FavoritesByUser, user_id: &str, listing_id: &str) -> bool {
    let ids = map.entry(user_id.to_string()).or_default();
    if let Some(pos) = ids.iter().position(|id| id == listing_id) {
        ids.remove(pos);
        if ids.is_empty() {
            map.remove(user_id);
        }
        false
    } else {
        ids.push(listing_id.to_string());
        true
    }
}

#[derive(Debug, Default)]
pub struct InMemoryFavoriteStore {
    by_user: Mutex<FavoritesByUser>,
}

impl InMemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteStore for InMemoryFavoriteStore {
    async fn favorites(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(self
            .by_user
            .lock()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn toggle(&self, user_id: &str, listing_id: &str) -> Result<bool> {
        let mut guard = self.by_user.lock().await;
        Ok(toggle_in(&mut guard, user_id, listing_id))
    }
}

/// Favorites for every user in one JSON object keyed by user id
pub struct JsonFileFavoriteStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileFavoriteStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<FavoritesByUser> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) if json.trim().is_empty() => Ok(FavoritesByUser::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, no favorites", self.path.display());
                Ok(FavoritesByUser::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, map: &FavoritesByUser) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, serde_json::to_string_pretty(map)?).await?;
        Ok(())
    }
}

#[async_trait]
impl FavoriteStore for JsonFileFavoriteStore {
    async fn favorites(&self, user_id: &str) -> Result<Vec<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.remove(user_id).unwrap_or_default())
    }

    async fn toggle(&self, user_id: &str, listing_id: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut map = self.read().await?;
        let saved = toggle_in(&mut map, user_id, listing_id);
        self.write(&map).await?;
        Ok(saved)
    }
}
