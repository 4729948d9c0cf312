//! Registry of images fetched by the image search tool
//!
//! Each fetched image is kept under its result title so clients can re-read
//! it later as a `brave-image://<title>` resource. The registry holds at most
//! `capacity` images; inserting beyond that evicts the oldest entry.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;

/// URI scheme prefix of image resources
pub const IMAGE_URI_PREFIX: &str = "brave-image://";

/// A cached image, already base64-encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedImage {
    pub mime_type: String,
    pub data: String,
}

/// Bounded, shareable title -> image store
#[derive(Clone)]
pub struct ImageRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    capacity: usize,
}

#[derive(Default)]
struct RegistryInner {
    images: HashMap<String, CachedImage>,
    /// Titles from oldest to newest
    order: VecDeque<String>,
}

impl ImageRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner::default())),
            capacity,
        }
    }

    /// Store an image under `title`, returning the title evicted to make room
    ///
    /// Re-inserting an existing title replaces the image and makes it the
    /// newest entry.
    pub async fn insert(&self, title: impl Into<String>, image: CachedImage) -> Option<String> {
        let title = title.into();
        let mut inner = self.inner.write().await;

        if inner.images.insert(title.clone(), image).is_some() {
            inner.order.retain(|t| t != &title);
        }
        inner.order.push_back(title);

        if inner.order.len() > self.capacity {
            let evicted = inner.order.pop_front()?;
            inner.images.remove(&evicted);
            tracing::debug!(title = %evicted, "Evicted cached image");
            return Some(evicted);
        }
        None
    }

    pub async fn get(&self, title: &str) -> Option<CachedImage> {
        self.inner.read().await.images.get(title).cloned()
    }

    /// Titles and mime types, oldest first
    pub async fn list(&self) -> Vec<(String, String)> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|t| inner.images.get(t).map(|img| (t.clone(), img.mime_type.clone())))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.images.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Resource URI of the image stored under `title`
pub fn image_uri(title: &str) -> String {
    format!("{}{}", IMAGE_URI_PREFIX, title)
}

/// Title addressed by an image resource URI, if the URI uses the image scheme
pub fn title_from_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(IMAGE_URI_PREFIX)
}
