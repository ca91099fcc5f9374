use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use artisanhome_core::{DomainError, DomainResult, Entity, Stamp};

use crate::record::{Record, merge};

/// Finished-project photo shown on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: Stamp,
    pub title: String,
    pub category: String,
    pub room_type: String,
    pub image_url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGalleryItem {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub room_type: String,
    pub image_url: String,
    #[serde(default)]
    pub description: String,
}

impl NewGalleryItem {
    pub fn validate(&self) -> DomainResult<()> {
        DomainError::require_fields(&[
            ("title", self.title.as_str()),
            ("category", self.category.as_str()),
            ("image_url", self.image_url.as_str()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub room_type: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

impl Entity for GalleryItem {
    type Id = Stamp;

    fn id(&self) -> &Stamp {
        &self.id
    }
}

impl Record for GalleryItem {
    type Draft = NewGalleryItem;
    type Patch = GalleryPatch;

    fn create(draft: NewGalleryItem, stamp: Stamp, _today: NaiveDate) -> Self {
        Self {
            id: stamp,
            title: draft.title,
            category: draft.category,
            room_type: draft.room_type,
            image_url: draft.image_url,
            description: draft.description,
        }
    }

    fn apply(&mut self, patch: GalleryPatch) {
        merge(&mut self.title, patch.title);
        merge(&mut self.category, patch.category);
        merge(&mut self.room_type, patch.room_type);
        merge(&mut self.image_url, patch.image_url);
        merge(&mut self.description, patch.description);
    }
}
