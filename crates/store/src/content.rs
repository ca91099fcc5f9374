use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use artisanhome_core::{DomainError, DomainResult, Entity, Stamp};

use crate::record::{Record, merge};

/// Editable storefront copy block (hero banner, testimonial, about text).
///
/// Keyed by `"<kind>-<stamp>"`, e.g. `banner-1718000000000`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub active: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Banner,
    Testimonial,
    About,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Banner => "banner",
            ContentKind::Testimonial => "testimonial",
            ContentKind::About => "about",
        }
    }
}

impl core::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContentItem {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

impl NewContentItem {
    pub fn validate(&self) -> DomainResult<()> {
        DomainError::require_fields(&[("title", self.title.as_str()), ("content", self.content.as_str())])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub active: Option<bool>,
}

impl Entity for ContentItem {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Record for ContentItem {
    type Draft = NewContentItem;
    type Patch = ContentPatch;

    fn create(draft: NewContentItem, stamp: Stamp, _today: NaiveDate) -> Self {
        Self {
            id: format!("{}-{}", draft.kind, stamp),
            kind: draft.kind,
            title: draft.title,
            content: draft.content,
            image_url: draft.image_url,
            author: draft.author,
            active: draft.active,
        }
    }

    fn apply(&mut self, patch: ContentPatch) {
        merge(&mut self.title, patch.title);
        merge(&mut self.content, patch.content);
        if patch.image_url.is_some() {
            self.image_url = patch.image_url;
        }
        if patch.author.is_some() {
            self.author = patch.author;
        }
        merge(&mut self.active, patch.active);
    }
}
