//! Site-wide settings singleton.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::record::merge;
use crate::subscribers::{Subscribers, Subscription};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub business_name: String,
    pub phone1: String,
    pub phone2: String,
    pub email: String,
    pub address: String,
    pub whatsapp_number: String,
    pub business_hours: String,
    pub meta_title: String,
    pub meta_description: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            business_name: "ArtisanHome".into(),
            phone1: "+91 98765 43210".into(),
            phone2: "+91 98765 43211".into(),
            email: "hello@artisanhome.in".into(),
            address: "42 MG Road, Brigade Gateway, Bangalore, Karnataka 560001".into(),
            whatsapp_number: "+919876543210".into(),
            business_hours: "Mon - Sat: 10:00 AM - 7:00 PM, Sunday: By Appointment".into(),
            meta_title: "ArtisanHome - Premium Furniture & Interior Solutions".into(),
            meta_description: "Transform your home with custom furniture, curtains, blinds, and \
                               complete interior solutions. Book your free consultation today."
                .into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub business_name: Option<String>,
    pub phone1: Option<String>,
    pub phone2: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub whatsapp_number: Option<String>,
    pub business_hours: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl SiteSettings {
    pub fn apply(&mut self, patch: SettingsPatch) {
        merge(&mut self.business_name, patch.business_name);
        merge(&mut self.phone1, patch.phone1);
        merge(&mut self.phone2, patch.phone2);
        merge(&mut self.email, patch.email);
        merge(&mut self.address, patch.address);
        merge(&mut self.whatsapp_number, patch.whatsapp_number);
        merge(&mut self.business_hours, patch.business_hours);
        merge(&mut self.meta_title, patch.meta_title);
        merge(&mut self.meta_description, patch.meta_description);
    }
}

/// Observable holder for the single [`SiteSettings`] record.
pub struct SettingsCell {
    value: RwLock<SiteSettings>,
    subscribers: Arc<Subscribers>,
}

impl SettingsCell {
    pub(crate) fn new(value: SiteSettings, subscribers: Arc<Subscribers>) -> Self {
        Self {
            value: RwLock::new(value),
            subscribers,
        }
    }

    pub fn get(&self) -> SiteSettings {
        self.value.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Always succeeds; there is no identifier to miss.
    pub fn update(&self, patch: SettingsPatch) {
        self.value
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(patch);

        tracing::debug!("settings updated");
        self.subscribers.notify();
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }
}

impl core::fmt::Debug for SettingsCell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SettingsCell").field("value", &self.get()).finish()
    }
}
