use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use artisanhome_core::{DomainError, DomainResult, Entity, Stamp};

use crate::record::{Record, merge};

/// Lead submitted through the storefront contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enquiry {
    pub id: Stamp,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub requirement: String,
    pub status: EnquiryStatus,
    pub date: NaiveDate,
    pub notes: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Converted,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEnquiry {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub city: String,
    pub requirement: String,
}

impl NewEnquiry {
    pub fn validate(&self) -> DomainResult<()> {
        DomainError::require_fields(&[
            ("name", self.name.as_str()),
            ("phone", self.phone.as_str()),
            ("city", self.city.as_str()),
            ("requirement", self.requirement.as_str()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnquiryPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub requirement: Option<String>,
    pub status: Option<EnquiryStatus>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl EnquiryPatch {
    pub fn status(status: EnquiryStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Entity for Enquiry {
    type Id = Stamp;

    fn id(&self) -> &Stamp {
        &self.id
    }
}

impl Record for Enquiry {
    type Draft = NewEnquiry;
    type Patch = EnquiryPatch;

    fn create(draft: NewEnquiry, stamp: Stamp, today: NaiveDate) -> Self {
        Self {
            id: stamp,
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            city: draft.city,
            requirement: draft.requirement,
            status: EnquiryStatus::New,
            date: today,
            notes: String::new(),
        }
    }

    fn apply(&mut self, patch: EnquiryPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.phone, patch.phone);
        merge(&mut self.email, patch.email);
        merge(&mut self.city, patch.city);
        merge(&mut self.requirement, patch.requirement);
        merge(&mut self.status, patch.status);
        merge(&mut self.date, patch.date);
        merge(&mut self.notes, patch.notes);
    }
}
