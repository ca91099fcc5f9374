//! Filters behind the admin list screens.
//!
//! `status=all` and empty strings mean "no filter"; search is a
//! case-insensitive substring match.

use chrono::NaiveDate;
use serde::de::{DeserializeOwned, IntoDeserializer, value::StrDeserializer};

use artisanhome_core::{DomainError, DomainResult};

use crate::{Appointment, AppointmentStatus, ContentItem, ContentKind, Enquiry, EnquiryStatus, GalleryItem};

/// Predicate (plus optional ordering) over one record type.
pub trait Query<T> {
    fn matches(&self, record: &T) -> bool;

    fn run(&self, records: Vec<T>) -> Vec<T> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnquiryQuery {
    pub status: Option<EnquiryStatus>,
    pub search: Option<String>,
}

impl Query<Enquiry> for EnquiryQuery {
    fn matches(&self, e: &Enquiry) -> bool {
        self.status.is_none_or(|s| e.status == s)
            && search_hits(self.search.as_deref(), &[e.name.as_str(), e.phone.as_str(), e.email.as_str()])
    }
}

/// Appointment list filter; results come back in schedule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub status: Option<AppointmentStatus>,
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
}

impl Query<Appointment> for AppointmentQuery {
    fn matches(&self, a: &Appointment) -> bool {
        self.status.is_none_or(|s| a.status == s)
            && self.date.is_none_or(|d| a.date == d)
            && search_hits(self.search.as_deref(), &[a.customer_name.as_str(), a.phone.as_str()])
    }

    fn run(&self, records: Vec<Appointment>) -> Vec<Appointment> {
        let mut hits: Vec<Appointment> = records.into_iter().filter(|r| self.matches(r)).collect();
        hits.sort_by(Appointment::schedule_cmp);
        hits
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

impl Query<GalleryItem> for GalleryQuery {
    fn matches(&self, g: &GalleryItem) -> bool {
        match active_text(self.category.as_deref()) {
            Some(category) => g.category.eq_ignore_ascii_case(category),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQuery {
    pub kind: Option<ContentKind>,
    pub active: Option<bool>,
}

impl Query<ContentItem> for ContentQuery {
    fn matches(&self, c: &ContentItem) -> bool {
        self.kind.is_none_or(|k| c.kind == k) && self.active.is_none_or(|a| c.active == a)
    }
}

/// Parse an optional enum-valued query parameter by its wire name.
///
/// `None`, `""` and `"all"` yield `Ok(None)`.
pub fn parse_choice<S: DeserializeOwned>(field: &str, raw: Option<&str>) -> DomainResult<Option<S>> {
    let Some(raw) = active_text(raw) else {
        return Ok(None);
    };
    if raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let de: StrDeserializer<'_, serde::de::value::Error> = raw.into_deserializer();
    S::deserialize(de)
        .map(Some)
        .map_err(|_| DomainError::validation(format!("unknown {field} '{raw}'")))
}

fn active_text(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn search_hits(search: Option<&str>, fields: &[&str]) -> bool {
    let Some(needle) = active_text(search) else {
        return true;
    };
    let needle = needle.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}
