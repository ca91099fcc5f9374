//! `artisanhome-store`: observable in-memory store behind the admin screens.
//!
//! Pure in-memory: no IO, no async. Mutations notify subscribers synchronously.

pub mod appointment;
pub mod collection;
pub mod content;
pub mod enquiry;
pub mod gallery;
pub mod query;
pub mod record;
pub mod seed;
pub mod settings;
pub mod store;
pub mod subscribers;

pub use appointment::{Appointment, AppointmentKind, AppointmentPatch, AppointmentStatus, NewAppointment};
pub use collection::Collection;
pub use content::{ContentItem, ContentKind, ContentPatch, NewContentItem};
pub use enquiry::{Enquiry, EnquiryPatch, EnquiryStatus, NewEnquiry};
pub use gallery::{GalleryItem, GalleryPatch, NewGalleryItem};
pub use query::{AppointmentQuery, ContentQuery, EnquiryQuery, GalleryQuery, Query, parse_choice};
pub use record::Record;
pub use seed::Seed;
pub use settings::{SettingsCell, SettingsPatch, SiteSettings};
pub use store::Store;
pub use subscribers::{Listener, SubscriberId, Subscribers, Subscription};
