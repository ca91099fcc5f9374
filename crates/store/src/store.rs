//! The reactive store: every admin collection plus the settings singleton.

use std::sync::Arc;

use artisanhome_core::StampClock;

use crate::collection::Collection;
use crate::seed::Seed;
use crate::settings::SettingsCell;
use crate::subscribers::{Subscribers, Subscription};
use crate::{Appointment, ContentItem, Enquiry, GalleryItem};

/// In-memory back-office data with change notification.
///
/// Constructed once at startup and passed around explicitly (usually as
/// `Arc<Store>`). All collections share one identifier clock and one
/// subscriber list.
#[derive(Debug)]
pub struct Store {
    subscribers: Arc<Subscribers>,
    enquiries: Collection<Enquiry>,
    appointments: Collection<Appointment>,
    gallery: Collection<GalleryItem>,
    content: Collection<ContentItem>,
    settings: SettingsCell,
}

impl Store {
    /// Store pre-populated with the demo data.
    pub fn init() -> Self {
        Self::from_seed(Seed::demo())
    }

    /// Empty collections, default settings.
    pub fn empty() -> Self {
        Self::from_seed(Seed::default())
    }

    pub fn from_seed(seed: Seed) -> Self {
        let clock = Arc::new(StampClock::starting_after(seed.max_stamp()));
        let subscribers = Subscribers::new();

        tracing::debug!(
            enquiries = seed.enquiries.len(),
            appointments = seed.appointments.len(),
            gallery = seed.gallery.len(),
            content = seed.content.len(),
            "store initialised"
        );

        Self {
            enquiries: Collection::new("enquiries", seed.enquiries, clock.clone(), subscribers.clone()),
            appointments: Collection::new(
                "appointments",
                seed.appointments,
                clock.clone(),
                subscribers.clone(),
            ),
            gallery: Collection::new("gallery", seed.gallery, clock.clone(), subscribers.clone()),
            content: Collection::new("content", seed.content, clock, subscribers.clone()),
            settings: SettingsCell::new(seed.settings, subscribers.clone()),
            subscribers,
        }
    }

    pub fn enquiries(&self) -> &Collection<Enquiry> {
        &self.enquiries
    }

    pub fn appointments(&self) -> &Collection<Appointment> {
        &self.appointments
    }

    pub fn gallery(&self) -> &Collection<GalleryItem> {
        &self.gallery
    }

    pub fn content(&self) -> &Collection<ContentItem> {
        &self.content
    }

    pub fn settings(&self) -> &SettingsCell {
        &self.settings
    }

    /// Listen for mutations of any collection or the settings.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::init()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use chrono::{NaiveDate, Utc};
    use proptest::prelude::*;

    use artisanhome_core::Stamp;

    use super::*;
    use crate::{
        AppointmentKind, AppointmentPatch, AppointmentStatus, ContentKind, ContentPatch, EnquiryPatch,
        EnquiryStatus, GalleryPatch, NewAppointment, NewContentItem, NewEnquiry, NewGalleryItem,
        SettingsPatch,
    };

    fn draft(name: &str) -> NewEnquiry {
        NewEnquiry {
            name: name.into(),
            phone: "+91 90000 00000".into(),
            email: String::new(),
            city: "Pune".into(),
            requirement: "Curtains".into(),
        }
    }

    fn counting(store: &Store) -> (Arc<AtomicUsize>, Subscription) {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let sub = store.subscribe(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        (hits, sub)
    }

    #[test]
    fn add_puts_newest_first() {
        let store = Store::empty();
        store.enquiries().add(draft("A"));
        store.enquiries().add(draft("B"));

        let names: Vec<String> = store.enquiries().get().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn add_seeds_derived_fields() {
        let store = Store::init();
        let before: Vec<Stamp> = store.enquiries().get().iter().map(|e| e.id).collect();

        let created = store.enquiries().add(draft("Asha"));

        assert_eq!(created.status, EnquiryStatus::New);
        assert_eq!(created.notes, "");
        assert_eq!(created.date, Utc::now().date_naive());
        assert!(!before.contains(&created.id));
        assert_eq!(store.enquiries().get()[0], created);
        assert_eq!(store.enquiries().len(), before.len() + 1);
    }

    #[test]
    fn concurrent_adds_keep_newest_first() {
        let store = Arc::new(Store::empty());
        let workers: Vec<_> = (0..8)
            .map(|w| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.enquiries().add(draft(&format!("w{w}-{i}")));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let ids: Vec<Stamp> = store.enquiries().get().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 400);
        assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn get_returns_a_copy() {
        let store = Store::init();
        let mut copy = store.enquiries().get();
        copy[0].name = "Changed".into();
        copy.clear();

        assert_eq!(store.enquiries().len(), 5);
        assert_eq!(store.enquiries().get()[0].name, "Priya Sharma");
    }

    #[test]
    fn update_changes_only_patched_fields() {
        let store = Store::init();
        let id = Stamp::from_raw(1);
        let original = store.enquiries().find(&id).unwrap();

        store
            .enquiries()
            .update(&id, EnquiryPatch::status(EnquiryStatus::Contacted));

        let updated = store.enquiries().find(&id).unwrap();
        assert_eq!(updated.status, EnquiryStatus::Contacted);
        assert_eq!(
            Enquiry {
                status: original.status,
                ..updated
            },
            original
        );
    }

    #[test]
    fn update_of_missing_id_is_a_silent_noop() {
        let store = Store::init();
        let before = store.enquiries().get();

        store
            .enquiries()
            .update(&Stamp::from_raw(999), EnquiryPatch::status(EnquiryStatus::Contacted));

        assert_eq!(store.enquiries().get(), before);
    }

    #[test]
    fn delete_is_idempotent() {
        let store = Store::init();
        let id = Stamp::from_raw(2);

        store.enquiries().delete(&id);
        assert_eq!(store.enquiries().len(), 4);
        assert!(!store.enquiries().contains(&id));

        store.enquiries().delete(&id);
        assert_eq!(store.enquiries().len(), 4);
    }

    #[test]
    fn every_mutation_notifies_each_subscriber_once() {
        let store = Store::init();
        let (a, _sa) = counting(&store);
        let (b, _sb) = counting(&store);

        let created = store.enquiries().add(draft("A"));
        store.enquiries().update(&created.id, EnquiryPatch::default());
        store.enquiries().update(&Stamp::from_raw(999), EnquiryPatch::default());
        store.enquiries().delete(&created.id);
        store.settings().update(SettingsPatch::default());

        assert_eq!(a.load(Ordering::SeqCst), 5);
        assert_eq!(b.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn reads_do_not_notify() {
        let store = Store::init();
        let (hits, _s) = counting(&store);

        let _ = store.enquiries().get();
        let _ = store.gallery().find(&Stamp::from_raw(1));
        let _ = store.settings().get();

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribed_listener_stops_receiving() {
        let store = Store::init();
        let (hits, sub) = counting(&store);

        store.gallery().delete(&Stamp::from_raw(1));
        assert!(sub.unsubscribe());
        store.gallery().delete(&Stamp::from_raw(2));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn listener_can_read_the_store_during_notification() {
        let store = Arc::new(Store::empty());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let reader = Arc::downgrade(&store);
        let log = seen.clone();
        let _sub = store.enquiries().subscribe(move || {
            if let Some(store) = reader.upgrade() {
                log.lock().unwrap().push(store.enquiries().len());
            }
        });

        store.enquiries().add(draft("A"));
        store.enquiries().add(draft("B"));

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn appointments_default_status_and_patch() {
        let store = Store::empty();
        let created = store.appointments().add(NewAppointment {
            enquiry_id: None,
            customer_name: "Kiran".into(),
            phone: "1".into(),
            address: "12 Lake Rd".into(),
            city: "Kochi".into(),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            time: "11:00 AM".into(),
            kind: AppointmentKind::Measurement,
            status: None,
            notes: String::new(),
        });
        assert_eq!(created.status, AppointmentStatus::Scheduled);

        store.appointments().update(
            &created.id,
            AppointmentPatch {
                status: Some(AppointmentStatus::Completed),
                notes: Some("Done".into()),
                ..Default::default()
            },
        );
        let updated = store.appointments().find(&created.id).unwrap();
        assert_eq!(updated.status, AppointmentStatus::Completed);
        assert_eq!(updated.notes, "Done");
        assert_eq!(updated.customer_name, "Kiran");
    }

    #[test]
    fn gallery_and_content_crud() {
        let store = Store::init();

        let item = store.gallery().add(NewGalleryItem {
            title: "Sunlit Study".into(),
            category: "Blinds".into(),
            room_type: "Office".into(),
            image_url: "/assets/study.jpg".into(),
            description: String::new(),
        });
        store.gallery().update(
            &item.id,
            GalleryPatch {
                description: Some("Zebra blinds".into()),
                ..Default::default()
            },
        );
        assert_eq!(store.gallery().get()[0].description, "Zebra blinds");

        let block = store.content().add(NewContentItem {
            kind: ContentKind::Banner,
            title: "Monsoon Sale".into(),
            content: "20% off".into(),
            image_url: None,
            author: None,
            active: true,
        });
        assert!(block.id.starts_with("banner-"));
        assert_eq!(store.content().get()[0].id, block.id);

        store.content().update(
            &block.id,
            ContentPatch {
                active: Some(false),
                ..Default::default()
            },
        );
        assert!(!store.content().find(&block.id).unwrap().active);

        store.content().delete(&"banner-1".to_string());
        assert!(!store.content().contains(&"banner-1".to_string()));
    }

    #[test]
    fn settings_update_merges() {
        let store = Store::init();
        store.settings().update(SettingsPatch {
            phone2: Some("+91 11111 11111".into()),
            ..Default::default()
        });

        let settings = store.settings().get();
        assert_eq!(settings.phone2, "+91 11111 11111");
        assert_eq!(settings.business_name, "ArtisanHome");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 32,
            ..ProptestConfig::default()
        })]

        #[test]
        fn adds_yield_unique_ids_newest_first(names in proptest::collection::vec("[a-z]{1,8}", 1..40)) {
            let store = Store::init();
            for name in &names {
                store.enquiries().add(draft(name));
            }

            let all = store.enquiries().get();
            let mut ids: Vec<Stamp> = all.iter().map(|e| e.id).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), all.len());

            let newest: Vec<String> = all.iter().take(names.len()).map(|e| e.name.clone()).collect();
            let expected: Vec<String> = names.iter().rev().cloned().collect();
            prop_assert_eq!(newest, expected);
        }
    }
}
