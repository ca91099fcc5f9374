//! Demo data loaded by [`Store::init`](crate::Store::init).

use chrono::NaiveDate;

use artisanhome_core::Stamp;

use crate::{
    Appointment, AppointmentKind, AppointmentStatus, ContentItem, ContentKind, Enquiry, EnquiryStatus,
    GalleryItem, SiteSettings,
};

/// Initial contents of every collection, in display order.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub enquiries: Vec<Enquiry>,
    pub appointments: Vec<Appointment>,
    pub gallery: Vec<GalleryItem>,
    pub content: Vec<ContentItem>,
    pub settings: SiteSettings,
}

impl Seed {
    pub fn demo() -> Self {
        Self {
            enquiries: demo_enquiries(),
            appointments: demo_appointments(),
            gallery: demo_gallery(),
            content: demo_content(),
            settings: SiteSettings::default(),
        }
    }

    /// Largest numeric identifier present, so freshly minted stamps stay above it.
    pub fn max_stamp(&self) -> i64 {
        let enquiries = self.enquiries.iter().map(|e| e.id);
        let appointments = self.appointments.iter().map(|a| a.id);
        let gallery = self.gallery.iter().map(|g| g.id);
        enquiries
            .chain(appointments)
            .chain(gallery)
            .map(Stamp::get)
            .max()
            .unwrap_or(0)
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn enquiry(
    id: i64,
    name: &str,
    phone: &str,
    city: &str,
    requirement: &str,
    status: EnquiryStatus,
    date: NaiveDate,
    notes: &str,
) -> Enquiry {
    let email = format!("{}@email.com", name.split(' ').next().unwrap_or(name).to_lowercase());
    Enquiry {
        id: Stamp::from_raw(id),
        name: name.into(),
        phone: phone.into(),
        email,
        city: city.into(),
        requirement: requirement.into(),
        status,
        date,
        notes: notes.into(),
    }
}

fn demo_enquiries() -> Vec<Enquiry> {
    vec![
        enquiry(
            1,
            "Priya Sharma",
            "+91 98765 43210",
            "Mumbai",
            "Looking for custom curtains for my 3BHK living room. Prefer neutral colors.",
            EnquiryStatus::New,
            day(2024, 1, 15),
            "",
        ),
        enquiry(
            2,
            "Rajesh Gupta",
            "+91 87654 32109",
            "Delhi",
            "Interested in modular sofa set. Budget around 1 lakh.",
            EnquiryStatus::Contacted,
            day(2024, 1, 14),
            "Called on 14th Jan, interested in Milano collection",
        ),
        enquiry(
            3,
            "Ananya Krishnan",
            "+91 76543 21098",
            "Chennai",
            "Complete bedroom interior including bed, wardrobe, and curtains.",
            EnquiryStatus::New,
            day(2024, 1, 14),
            "",
        ),
        enquiry(
            4,
            "Vikram Patel",
            "+91 65432 10987",
            "Bangalore",
            "Roman blinds for home office. Need light control.",
            EnquiryStatus::Converted,
            day(2024, 1, 13),
            "Order placed for 3 windows",
        ),
        enquiry(
            5,
            "Meera Reddy",
            "+91 54321 09876",
            "Hyderabad",
            "Wall panels for TV unit background. Modern design preferred.",
            EnquiryStatus::Contacted,
            day(2024, 1, 12),
            "Site visit scheduled for next week",
        ),
    ]
}

fn demo_appointments() -> Vec<Appointment> {
    let visit = |id: i64,
                 customer_name: &str,
                 phone: &str,
                 address: &str,
                 city: &str,
                 date: NaiveDate,
                 time: &str,
                 kind: AppointmentKind,
                 notes: &str| Appointment {
        id: Stamp::from_raw(id),
        enquiry_id: None,
        customer_name: customer_name.into(),
        phone: phone.into(),
        address: address.into(),
        city: city.into(),
        date,
        time: time.into(),
        kind,
        status: AppointmentStatus::Scheduled,
        notes: notes.into(),
    };

    vec![
        visit(
            1,
            "Priya Sharma",
            "+91 98765 43210",
            "Flat 12A, Oberoi Heights, Goregaon",
            "Mumbai",
            day(2024, 1, 20),
            "10:00 AM",
            AppointmentKind::Measurement,
            "Living room curtains measurement",
        ),
        visit(
            2,
            "Ananya Krishnan",
            "+91 76543 21098",
            "Villa 8, Palm Meadows",
            "Chennai",
            day(2024, 1, 18),
            "2:00 PM",
            AppointmentKind::Consultation,
            "Complete bedroom interior consultation",
        ),
        visit(
            3,
            "Vikram Patel",
            "+91 65432 10987",
            "23, Indiranagar",
            "Bangalore",
            day(2024, 1, 22),
            "11:00 AM",
            AppointmentKind::Installation,
            "Roman blinds installation - 3 windows",
        ),
    ]
}

fn demo_gallery() -> Vec<GalleryItem> {
    [
        (1, "Modern Living Room", "Curtains", "Living Room", "hero-living-room.jpg", "Elegant sheer curtains with blackout lining"),
        (2, "Luxe Bedroom Suite", "Bedroom", "Bedroom", "bedroom-interior.jpg", "Complete bedroom makeover with custom furniture"),
        (3, "Kids Paradise", "Wallpapers", "Kids Room", "kids-room.jpg", "Playful wallpaper design for children's room"),
        (4, "Executive Home Office", "Blinds", "Office", "home-office.jpg", "Motorized blinds for light control"),
    ]
    .into_iter()
    .map(|(id, title, category, room_type, image, description)| GalleryItem {
        id: Stamp::from_raw(id),
        title: title.into(),
        category: category.into(),
        room_type: room_type.into(),
        image_url: format!("/assets/{image}"),
        description: description.into(),
    })
    .collect()
}

fn demo_content() -> Vec<ContentItem> {
    let block = |id: &str, kind: ContentKind, title: &str, content: &str, image: Option<&str>, author: Option<&str>| {
        ContentItem {
            id: id.into(),
            kind,
            title: title.into(),
            content: content.into(),
            image_url: image.map(|i| format!("/assets/{i}")),
            author: author.map(Into::into),
            active: true,
        }
    };

    vec![
        block(
            "banner-1",
            ContentKind::Banner,
            "Custom Furniture & Interior Solutions",
            "Transform your home with bespoke furniture and elegant interiors crafted just for you.",
            Some("hero-living-room.jpg"),
            None,
        ),
        block(
            "banner-2",
            ContentKind::Banner,
            "Premium Window Treatments",
            "Discover our exclusive collection of curtains, blinds, and shades.",
            Some("curtains-closeup.jpg"),
            None,
        ),
        block(
            "testimonial-1",
            ContentKind::Testimonial,
            "Exceptional craftsmanship",
            "The attention to detail in our custom curtains is remarkable. The team understood \
             exactly what we wanted and delivered beyond our expectations.",
            None,
            Some("Priya Mehta, Mumbai"),
        ),
        block(
            "testimonial-2",
            ContentKind::Testimonial,
            "Transformed our home",
            "From consultation to installation, the entire experience was seamless. Our living \
             room looks like it's straight out of a magazine.",
            None,
            Some("Rahul Sharma, Delhi"),
        ),
        block(
            "about-1",
            ContentKind::About,
            "Our Story",
            "Founded in 2010, ArtisanHome has been crafting bespoke furniture and interior \
             solutions for discerning homeowners across India.",
            None,
            None,
        ),
    ]
}
