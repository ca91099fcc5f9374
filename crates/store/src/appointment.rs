use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use artisanhome_core::{DomainError, DomainResult, Entity, Stamp};

use crate::record::{Record, merge};

/// Site visit booked with a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Stamp,
    pub enquiry_id: Option<Stamp>,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub date: NaiveDate,
    /// Free-form slot as entered ("10:00 AM", "14:30").
    pub time: String,
    #[serde(rename = "type")]
    pub kind: AppointmentKind,
    pub status: AppointmentStatus,
    pub notes: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentKind {
    Measurement,
    #[default]
    Consultation,
    Installation,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

impl Appointment {
    /// `time` parsed as a clock time, when it is in a recognised format.
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        parse_time(&self.time)
    }

    /// Chronological order: date, then parsed time, then the raw slot text.
    pub fn schedule_cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.time_of_day().cmp(&other.time_of_day()))
            .then_with(|| self.time.cmp(&other.time))
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    ["%I:%M %p", "%I:%M%p", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    #[serde(default)]
    pub enquiry_id: Option<Stamp>,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(rename = "type", default)]
    pub kind: AppointmentKind,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub notes: String,
}

impl NewAppointment {
    pub fn validate(&self) -> DomainResult<()> {
        DomainError::require_fields(&[
            ("customer_name", self.customer_name.as_str()),
            ("phone", self.phone.as_str()),
            ("address", self.address.as_str()),
            ("city", self.city.as_str()),
            ("time", self.time.as_str()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentPatch {
    pub enquiry_id: Option<Stamp>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<AppointmentKind>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

impl Entity for Appointment {
    type Id = Stamp;

    fn id(&self) -> &Stamp {
        &self.id
    }
}

impl Record for Appointment {
    type Draft = NewAppointment;
    type Patch = AppointmentPatch;

    fn create(draft: NewAppointment, stamp: Stamp, _today: NaiveDate) -> Self {
        Self {
            id: stamp,
            enquiry_id: draft.enquiry_id,
            customer_name: draft.customer_name,
            phone: draft.phone,
            address: draft.address,
            city: draft.city,
            date: draft.date,
            time: draft.time,
            kind: draft.kind,
            status: draft.status.unwrap_or_default(),
            notes: draft.notes,
        }
    }

    fn apply(&mut self, patch: AppointmentPatch) {
        if patch.enquiry_id.is_some() {
            self.enquiry_id = patch.enquiry_id;
        }
        merge(&mut self.customer_name, patch.customer_name);
        merge(&mut self.phone, patch.phone);
        merge(&mut self.address, patch.address);
        merge(&mut self.city, patch.city);
        merge(&mut self.date, patch.date);
        merge(&mut self.time, patch.time);
        merge(&mut self.kind, patch.kind);
        merge(&mut self.status, patch.status);
        merge(&mut self.notes, patch.notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: NaiveDate, time: &str) -> Appointment {
        Appointment::create(
            NewAppointment {
                enquiry_id: None,
                customer_name: "C".into(),
                phone: "1".into(),
                address: "A".into(),
                city: "X".into(),
                date,
                time: time.into(),
                kind: AppointmentKind::Measurement,
                status: None,
                notes: String::new(),
            },
            Stamp::from_raw(1),
            date,
        )
    }

    #[test]
    fn parses_twelve_and_twenty_four_hour_slots() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        assert_eq!(at(d, "2:00 PM").time_of_day(), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(at(d, "09:30").time_of_day(), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(at(d, "after lunch").time_of_day(), None);
    }

    #[test]
    fn schedule_order_uses_clock_time_not_text() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let morning = at(d, "10:00 AM");
        let afternoon = at(d, "2:00 PM");
        assert_eq!(morning.schedule_cmp(&afternoon), Ordering::Less);

        let next_day = at(d.succ_opt().unwrap(), "8:00 AM");
        assert_eq!(afternoon.schedule_cmp(&next_day), Ordering::Less);
    }

    #[test]
    fn create_defaults_status_to_scheduled() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        assert_eq!(at(d, "10:00 AM").status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn wire_format_uses_type_key() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let json = serde_json::to_value(at(d, "10:00 AM")).unwrap();
        assert_eq!(json["type"], "measurement");
        assert_eq!(json["date"], "2024-01-20");
    }
}
