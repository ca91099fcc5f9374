use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::Response};
use chrono::NaiveDate;
use serde::Deserialize;

use artisanhome_core::{DomainError, DomainResult, Stamp};
use crate::app::errors;
use artisanhome_store::{
    AppointmentQuery, AppointmentStatus, ContentKind, ContentQuery, EnquiryQuery, EnquiryStatus,
    GalleryQuery, parse_choice,
};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// -------------------------
// List query parameters
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct EnquiryListParams {
    pub status: Option<String>,
    pub search: Option<String>,
}

impl EnquiryListParams {
    pub fn into_query(self) -> DomainResult<EnquiryQuery> {
        Ok(EnquiryQuery {
            status: parse_choice::<EnquiryStatus>("status", self.status.as_deref())?,
            search: self.search,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppointmentListParams {
    pub status: Option<String>,
    pub search: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

impl AppointmentListParams {
    pub fn into_query(self) -> DomainResult<AppointmentQuery> {
        let date = match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => Some(
                raw.parse::<NaiveDate>()
                    .map_err(|_| DomainError::validation(format!("invalid date '{raw}'")))?,
            ),
            None => None,
        };

        Ok(AppointmentQuery {
            status: parse_choice::<AppointmentStatus>("status", self.status.as_deref())?,
            search: self.search,
            date,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GalleryListParams {
    pub category: Option<String>,
}

impl GalleryListParams {
    pub fn into_query(self) -> GalleryQuery {
        let category = self.category.filter(|c| !c.eq_ignore_ascii_case("all"));
        GalleryQuery { category }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentListParams {
    #[serde(alias = "type")]
    pub kind: Option<String>,
    pub active: Option<bool>,
}

impl ContentListParams {
    pub fn into_query(self) -> DomainResult<ContentQuery> {
        Ok(ContentQuery {
            kind: parse_choice::<ContentKind>("kind", self.kind.as_deref())?,
            active: self.active,
        })
    }
}

/// Unwrap a JSON body, turning extractor rejections into a 400 `invalid_body`.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(value)| value)
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.body_text()))
}

/// Numeric record id from a path segment.
pub fn parse_stamp(raw: &str) -> DomainResult<Stamp> {
    raw.trim()
        .parse::<i64>()
        .map(Stamp::from_raw)
        .map_err(|_| DomainError::invalid_id(format!("'{raw}' is not a record id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_params_parse_date_and_status() {
        let q = AppointmentListParams {
            status: Some("all".into()),
            search: None,
            date: Some("2024-01-20".into()),
        }
        .into_query()
        .unwrap();
        assert_eq!(q.status, None);
        assert_eq!(q.date, NaiveDate::from_ymd_opt(2024, 1, 20));

        let bad = AppointmentListParams {
            date: Some("20/01/2024".into()),
            ..Default::default()
        };
        assert!(matches!(bad.into_query(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn stamp_parsing() {
        assert_eq!(parse_stamp("42"), Ok(Stamp::from_raw(42)));
        assert!(matches!(parse_stamp("abc"), Err(DomainError::InvalidId(_))));
    }
}
