use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    pub id: i64,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub event_date: String,
    pub service_name: String,
    pub message: String,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

/// A booking before the store has assigned it an id.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub event_date: String,
    pub service_name: String,
    pub message: String,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    #[default]
    New,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::New,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::New => "New",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    /// Label shown to the studio operator.
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::New => "Baru",
            BookingStatus::Confirmed => "Dikonfirmasi",
            BookingStatus::Completed => "Selesai",
            BookingStatus::Cancelled => "Dibatalkan",
        }
    }

    /// Accepts the stored names (any case) and the operator labels.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|status| {
            status.as_str().eq_ignore_ascii_case(s) || status.label().eq_ignore_ascii_case(s)
        })
    }
}
