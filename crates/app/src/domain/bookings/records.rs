//! Booking Records

use jiff::{Timestamp, civil::Date};

use crate::{
    domain::bookings::{
        consultation_type::ConsultationType, status::BookingStatus, time_slot::TimeSlot,
    },
    uuids::TypedUuid,
};

/// Booking UUID
pub type BookingUuid = TypedUuid<BookingRecord>;

/// Booking Record
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    pub uuid: BookingUuid,

    /// Requester name.
    pub name: String,

    pub phone: String,

    /// Birth date exactly as written by the requester; the calendar system is
    /// not normalised.
    pub birth_date: String,

    pub consultation_type: ConsultationType,
    pub booking_date: Date,
    pub booking_time: TimeSlot,
    pub notes: Option<String>,
    pub status: BookingStatus,

    /// Internal note, never shown to the requester.
    pub admin_notes: Option<String>,

    /// Email of the administrator behind the last status update.
    pub handled_by: Option<String>,

    pub handled_at: Option<Timestamp>,
    pub created_at: Timestamp,

    /// Also used as the optimistic concurrency version for status updates.
    pub updated_at: Timestamp,
}
