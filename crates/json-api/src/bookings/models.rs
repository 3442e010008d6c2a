//! Booking response bodies.

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use temple_app::domain::bookings::records::BookingRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingResponse {
    pub uuid: Uuid,
    pub name: String,
    pub phone: String,

    /// Birth date as the requester wrote it
    pub birth_date: String,

    /// Consultation type value, e.g. `career`
    pub consultation_type: String,
    pub consultation_type_label: String,

    /// Requested calendar date, `YYYY-MM-DD`
    pub booking_date: String,

    /// Time slot value, e.g. `morning`
    pub booking_time: String,
    pub booking_time_label: String,

    pub notes: Option<String>,

    /// Status value, e.g. `pending`
    pub status: String,
    pub status_label: String,

    /// Statuses this booking may move to next
    pub next_statuses: Vec<String>,

    pub admin_notes: Option<String>,

    /// Email of the administrator who last changed the status
    pub handled_by: Option<String>,
    pub handled_at: Option<String>,

    pub created_at: String,

    /// Send back as `expected_updated_at` to guard a status update
    pub updated_at: String,
}

impl From<BookingRecord> for BookingResponse {
    fn from(booking: BookingRecord) -> Self {
        BookingResponse {
            uuid: booking.uuid.into(),
            name: booking.name,
            phone: booking.phone,
            birth_date: booking.birth_date,
            consultation_type: booking.consultation_type.as_str().to_string(),
            consultation_type_label: booking.consultation_type.label().to_string(),
            booking_date: booking.booking_date.to_string(),
            booking_time: booking.booking_time.as_str().to_string(),
            booking_time_label: booking.booking_time.label().to_string(),
            notes: booking.notes,
            status: booking.status.as_str().to_string(),
            status_label: booking.status.label().to_string(),
            next_statuses: booking
                .status
                .next_statuses()
                .iter()
                .map(|status| status.as_str().to_string())
                .collect(),
            admin_notes: booking.admin_notes,
            handled_by: booking.handled_by,
            handled_at: booking.handled_at.as_ref().map(ToString::to_string),
            created_at: booking.created_at.to_string(),
            updated_at: booking.updated_at.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use temple_app::domain::bookings::{records::BookingUuid, status::BookingStatus};

    use crate::test_helpers::make_booking;

    use super::*;

    #[test]
    fn response_carries_values_and_labels() {
        let booking = make_booking(BookingUuid::new());

        let response = BookingResponse::from(booking);

        assert_eq!(response.consultation_type, "career");
        assert_eq!(response.consultation_type_label, "事業前途");
        assert_eq!(response.booking_date, "2024-05-01");
        assert_eq!(response.booking_time_label, "上午");
        assert_eq!(response.status_label, "待確認");
        assert_eq!(response.next_statuses, ["confirmed", "cancelled"]);
        assert_eq!(response.handled_at, None);
    }

    #[test]
    fn terminal_booking_has_no_next_statuses() {
        let mut booking = make_booking(BookingUuid::new());

        booking.status = BookingStatus::Cancelled;

        assert!(BookingResponse::from(booking).next_statuses.is_empty());
    }
}
