//! Bookings Data

use jiff::{Timestamp, civil::Date};

use crate::domain::bookings::{
    consultation_type::ConsultationType,
    errors::BookingValidationError,
    records::BookingUuid,
    status::BookingStatus,
    time_slot::TimeSlot,
};

/// Raw intake form contents, before required-field validation.
///
/// There is deliberately no status here: every accepted submission becomes a
/// `pending` booking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingSubmission {
    pub name: String,
    pub phone: String,
    pub birth_date: String,
    pub consultation_type: Option<ConsultationType>,
    pub booking_date: String,
    pub booking_time: Option<TimeSlot>,
    pub notes: Option<String>,
}

/// New Booking Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub uuid: BookingUuid,
    pub name: String,
    pub phone: String,
    pub birth_date: String,
    pub consultation_type: ConsultationType,
    pub booking_date: Date,
    pub booking_time: TimeSlot,
    pub notes: Option<String>,
}

impl TryFrom<BookingSubmission> for NewBooking {
    type Error = BookingValidationError;

    fn try_from(submission: BookingSubmission) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();

        let name = required(&submission.name, "name", &mut missing);
        let phone = required(&submission.phone, "phone", &mut missing);
        let birth_date = required(&submission.birth_date, "birth_date", &mut missing);

        if submission.consultation_type.is_none() {
            missing.push("consultation_type");
        }

        let booking_date = required(&submission.booking_date, "booking_date", &mut missing);

        if submission.booking_time.is_none() {
            missing.push("booking_time");
        }

        let (Some(consultation_type), Some(booking_time)) =
            (submission.consultation_type, submission.booking_time)
        else {
            return Err(BookingValidationError::MissingFields(missing));
        };

        if !missing.is_empty() {
            return Err(BookingValidationError::MissingFields(missing));
        }

        let booking_date = booking_date
            .parse::<Date>()
            .map_err(|_parse| BookingValidationError::InvalidBookingDate(booking_date.clone()))?;

        Ok(Self {
            uuid: BookingUuid::new(),
            name,
            phone,
            birth_date,
            consultation_type,
            booking_date,
            booking_time,
            notes: optional(submission.notes),
        })
    }
}

/// Booking Status Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,

    /// Replaces the stored note; `None` clears it.
    pub admin_notes: Option<String>,

    /// Email of the acting administrator.
    pub handled_by: String,

    /// When set, the update only applies if the booking has not changed since.
    pub expected_updated_at: Option<Timestamp>,
}

impl BookingStatusUpdate {
    #[must_use]
    pub fn new(status: BookingStatus, admin_notes: Option<String>, handled_by: String) -> Self {
        Self {
            status,
            admin_notes: optional(admin_notes),
            handled_by,
            expected_updated_at: None,
        }
    }

    #[must_use]
    pub fn expecting(mut self, updated_at: Option<Timestamp>) -> Self {
        self.expected_updated_at = updated_at;
        self
    }
}

fn required(value: &str, field: &'static str, missing: &mut Vec<&'static str>) -> String {
    let value = value.trim();

    if value.is_empty() {
        missing.push(field);
    }

    value.to_string()
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn submission() -> BookingSubmission {
        BookingSubmission {
            name: "王小明".to_string(),
            phone: "0912345678".to_string(),
            birth_date: "民國75年8月15日".to_string(),
            consultation_type: Some(ConsultationType::Career),
            booking_date: "2024-05-01".to_string(),
            booking_time: Some(TimeSlot::Morning),
            notes: None,
        }
    }

    #[test]
    fn complete_submission_becomes_new_booking() -> Result<(), BookingValidationError> {
        let booking = NewBooking::try_from(submission())?;

        assert_eq!(booking.name, "王小明");
        assert_eq!(booking.phone, "0912345678");
        assert_eq!(booking.birth_date, "民國75年8月15日");
        assert_eq!(booking.consultation_type, ConsultationType::Career);
        assert_eq!(booking.booking_date, date(2024, 5, 1));
        assert_eq!(booking.booking_time, TimeSlot::Morning);
        assert_eq!(booking.notes, None);

        Ok(())
    }

    #[test]
    fn blank_fields_are_reported_as_missing() {
        let result = NewBooking::try_from(BookingSubmission {
            name: "   ".to_string(),
            booking_time: None,
            ..submission()
        });

        assert_eq!(
            result.err(),
            Some(BookingValidationError::MissingFields(vec![
                "name",
                "booking_time"
            ]))
        );
    }

    #[test]
    fn empty_submission_lists_every_required_field() {
        let result = NewBooking::try_from(BookingSubmission::default());

        assert_eq!(
            result.err(),
            Some(BookingValidationError::MissingFields(vec![
                "name",
                "phone",
                "birth_date",
                "consultation_type",
                "booking_date",
                "booking_time",
            ]))
        );
    }

    #[test]
    fn malformed_booking_date_is_rejected() {
        let result = NewBooking::try_from(BookingSubmission {
            booking_date: "next tuesday".to_string(),
            ..submission()
        });

        assert_eq!(
            result.err(),
            Some(BookingValidationError::InvalidBookingDate(
                "next tuesday".to_string()
            ))
        );
    }

    #[test]
    fn fields_are_trimmed_and_blank_notes_dropped() -> Result<(), BookingValidationError> {
        let booking = NewBooking::try_from(BookingSubmission {
            name: "  王小明 ".to_string(),
            notes: Some("  ".to_string()),
            ..submission()
        })?;

        assert_eq!(booking.name, "王小明");
        assert_eq!(booking.notes, None);

        Ok(())
    }

    #[test]
    fn blank_admin_note_clears_the_note() {
        let update = BookingStatusUpdate::new(
            BookingStatus::Confirmed,
            Some(String::new()),
            "admin@example.com".to_string(),
        );

        assert_eq!(update.admin_notes, None);
        assert_eq!(update.expected_updated_at, None);
    }
}
