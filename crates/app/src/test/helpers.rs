//! Test Helpers

use crate::{
    domain::bookings::{
        BookingsService, BookingsServiceError,
        consultation_type::ConsultationType,
        data::NewBooking,
        records::{BookingRecord, BookingUuid},
        time_slot::TimeSlot,
    },
    test::TestContext,
};

/// Store a minimal valid booking for `name`.
pub(crate) async fn submit_booking(
    ctx: &TestContext,
    name: &str,
    phone: &str,
) -> Result<BookingRecord, BookingsServiceError> {
    ctx.bookings
        .create_booking(NewBooking {
            uuid: BookingUuid::new(),
            name: name.to_string(),
            phone: phone.to_string(),
            birth_date: "民國75年8月15日".to_string(),
            consultation_type: ConsultationType::Career,
            booking_date: jiff::civil::date(2024, 5, 1),
            booking_time: TimeSlot::Morning,
            notes: None,
        })
        .await
}
