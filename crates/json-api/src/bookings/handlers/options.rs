//! Booking Options Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use temple_app::domain::bookings::{
    consultation_type::ConsultationType, status::BookingStatus, time_slot::TimeSlot,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChoiceResponse {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TimeSlotResponse {
    pub value: String,
    pub label: String,

    /// Opening hours covered by the slot
    pub hours: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusResponse {
    pub value: String,
    pub label: String,

    /// Statuses reachable from this one
    pub next: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingOptionsResponse {
    pub consultation_types: Vec<ChoiceResponse>,
    pub time_slots: Vec<TimeSlotResponse>,
    pub statuses: Vec<StatusResponse>,
}

/// Booking Options Handler
///
/// Lists the values the intake form and the back-office accept, with their
/// display labels.
#[endpoint(tags("bookings"), summary = "Booking Options")]
pub(crate) async fn handler() -> Json<BookingOptionsResponse> {
    Json(BookingOptionsResponse {
        consultation_types: ConsultationType::ALL
            .into_iter()
            .map(|kind| ChoiceResponse {
                value: kind.as_str().to_string(),
                label: kind.label().to_string(),
            })
            .collect(),
        time_slots: TimeSlot::ALL
            .into_iter()
            .map(|slot| TimeSlotResponse {
                value: slot.as_str().to_string(),
                label: slot.label().to_string(),
                hours: slot.hours().to_string(),
            })
            .collect(),
        statuses: BookingStatus::ALL
            .into_iter()
            .map(|status| StatusResponse {
                value: status.as_str().to_string(),
                label: status.label().to_string(),
                next: status
                    .next_statuses()
                    .iter()
                    .map(|next| next.as_str().to_string())
                    .collect(),
            })
            .collect(),
    })
}
