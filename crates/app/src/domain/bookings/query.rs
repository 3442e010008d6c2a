//! Booking list filtering.

use std::str::FromStr;

use crate::domain::bookings::{
    errors::UnknownValueError, records::BookingRecord, status::BookingStatus,
};

/// Status restriction applied to the admin booking list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(BookingStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: BookingStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            return Ok(Self::All);
        }

        value
            .parse::<BookingStatus>()
            .map(Self::Only)
            .map_err(|_unknown| UnknownValueError::new("status filter", value))
    }
}

/// Filter over the full booking list.
///
/// Search is a case-sensitive substring match against the requester name or
/// phone number. An empty search term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub status: StatusFilter,
    pub search: Option<String>,
}

impl BookingFilter {
    #[must_use]
    pub fn new(status: StatusFilter, search: Option<String>) -> Self {
        Self {
            status,
            search: search.filter(|term| !term.is_empty()),
        }
    }

    #[must_use]
    pub fn matches(&self, booking: &BookingRecord) -> bool {
        if !self.status.matches(booking.status) {
            return false;
        }

        self.search.as_deref().is_none_or(|term| {
            booking.name.contains(term) || booking.phone.contains(term)
        })
    }

    /// Keep the matching bookings, preserving their order.
    #[must_use]
    pub fn apply(&self, bookings: Vec<BookingRecord>) -> Vec<BookingRecord> {
        bookings
            .into_iter()
            .filter(|booking| self.matches(booking))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::{Timestamp, civil::date};

    use crate::domain::bookings::{
        consultation_type::ConsultationType, records::BookingUuid, time_slot::TimeSlot,
    };

    use super::*;

    pub(crate) fn booking(name: &str, phone: &str, status: BookingStatus) -> BookingRecord {
        BookingRecord {
            uuid: BookingUuid::new(),
            name: name.to_string(),
            phone: phone.to_string(),
            birth_date: "1986-08-15".to_string(),
            consultation_type: ConsultationType::Career,
            booking_date: date(2024, 5, 1),
            booking_time: TimeSlot::Morning,
            notes: None,
            status,
            admin_notes: None,
            handled_by: None,
            handled_at: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn sample() -> Vec<BookingRecord> {
        vec![
            booking("王小明", "0912345678", BookingStatus::Pending),
            booking("陳美麗", "0922333444", BookingStatus::Confirmed),
            booking("Alice", "0933000111", BookingStatus::Pending),
            booking("王大同", "0944555666", BookingStatus::Cancelled),
        ]
    }

    #[test]
    fn parses_all_and_each_status() {
        assert_eq!("all".parse::<StatusFilter>().ok(), Some(StatusFilter::All));
        assert_eq!(
            "confirmed".parse::<StatusFilter>().ok(),
            Some(StatusFilter::Only(BookingStatus::Confirmed))
        );
        assert!("everything".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn default_filter_keeps_everything() {
        let bookings = sample();

        assert_eq!(BookingFilter::default().apply(bookings.clone()), bookings);
    }

    #[test]
    fn status_filter_keeps_only_that_status() {
        let filtered = BookingFilter::new(StatusFilter::Only(BookingStatus::Pending), None)
            .apply(sample());

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|b| b.status == BookingStatus::Pending));
    }

    #[test]
    fn search_matches_name_or_phone_substring() {
        let by_name = BookingFilter::new(StatusFilter::All, Some("王".to_string())).apply(sample());
        let by_phone =
            BookingFilter::new(StatusFilter::All, Some("2233".to_string())).apply(sample());

        assert_eq!(by_name.len(), 2);
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone.first().map(|b| b.name.as_str()), Some("陳美麗"));
    }

    #[test]
    fn search_is_case_sensitive() {
        let filtered =
            BookingFilter::new(StatusFilter::All, Some("alice".to_string())).apply(sample());

        assert!(filtered.is_empty());
    }

    #[test]
    fn empty_search_is_no_filter() {
        let filter = BookingFilter::new(StatusFilter::All, Some(String::new()));

        assert_eq!(filter.search, None);
        assert_eq!(filter.apply(sample()).len(), 4);
    }

    #[test]
    fn filtered_set_is_subset_of_full_set() {
        let full = sample();

        for status in BookingStatus::ALL {
            let filtered = BookingFilter::new(StatusFilter::Only(status), Some("09".to_string()))
                .apply(full.clone());

            assert!(filtered.iter().all(|b| full.contains(b)));
        }
    }

    #[test]
    fn all_status_equals_search_only_filter() {
        let search = Some("王".to_string());
        let all = BookingFilter::new(StatusFilter::All, search.clone()).apply(sample());
        let expected: Vec<_> = sample()
            .into_iter()
            .filter(|b| b.name.contains("王") || b.phone.contains("王"))
            .collect();

        assert_eq!(all.len(), expected.len());
    }
}
