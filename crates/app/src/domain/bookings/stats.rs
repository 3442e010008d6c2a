//! Booking dashboard aggregates.

use jiff::{ToSpan, civil::Date, tz::TimeZone};

use crate::domain::bookings::{
    consultation_type::ConsultationType, records::BookingRecord, status::BookingStatus,
};

/// Number of calendar days covered by the creation trend, today included.
pub const TREND_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    fn record(&mut self, status: BookingStatus) {
        let slot = match status {
            BookingStatus::Pending => &mut self.pending,
            BookingStatus::Confirmed => &mut self.confirmed,
            BookingStatus::Completed => &mut self.completed,
            BookingStatus::Cancelled => &mut self.cancelled,
        };

        *slot += 1;
    }

    #[must_use]
    pub fn sum(&self) -> usize {
        self.pending + self.confirmed + self.completed + self.cancelled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCount {
    pub consultation_type: ConsultationType,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: Date,
    pub count: usize,
}

/// Dashboard summary over the full booking set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingStats {
    pub total: usize,
    pub by_status: StatusCounts,

    /// One entry per consultation type, in declaration order.
    pub by_type: Vec<TypeCount>,

    /// Creations per UTC day for the trailing week ending `today`, oldest
    /// first. Days without bookings are kept with a zero count.
    pub daily: Vec<DailyCount>,
}

impl BookingStats {
    #[must_use]
    pub fn from_bookings(bookings: &[BookingRecord], today: Date) -> Self {
        let mut by_status = StatusCounts::default();

        let mut by_type: Vec<TypeCount> = ConsultationType::ALL
            .into_iter()
            .map(|consultation_type| TypeCount {
                consultation_type,
                count: 0,
            })
            .collect();

        let mut daily: Vec<DailyCount> = (0..TREND_DAYS)
            .rev()
            .map(|offset| DailyCount {
                date: today.saturating_sub(offset.days()),
                count: 0,
            })
            .collect();

        for booking in bookings {
            by_status.record(booking.status);

            if let Some(entry) = by_type
                .iter_mut()
                .find(|entry| entry.consultation_type == booking.consultation_type)
            {
                entry.count += 1;
            }

            let created_on = booking.created_at.to_zoned(TimeZone::UTC).date();

            if let Some(entry) = daily.iter_mut().find(|entry| entry.date == created_on) {
                entry.count += 1;
            }
        }

        Self {
            total: bookings.len(),
            by_status,
            by_type,
            daily,
        }
    }
}
