//! Bookings Service

use async_trait::async_trait;
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::bookings::{
        data::{BookingStatusUpdate, NewBooking},
        errors::BookingsServiceError,
        query::BookingFilter,
        records::{BookingRecord, BookingUuid},
        repository::PgBookingsRepository,
        stats::BookingStats,
    },
};

#[derive(Debug, Clone)]
pub struct PgBookingsService {
    db: Db,
    repository: PgBookingsRepository,
}

impl PgBookingsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBookingsRepository::new(),
        }
    }
}

#[async_trait]
impl BookingsService for PgBookingsService {
    #[tracing::instrument(
        name = "bookings.service.create_booking",
        skip(self, booking),
        fields(
            booking_uuid = %booking.uuid,
            consultation_type = %booking.consultation_type
        ),
        err
    )]
    async fn create_booking(
        &self,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_booking(&mut tx, booking).await?;

        tx.commit().await?;

        info!(booking_uuid = %created.uuid, "created booking");

        Ok(created)
    }

    #[tracing::instrument(name = "bookings.service.list_bookings", skip(self), err)]
    async fn list_bookings(
        &self,
        filter: BookingFilter,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self.repository.list_bookings(&mut tx).await?;

        tx.commit().await?;

        Ok(filter.apply(bookings))
    }

    #[tracing::instrument(
        name = "bookings.service.get_booking",
        skip(self),
        fields(booking_uuid = %booking),
        err
    )]
    async fn get_booking(&self, booking: BookingUuid) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_booking(&mut tx, booking).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "bookings.service.update_status",
        skip(self, update),
        fields(
            booking_uuid = %booking,
            status = %update.status,
            handled_by = %update.handled_by
        ),
        err
    )]
    async fn update_status(
        &self,
        booking: BookingUuid,
        update: BookingStatusUpdate,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_booking(&mut tx, booking).await?;

        current.status.transition_to(update.status)?;

        if let Some(expected) = update.expected_updated_at
            && expected != current.updated_at
        {
            warn!(
                booking_uuid = %booking,
                expected = %expected,
                actual = %current.updated_at,
                "rejected stale booking update"
            );

            return Err(BookingsServiceError::StaleVersion);
        }

        let from = current.status;

        let updated = self
            .repository
            .update_booking_status(&mut tx, booking, update)
            .await?;

        tx.commit().await?;

        info!(
            booking_uuid = %updated.uuid,
            from = %from,
            to = %updated.status,
            "updated booking status"
        );

        Ok(updated)
    }

    #[tracing::instrument(name = "bookings.service.booking_stats", skip(self), err)]
    async fn booking_stats(&self, at: Timestamp) -> Result<BookingStats, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self.repository.list_bookings(&mut tx).await?;

        tx.commit().await?;

        let today = at.to_zoned(TimeZone::UTC).date();

        Ok(BookingStats::from_bookings(&bookings, today))
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Store a validated intake submission as a new `pending` booking.
    async fn create_booking(
        &self,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// All bookings matching `filter`, newest first.
    async fn list_bookings(
        &self,
        filter: BookingFilter,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError>;

    /// Retrieve a single booking.
    async fn get_booking(&self, booking: BookingUuid) -> Result<BookingRecord, BookingsServiceError>;

    /// Move a booking to a new status, recording the acting administrator.
    ///
    /// Rejects moves the workflow forbids, and updates whose
    /// `expected_updated_at` no longer matches the stored booking.
    async fn update_status(
        &self,
        booking: BookingUuid,
        update: BookingStatusUpdate,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// Dashboard aggregates, with the daily trend ending on the UTC day of `at`.
    async fn booking_stats(&self, at: Timestamp) -> Result<BookingStats, BookingsServiceError>;
}
