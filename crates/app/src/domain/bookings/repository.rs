//! Bookings Repository

use std::str::FromStr;

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::bookings::{
    data::{BookingStatusUpdate, NewBooking},
    errors::UnknownValueError,
    records::{BookingRecord, BookingUuid},
};

const CREATE_BOOKING_SQL: &str = include_str!("sql/create_booking.sql");
const LIST_BOOKINGS_SQL: &str = include_str!("sql/list_bookings.sql");
const GET_BOOKING_SQL: &str = include_str!("sql/get_booking.sql");
const LOCK_BOOKING_SQL: &str = include_str!("sql/lock_booking.sql");
const UPDATE_BOOKING_STATUS_SQL: &str = include_str!("sql/update_booking_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBookingsRepository;

impl PgBookingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: NewBooking,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(CREATE_BOOKING_SQL)
            .bind(booking.uuid.into_uuid())
            .bind(booking.name)
            .bind(booking.phone)
            .bind(booking.birth_date)
            .bind(booking.consultation_type.as_str())
            .bind(SqlxDate::from(booking.booking_date))
            .bind(booking.booking_time.as_str())
            .bind(booking.notes)
            .fetch_one(&mut **tx)
            .await
    }

    /// All bookings, newest first.
    pub(crate) async fn list_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(LIST_BOOKINGS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(GET_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Load a booking and hold its row lock until the transaction ends.
    pub(crate) async fn lock_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(LOCK_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_booking_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        update: BookingStatusUpdate,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(UPDATE_BOOKING_STATUS_SQL)
            .bind(booking.into_uuid())
            .bind(update.status.as_str())
            .bind(update.admin_notes)
            .bind(update.handled_by)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for BookingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BookingUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            birth_date: row.try_get("birth_date")?,
            consultation_type: decode_column(row, "consultation_type")?,
            booking_date: row.try_get::<SqlxDate, _>("booking_date")?.to_jiff(),
            booking_time: decode_column(row, "booking_time")?,
            notes: row.try_get("notes")?,
            status: decode_column(row, "status")?,
            admin_notes: row.try_get("admin_notes")?,
            handled_by: row.try_get("handled_by")?,
            handled_at: row
                .try_get::<Option<SqlxTimestamp>, _>("handled_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

/// Decode a text column holding one of the closed booking enumerations.
fn decode_column<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr<Err = UnknownValueError>,
{
    let value: String = row.try_get(column)?;

    value.parse().map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}
