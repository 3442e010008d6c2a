//! Admins Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::admins::{
    data::NewAdmin,
    records::{AdminRecord, AdminUuid},
};

const CREATE_ADMIN_SQL: &str = include_str!("sql/create_admin.sql");
const FIND_ADMIN_BY_EMAIL_SQL: &str = include_str!("sql/find_admin_by_email.sql");
const LIST_ADMINS_SQL: &str = include_str!("sql/list_admins.sql");
const DELETE_ADMIN_SQL: &str = include_str!("sql/delete_admin.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAdminsRepository {
    pool: PgPool,
}

impl PgAdminsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_admin(&self, admin: NewAdmin) -> Result<AdminRecord, sqlx::Error> {
        query_as::<Postgres, AdminRecord>(CREATE_ADMIN_SQL)
            .bind(admin.uuid.into_uuid())
            .bind(admin.email)
            .bind(admin.name)
            .fetch_one(&self.pool)
            .await
    }

    /// Allow-list lookup; `email` must already be normalised.
    pub(crate) async fn find_admin_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminRecord>, sqlx::Error> {
        query_as::<Postgres, AdminRecord>(FIND_ADMIN_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn list_admins(&self) -> Result<Vec<AdminRecord>, sqlx::Error> {
        query_as::<Postgres, AdminRecord>(LIST_ADMINS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn delete_admin(&self, email: &str) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ADMIN_SQL)
            .bind(email)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for AdminRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AdminUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
