//! Test context for service-level integration tests.

use crate::{
    database::Db,
    domain::{admins::PgAdminsService, bookings::PgBookingsService},
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub bookings: PgBookingsService,
    pub admins: PgAdminsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = TestDb::new().await;
        let pool = db.pool().clone();

        Self {
            bookings: PgBookingsService::new(Db::new(pool.clone())),
            admins: PgAdminsService::new(pool),
            db,
        }
    }
}
