//! Test helpers.

use std::sync::Arc;

use jiff::{Timestamp, civil::date};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use temple_app::{
    auth::{AccountUuid, AdminSession, MockAuthService, SessionUuid},
    context::AppContext,
    domain::bookings::{
        MockBookingsService,
        consultation_type::ConsultationType,
        records::{BookingRecord, BookingUuid},
        status::BookingStatus,
        time_slot::TimeSlot,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_TOKEN: &str =
    "tp_v1_0190d7f45a3b7c2e9d1f2b3c4d5e6f70.00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

pub(crate) fn admin_session() -> AdminSession {
    AdminSession {
        session_uuid: SessionUuid::from_uuid(Uuid::nil()),
        account_uuid: AccountUuid::from_uuid(Uuid::nil()),
        email: "admin@temple.tw".to_string(),
        name: "林師兄".to_string(),
        expires_at: Timestamp::UNIX_EPOCH,
    }
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_admin_session(admin_session());
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn make_booking(uuid: BookingUuid) -> BookingRecord {
    BookingRecord {
        uuid,
        name: "王小明".to_string(),
        phone: "0912345678".to_string(),
        birth_date: "民國75年8月15日".to_string(),
        consultation_type: ConsultationType::Career,
        booking_date: date(2024, 5, 1),
        booking_time: TimeSlot::Morning,
        notes: None,
        status: BookingStatus::Pending,
        admin_notes: None,
        handled_by: None,
        handled_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login().never();
    auth.expect_resolve_gate().never();
    auth.expect_sign_out().never();

    auth
}

fn strict_bookings_mock() -> MockBookingsService {
    let mut bookings = MockBookingsService::new();

    bookings.expect_create_booking().never();
    bookings.expect_list_bookings().never();
    bookings.expect_get_booking().never();
    bookings.expect_update_status().never();
    bookings.expect_booking_stats().never();

    bookings
}

fn state(bookings: MockBookingsService, auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        bookings: Arc::new(bookings),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_bookings(bookings: MockBookingsService) -> Arc<State> {
    state(bookings, strict_auth_mock())
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(strict_bookings_mock(), auth)
}

/// A public route backed by the given bookings mock.
pub(crate) fn bookings_service(bookings: MockBookingsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_bookings(bookings)))
            .push(route),
    )
}

/// An admin route, as seen after the auth middleware let [`admin_session`] in.
pub(crate) fn admin_service(bookings: MockBookingsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_bookings(bookings)))
            .hoop(inject_admin)
            .push(route),
    )
}
