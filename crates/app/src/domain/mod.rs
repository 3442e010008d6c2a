//! Temple Back-office Domain Concerns

pub mod admins;
pub mod bookings;
