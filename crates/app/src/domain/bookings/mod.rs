//! Bookings

pub mod consultation_type;
pub mod data;
pub mod errors;
pub mod query;
pub mod records;
mod repository;
pub mod service;
pub mod stats;
pub mod status;
pub mod time_slot;

pub use errors::BookingsServiceError;
pub use service::*;
