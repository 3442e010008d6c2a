//! Authentication

mod errors;
pub mod gate;
mod models;
pub mod openbao;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use gate::{AdminSession, AuthGate};
pub use models::*;
pub use openbao::{OpenBaoClient, OpenBaoConfig, OpenBaoError, TransitHmac};
pub use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
