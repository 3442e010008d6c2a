//! Shared harness for database-backed tests.

mod context;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
