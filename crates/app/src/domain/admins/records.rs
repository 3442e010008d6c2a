//! Admin Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Admin UUID
pub type AdminUuid = TypedUuid<AdminRecord>;

/// An allow-list entry granting back-office access to one email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRecord {
    pub uuid: AdminUuid,

    /// Normalised (trimmed, lowercase) email address.
    pub email: String,

    /// Display name shown in the back-office header.
    pub name: String,

    pub created_at: Timestamp,
}
