//! Admin Data

use crate::domain::admins::records::AdminUuid;

/// New Admin Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    pub uuid: AdminUuid,
    pub email: String,
    pub name: String,
}

impl NewAdmin {
    #[must_use]
    pub fn new(email: &str, name: &str) -> Self {
        Self {
            uuid: AdminUuid::new(),
            email: normalize_email(email),
            name: name.trim().to_string(),
        }
    }
}

/// Canonical form used for allow-list and account lookups.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
