//! Booking Status

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::domain::bookings::errors::UnknownValueError;

/// Progress of a booking through the administrative workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// A status change the workflow does not permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move booking from {from} to {to}")]
pub struct IllegalTransitionError {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

impl BookingStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Display label shown in the back-office.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "待確認",
            Self::Confirmed => "已確認",
            Self::Completed => "已完成",
            Self::Cancelled => "已取消",
        }
    }

    /// Statuses reachable from this one, excluding re-saving the same status.
    #[must_use]
    pub const fn next_statuses(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    /// Whether an administrator may move a booking from `self` to `next`.
    ///
    /// Keeping the current status is always allowed so that notes can be
    /// edited on any booking, including terminal ones.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self == next || self.next_statuses().contains(&next)
    }

    /// Validate a transition, returning the target status.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalTransitionError`] when the workflow forbids the move.
    pub fn transition_to(self, next: Self) -> Result<Self, IllegalTransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(IllegalTransitionError {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownValueError::new("booking status", value))
    }
}
