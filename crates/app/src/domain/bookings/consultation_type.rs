//! Consultation Types

use std::{fmt, str::FromStr};

use crate::domain::bookings::errors::UnknownValueError;

/// Purpose of a requester's consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConsultationType {
    Career,
    Health,
    Marriage,
    Family,
    Fortune,
    Other,
}

impl ConsultationType {
    pub const ALL: [Self; 6] = [
        Self::Career,
        Self::Health,
        Self::Marriage,
        Self::Family,
        Self::Fortune,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Health => "health",
            Self::Marriage => "marriage",
            Self::Family => "family",
            Self::Fortune => "fortune",
            Self::Other => "other",
        }
    }

    /// Label used on the public intake form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Career => "事業前途",
            Self::Health => "身體健康",
            Self::Marriage => "姻緣感情",
            Self::Family => "家庭家運",
            Self::Fortune => "財運補庫",
            Self::Other => "其他疑難",
        }
    }
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsultationType {
    type Err = UnknownValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownValueError::new("consultation type", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_parse_back() {
        for kind in ConsultationType::ALL {
            assert_eq!(kind.as_str().parse::<ConsultationType>().ok(), Some(kind));
        }
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels: Vec<&str> = ConsultationType::ALL.iter().map(|k| k.label()).collect();

        labels.sort_unstable();
        labels.dedup();

        assert_eq!(labels.len(), ConsultationType::ALL.len());
    }

    #[test]
    fn unknown_value_names_the_kind() {
        let error = "lottery".parse::<ConsultationType>().err();

        assert_eq!(
            error.map(|e| e.to_string()),
            Some("unknown consultation type value: lottery".to_string())
        );
    }
}
