use crate::time::{ClockTime, TimeRange};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum PolicyError {
    #[error("Operating window {opening}-{closing} contains no slots")]
    EmptyWindow {
        opening: ClockTime,
        closing: ClockTime,
    },
}

/// Daily operating window in which teachers may publish availability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PolicyFields"))]
pub struct BookingPolicy {
    opening: ClockTime,
    closing: ClockTime,
}

pub const DEFAULT_OPENING: ClockTime = ClockTime::hours(10);
pub const DEFAULT_CLOSING: ClockTime = ClockTime::hours(20);

impl Default for BookingPolicy {
    fn default() -> Self {
        BookingPolicy {
            opening: DEFAULT_OPENING,
            closing: DEFAULT_CLOSING,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(default)]
struct PolicyFields {
    opening: ClockTime,
    closing: ClockTime,
}

#[cfg(feature = "serde")]
impl Default for PolicyFields {
    fn default() -> Self {
        PolicyFields {
            opening: DEFAULT_OPENING,
            closing: DEFAULT_CLOSING,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<PolicyFields> for BookingPolicy {
    type Error = PolicyError;

    fn try_from(fields: PolicyFields) -> Result<Self, Self::Error> {
        BookingPolicy::new(fields.opening, fields.closing)
    }
}

impl BookingPolicy {
    pub fn new(opening: ClockTime, closing: ClockTime) -> Result<Self, PolicyError> {
        if opening >= closing {
            Err(PolicyError::EmptyWindow { opening, closing })
        } else {
            Ok(BookingPolicy { opening, closing })
        }
    }

    pub fn opening(&self) -> ClockTime {
        self.opening
    }

    pub fn closing(&self) -> ClockTime {
        self.closing
    }

    /// Every boundary a schedule editor may offer, opening and closing included
    ///
    /// # Examples
    /// ```
    /// use lecture_slots::policy::BookingPolicy;
    ///
    /// let options = BookingPolicy::default().time_options();
    ///
    /// assert_eq!(options.len(), 21);
    /// assert_eq!(options.first().unwrap().to_string(), "10:00");
    /// assert_eq!(options.last().unwrap().to_string(), "20:00");
    /// ```
    pub fn time_options(&self) -> Vec<ClockTime> {
        let mut options: Vec<ClockTime> = self.operating_hours().slots().collect();
        options.push(self.closing);
        options
    }

    pub fn operating_hours(&self) -> TimeRange {
        TimeRange::new(self.opening, self.closing)
    }

    /// Whether `range` lies within the operating window
    pub fn contains(&self, range: &TimeRange) -> bool {
        self.operating_hours().contains(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn rejects_empty_window() {
        assert_eq!(
            BookingPolicy::new(t("12:00"), t("12:00")),
            Err(PolicyError::EmptyWindow {
                opening: t("12:00"),
                closing: t("12:00")
            })
        );
        assert!(BookingPolicy::new(t("13:00"), t("12:00")).is_err());
    }

    #[test]
    fn custom_window_options() {
        let policy = BookingPolicy::new(t("09:00"), t("10:30")).unwrap();

        assert_eq!(
            policy.time_options(),
            vec![t("09:00"), t("09:30"), t("10:00"), t("10:30")]
        );
        assert!(policy.contains(&TimeRange::new(t("09:30"), t("10:30"))));
        assert!(!policy.contains(&TimeRange::new(t("10:00"), t("11:00"))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults() {
        let policy: BookingPolicy = serde_json::from_str(r#"{"closing":"18:00"}"#).unwrap();

        assert_eq!(policy.opening(), t("10:00"));
        assert_eq!(policy.closing(), t("18:00"));

        assert!(serde_json::from_str::<BookingPolicy>(r#"{"opening":"21:00"}"#).is_err());
    }
}
