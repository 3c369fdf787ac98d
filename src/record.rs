use crate::time::{ClockTime, TimeRange};
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A range on one date during which a teacher accepts bookings for a lecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AvailabilityWindow {
    #[cfg_attr(feature = "serde", serde(rename = "booking_date"))]
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl AvailabilityWindow {
    pub fn new(date: NaiveDate, start_time: ClockTime, end_time: ClockTime) -> Self {
        AvailabilityWindow {
            date,
            start_time,
            end_time,
        }
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Expired,
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Confirmed
    }
}

impl BookingStatus {
    /// Pending and confirmed bookings hold their slots
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// A booking occupying part of an availability window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reservation {
    #[cfg_attr(feature = "serde", serde(rename = "booking_date"))]
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: BookingStatus,
}

impl Reservation {
    /// A confirmed reservation
    pub fn new(date: NaiveDate, start_time: ClockTime, end_time: ClockTime) -> Self {
        Reservation {
            date,
            start_time,
            end_time,
            status: BookingStatus::Confirmed,
        }
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

#[cfg(feature = "arbitrary")]
mod fuzzing {
    use super::*;
    use arbitrary::{Arbitrary, Result, Unstructured};

    // Keeps fuzzed dates inside a few weeks so that windows and reservations
    // actually collide.
    fn arbitrary_date(u: &mut Unstructured<'_>) -> Result<NaiveDate> {
        let offset = u.int_in_range(0..=27)?;
        NaiveDate::from_ymd_opt(2025, 7, 1)
            .and_then(|d| d.checked_add_signed(chrono::Duration::days(offset)))
            .ok_or(arbitrary::Error::IncorrectFormat)
    }

    impl<'a> Arbitrary<'a> for AvailabilityWindow {
        fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
            Ok(AvailabilityWindow::new(
                arbitrary_date(u)?,
                u.arbitrary()?,
                u.arbitrary()?,
            ))
        }
    }

    impl<'a> Arbitrary<'a> for BookingStatus {
        fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
            Ok(*u.choose(&[
                BookingStatus::Pending,
                BookingStatus::Confirmed,
                BookingStatus::Cancelled,
                BookingStatus::Expired,
            ])?)
        }
    }

    impl<'a> Arbitrary<'a> for Reservation {
        fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
            Ok(
                Reservation::new(arbitrary_date(u)?, u.arbitrary()?, u.arbitrary()?)
                    .with_status(u.arbitrary()?),
            )
        }
    }
}
