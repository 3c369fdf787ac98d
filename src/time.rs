use core::fmt;
use core::str::FromStr;
use num::Integer;
use std::collections::BTreeSet;
use thiserror::Error;

/// Length of one bookable slot, in minutes
pub const SLOT_MINUTES: u16 = 30;

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    #[error("Invalid clock time \"{0}\". Expected HH:MM or HH:MM:SS")]
    InvalidFormat(String),
    #[error("{hour:02}:{minute:02} is not on the half-hour grid")]
    OffGrid { hour: u16, minute: u16 },
    #[error("{hour:02}:{minute:02} is outside of 00:00-24:00")]
    OutOfRange { hour: u16, minute: u16 },
}

/// A time of day on the half-hour grid, stored as minutes since midnight.
/// `24:00` is representable so that a range may end at the end of the day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// A whole hour, saturating at 24:00
    pub const fn hours(hour: u16) -> ClockTime {
        if hour >= 24 {
            ClockTime::END_OF_DAY
        } else {
            ClockTime(hour * MINUTES_PER_HOUR)
        }
    }

    /// Construct a ClockTime from an hour and minute
    ///
    /// # Examples
    /// ```
    /// use lecture_slots::time::{ClockTime, ParseError};
    ///
    /// let time = ClockTime::from_hm(10, 30).unwrap();
    /// assert_eq!(time.to_string(), "10:30");
    ///
    /// assert_eq!(
    ///     ClockTime::from_hm(10, 15),
    ///     Err(ParseError::OffGrid { hour: 10, minute: 15 })
    /// );
    /// ```
    pub fn from_hm(hour: u16, minute: u16) -> Result<ClockTime, ParseError> {
        if minute >= MINUTES_PER_HOUR || hour > 24 {
            return Err(ParseError::OutOfRange { hour, minute });
        }

        let minutes = hour * MINUTES_PER_HOUR + minute;
        if minutes > MINUTES_PER_DAY {
            Err(ParseError::OutOfRange { hour, minute })
        } else if minute.mod_floor(&SLOT_MINUTES) != 0 {
            Err(ParseError::OffGrid { hour, minute })
        } else {
            Ok(ClockTime(minutes))
        }
    }

    pub fn hour(self) -> u16 {
        self.0.div_rem(&MINUTES_PER_HOUR).0
    }

    pub fn minute(self) -> u16 {
        self.0.div_rem(&MINUTES_PER_HOUR).1
    }

    /// Minutes since midnight
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// The boundary one slot later, or `None` past the end of the day
    ///
    /// # Examples
    /// ```
    /// use lecture_slots::time::ClockTime;
    ///
    /// let time: ClockTime = "23:30".parse().unwrap();
    /// assert_eq!(time.next_slot(), Some(ClockTime::END_OF_DAY));
    /// assert_eq!(ClockTime::END_OF_DAY.next_slot(), None);
    /// ```
    pub fn next_slot(self) -> Option<ClockTime> {
        let next = self.0 + SLOT_MINUTES;
        if next > MINUTES_PER_DAY {
            None
        } else {
            Some(ClockTime(next))
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, minute) = self.0.div_rem(&MINUTES_PER_HOUR);
        write!(f, "{:02}:{:02}", hour, minute)
    }
}

fn parse_field(field: &str, max_len: usize) -> Option<u16> {
    if field.is_empty() || field.len() > max_len || !field.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        field.parse().ok()
    }
}

impl FromStr for ClockTime {
    type Err = ParseError;

    /// Parses `"HH:MM"`, or `"HH:MM:SS"` with zero seconds
    ///
    /// # Examples
    /// ```
    /// use lecture_slots::time::ClockTime;
    ///
    /// let a: ClockTime = "09:30".parse().unwrap();
    /// let b: ClockTime = "09:30:00".parse().unwrap();
    /// assert_eq!(a, b);
    ///
    /// assert!("09:30:15".parse::<ClockTime>().is_err());
    /// assert!("9h30".parse::<ClockTime>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidFormat(s.to_string());

        let mut fields = s.trim().split(':');
        let hour = fields.next().and_then(|f| parse_field(f, 2)).ok_or_else(invalid)?;
        let minute = fields
            .next()
            .filter(|f| f.len() == 2)
            .and_then(|f| parse_field(f, 2))
            .ok_or_else(invalid)?;

        match fields.next() {
            None => {}
            Some("00") => {}
            Some(_) => return Err(invalid()),
        }
        if fields.next().is_some() {
            return Err(invalid());
        }

        ClockTime::from_hm(hour, minute)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for ClockTime {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let slot = u.int_in_range(0..=MINUTES_PER_DAY / SLOT_MINUTES)?;
        Ok(ClockTime(slot * SLOT_MINUTES))
    }
}

/// Half-open [start, end) range of clock times
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TimeRange(pub ClockTime, pub ClockTime);

impl TimeRange {
    /// Construct a new Time Range
    /// Range is half-open on [start, end)
    pub fn new(start: ClockTime, end: ClockTime) -> TimeRange {
        TimeRange(start, end)
    }

    pub fn start(self) -> ClockTime {
        self.0
    }

    pub fn end(self) -> ClockTime {
        self.1
    }

    /// True when no whole slot fits, including inverted ranges
    pub fn is_empty(self) -> bool {
        self.slots().next().is_none()
    }

    /// Iterates the start of every slot `t` where `[t, t + 30min)` fits in
    /// the range. A trailing remainder shorter than one slot is dropped.
    ///
    /// # Examples
    /// ```
    /// use lecture_slots::time::{ClockTime, TimeRange};
    ///
    /// let range = TimeRange::new("10:00".parse().unwrap(), "11:30".parse().unwrap());
    ///
    /// assert_eq!(
    ///     range.slots().map(|t| t.to_string()).collect::<Vec<_>>(),
    ///     vec!["10:00", "10:30", "11:00"]
    /// );
    /// ```
    pub fn slots(self) -> SlotIter {
        SlotIter {
            next: self.0.minutes(),
            end: self.1.minutes(),
        }
    }

    /// Whether the two ranges share any part of a slot
    ///
    /// # Examples
    /// ```
    /// use lecture_slots::time::TimeRange;
    ///
    /// let a = TimeRange::new("10:00".parse().unwrap(), "11:00".parse().unwrap());
    /// let b = TimeRange::new("11:00".parse().unwrap(), "12:00".parse().unwrap());
    /// let c = TimeRange::new("10:30".parse().unwrap(), "12:00".parse().unwrap());
    ///
    /// assert!(!a.overlaps(&b));
    /// assert!(a.overlaps(&c));
    /// ```
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.0 < other.1 && other.0 < self.1
    }

    /// Whether `other` lies entirely within self
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.0 <= other.0 && other.1 <= self.1
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

#[derive(Debug, Clone)]
pub struct SlotIter {
    next: u16,
    end: u16,
}

impl Iterator for SlotIter {
    type Item = ClockTime;

    fn next(&mut self) -> Option<ClockTime> {
        if self.next + SLOT_MINUTES <= self.end {
            let slot = ClockTime(self.next);
            self.next += SLOT_MINUTES;
            Some(slot)
        } else {
            None
        }
    }
}

pub trait Slotted {
    fn slotted(self) -> BTreeSet<ClockTime>;
}

impl<'a, T> Slotted for T
where
    T: Iterator<Item = &'a TimeRange>,
{
    /// Collects the slots of every range into one ordered set
    ///
    /// # Examples
    /// ```
    /// use lecture_slots::time::{ClockTime, Slotted, TimeRange};
    ///
    /// let t = |s: &str| s.parse::<ClockTime>().unwrap();
    /// let ranges = vec![
    ///     TimeRange::new(t("13:00"), t("14:00")),
    ///     TimeRange::new(t("10:00"), t("11:00")),
    ///     TimeRange::new(t("10:30"), t("11:30")),
    /// ];
    ///
    /// assert_eq!(
    ///     ranges.iter().slotted().into_iter().collect::<Vec<_>>(),
    ///     vec![t("10:00"), t("10:30"), t("11:00"), t("13:00"), t("13:30")]
    /// );
    /// ```
    fn slotted(self) -> BTreeSet<ClockTime> {
        self.flat_map(|range| range.slots()).collect()
    }
}
