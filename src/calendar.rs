use chrono::{Datelike, Days, NaiveDate};
#[cfg(feature = "serde")]
use serde::Serialize;

/// One day of a Sunday-first booking week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WeekDate {
    pub date: NaiveDate,
    /// Today counts as past: same-day slots are never bookable
    pub is_past: bool,
}

/// A week attributed to the month its Sunday falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MonthWeek {
    pub year: i32,
    pub month: u32,
    pub week: u32,
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    let since_sunday = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(since_sunday)).unwrap_or(date)
}

/// Week of the month, 1-based, with weeks starting on Sunday.
///
/// Returns `0` when the Sunday of `date`'s week lies in the previous month:
/// that week belongs to the previous month. Use [`month_week`] to resolve it.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use lecture_slots::calendar::week_of_month;
///
/// // 2025-07-01 is a Tuesday, its week started on 2025-06-29
/// assert_eq!(week_of_month(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()), 0);
/// assert_eq!(week_of_month(NaiveDate::from_ymd_opt(2025, 7, 6).unwrap()), 2);
/// ```
pub fn week_of_month(date: NaiveDate) -> u32 {
    let sunday = week_start(date);
    if sunday.month() != date.month() {
        return 0;
    }

    let first_sunday = week_start(date.with_day(1).unwrap_or(date));
    let weeks = (sunday - first_sunday).num_weeks();

    // sunday >= first_sunday within one month, so weeks is in 0..=5
    weeks as u32 + 1
}

/// Week of month with the `0` case of [`week_of_month`] carried over to the
/// previous month's final week.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use lecture_slots::calendar::{month_week, MonthWeek};
///
/// assert_eq!(
///     month_week(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()),
///     MonthWeek { year: 2025, month: 6, week: 5 }
/// );
/// ```
pub fn month_week(date: NaiveDate) -> MonthWeek {
    let sunday = week_start(date);

    MonthWeek {
        year: sunday.year(),
        month: sunday.month(),
        week: week_of_month(sunday),
    }
}

/// The seven dates of the week `offset` weeks from the week of `today`,
/// Sunday first. `None` if the week falls outside the supported date range.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use lecture_slots::calendar::week_dates;
///
/// let today = NaiveDate::from_ymd_opt(2025, 7, 30).unwrap();
/// let week = week_dates(0, today).unwrap();
///
/// assert_eq!(week[0].date, NaiveDate::from_ymd_opt(2025, 7, 27).unwrap());
/// assert!(week[3].is_past);
/// assert!(!week[4].is_past);
/// ```
pub fn week_dates(offset: i64, today: NaiveDate) -> Option<[WeekDate; 7]> {
    let start = shift_days(week_start(today), offset.checked_mul(7)?)?;

    let mut week = [WeekDate {
        date: start,
        is_past: start <= today,
    }; 7];

    for (day, entry) in week.iter_mut().enumerate().skip(1) {
        let date = start.checked_add_days(Days::new(day as u64))?;
        *entry = WeekDate {
            date,
            is_past: date <= today,
        };
    }

    Some(week)
}

/// `"YYYY-MM-DD"` key used to index bookable slots by date
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
