//! Calendar arithmetic with short-month clamping.
//!
//! Recurring bills and installment schedules both move dates forward by
//! whole months while trying to stay on an anchor day-of-month. When the
//! target month is shorter than the anchor (day 31 into a 30-day month),
//! the date clamps to that month's last valid day; the anchor itself is
//! preserved so later months can snap back to it.

use chrono::{Datelike, NaiveDate};

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // First of the following month minus one day; months passed in are
    // always 1-12 here so the fallback is unreachable.
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map_or(28, |d| d.day())
}

/// The date `months` whole months after `date`, snapped to `anchor_day`
/// and clamped to the target month's length.
pub fn add_months_clamped(date: NaiveDate, months: u32, anchor_day: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = anchor_day.clamp(1, days_in_month(year, month));
    // day is within the month by construction
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// The next occurrence of `anchor_day` strictly after `date`'s month,
/// i.e. one month forward with clamping.
pub fn next_month_anchored(date: NaiveDate, anchor_day: u32) -> NaiveDate {
    add_months_clamped(date, 1, anchor_day)
}

/// First occurrence of `anchor_day` on or after `today`: this month when
/// the anchor has not passed yet, otherwise next month. Used to derive a
/// new template's initial `next_run`.
pub fn upcoming_anchor(today: NaiveDate, anchor_day: u32) -> NaiveDate {
    let this_month_day = anchor_day.clamp(1, days_in_month(today.year(), today.month()));
    if this_month_day >= today.day() {
        NaiveDate::from_ymd_opt(today.year(), today.month(), this_month_day).unwrap_or(today)
    } else {
        add_months_clamped(today, 1, anchor_day)
    }
}

/// First day of `date`'s month. Budgets are keyed by this.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// First day of the month after `date`'s month.
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    add_months_clamped(month_start(date), 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 2), 29); // leap year
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_add_months_clamps_short_month() {
        // Day-31 anchor rolling into a 30-day month clamps to day 30
        assert_eq!(add_months_clamped(d(2025, 3, 31), 1, 31), d(2025, 4, 30));
        // February clamps hardest
        assert_eq!(add_months_clamped(d(2025, 1, 31), 1, 31), d(2025, 2, 28));
        assert_eq!(add_months_clamped(d(2024, 1, 31), 1, 31), d(2024, 2, 29));
    }

    #[test]
    fn test_add_months_snaps_back_to_anchor() {
        // After clamping to Feb 28, a day-31 anchor snaps back to Mar 31
        assert_eq!(add_months_clamped(d(2025, 2, 28), 1, 31), d(2025, 3, 31));
    }

    #[test]
    fn test_add_months_crosses_year() {
        assert_eq!(add_months_clamped(d(2025, 11, 15), 2, 15), d(2026, 1, 15));
        assert_eq!(add_months_clamped(d(2025, 12, 5), 1, 5), d(2026, 1, 5));
    }

    #[test]
    fn test_add_zero_months_resnap() {
        // Zero months still snaps to the anchor within the same month
        assert_eq!(add_months_clamped(d(2025, 4, 28), 0, 31), d(2025, 4, 30));
    }

    #[test]
    fn test_upcoming_anchor_same_month() {
        assert_eq!(upcoming_anchor(d(2025, 6, 10), 15), d(2025, 6, 15));
        assert_eq!(upcoming_anchor(d(2025, 6, 15), 15), d(2025, 6, 15));
    }

    #[test]
    fn test_upcoming_anchor_rolls_forward() {
        assert_eq!(upcoming_anchor(d(2025, 6, 20), 15), d(2025, 7, 15));
        // Anchor 31 in June (30 days) clamps to the 30th
        assert_eq!(upcoming_anchor(d(2025, 6, 1), 31), d(2025, 6, 30));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_start(d(2025, 6, 17)), d(2025, 6, 1));
        assert_eq!(next_month_start(d(2025, 12, 17)), d(2026, 1, 1));
    }
}
