//! Credit-purchase installment splitting.
//!
//! A purchase of `total_cents` split into `count` installments produces
//! amounts that sum back to the total exactly: base amounts come from
//! integer floor division and the entire remainder lands on the LAST
//! installment, matching how card statements present the split.
//!
//! When the purchase was made on a credit card on or after the card's
//! statement closing day, the whole schedule shifts one month forward
//! before any per-installment dates are computed ("billing cycle shift").

use crate::core::dates::add_months_clamped;
use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};

/// One slice of an installment schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallmentPart {
    /// 1-based position within the group
    pub number: u32,
    /// Amount of this slice in integer cents
    pub amount_cents: i64,
    /// Date this slice posts to the ledger
    pub date: NaiveDate,
}

/// Splits `total_cents` into `count` non-negative cent amounts that sum
/// exactly to the total. The last amount absorbs `total_cents % count`.
///
/// # Errors
/// Rejects `count < 2` and non-positive totals.
pub fn split_amount(total_cents: i64, count: u32) -> Result<Vec<i64>> {
    if count < 2 {
        return Err(Error::validation(format!(
            "installment count must be at least 2, got {count}"
        )));
    }
    if total_cents <= 0 {
        return Err(Error::InvalidAmount {
            amount_cents: total_cents,
        });
    }

    let count = i64::from(count);
    let base = total_cents / count;
    let remainder = total_cents % count;

    let mut amounts = vec![base; count as usize];
    if let Some(last) = amounts.last_mut() {
        *last += remainder;
    }
    Ok(amounts)
}

/// Whether a purchase on `purchase_date` posts to the next billing cycle.
#[must_use]
pub fn shifts_to_next_cycle(purchase_date: NaiveDate, closing_day: u32) -> bool {
    purchase_date.day() >= closing_day
}

/// Builds the full installment schedule for one purchase.
///
/// Dates are anchored to the purchase's day-of-month with short-month
/// clamping; `closing_day` (when the purchase was on credit) may shift
/// the whole schedule forward one month first.
///
/// # Errors
/// Propagates the validation errors of [`split_amount`].
pub fn build_schedule(
    total_cents: i64,
    count: u32,
    purchase_date: NaiveDate,
    closing_day: Option<u32>,
) -> Result<Vec<InstallmentPart>> {
    let amounts = split_amount(total_cents, count)?;

    let cycle_shift = match closing_day {
        Some(day) if shifts_to_next_cycle(purchase_date, day) => 1,
        _ => 0,
    };
    let anchor_day = purchase_date.day();

    Ok(amounts
        .into_iter()
        .enumerate()
        .map(|(i, amount_cents)| InstallmentPart {
            number: i as u32 + 1,
            amount_cents,
            date: add_months_clamped(purchase_date, cycle_shift + i as u32, anchor_day),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_split_sums_exactly() {
        // R$ 100,00 in 3: base 3333, remainder 1 on the last
        let amounts = split_amount(10_000, 3).unwrap();
        assert_eq!(amounts, vec![3_333, 3_333, 3_334]);
        assert_eq!(amounts.iter().sum::<i64>(), 10_000);
    }

    #[test]
    fn test_split_no_remainder() {
        let amounts = split_amount(10_000, 4).unwrap();
        assert_eq!(amounts, vec![2_500; 4]);
    }

    #[test]
    fn test_split_remainder_only_on_last() {
        for count in 2..=12u32 {
            for total in [99, 1_000, 9_999, 123_457] {
                let amounts = split_amount(total, count).unwrap();
                assert_eq!(amounts.len(), count as usize);
                assert_eq!(amounts.iter().sum::<i64>(), total);
                assert!(amounts.iter().all(|&a| a >= 0));
                // Every amount except the last is the floor base
                let base = total / i64::from(count);
                assert!(amounts[..amounts.len() - 1].iter().all(|&a| a == base));
                assert_eq!(amounts[amounts.len() - 1], base + total % i64::from(count));
            }
        }
    }

    #[test]
    fn test_split_total_smaller_than_count() {
        // 3 cents in 5 installments: four zero slices, the last gets all 3
        let amounts = split_amount(3, 5).unwrap();
        assert_eq!(amounts, vec![0, 0, 0, 0, 3]);
    }

    #[test]
    fn test_split_rejects_bad_input() {
        assert!(split_amount(10_000, 1).is_err());
        assert!(split_amount(10_000, 0).is_err());
        assert!(split_amount(0, 3).is_err());
        assert!(split_amount(-500, 3).is_err());
    }

    #[test]
    fn test_schedule_without_card() {
        let parts = build_schedule(10_000, 3, d(2025, 1, 10), None).unwrap();
        assert_eq!(parts[0].date, d(2025, 1, 10));
        assert_eq!(parts[1].date, d(2025, 2, 10));
        assert_eq!(parts[2].date, d(2025, 3, 10));
        assert_eq!(parts.iter().map(|p| p.amount_cents).sum::<i64>(), 10_000);
        assert_eq!(
            parts.iter().map(|p| p.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_schedule_before_closing_day_stays_in_cycle() {
        // Closing on the 15th, bought on the 10th: no shift
        let parts = build_schedule(9_000, 2, d(2025, 1, 10), Some(15)).unwrap();
        assert_eq!(parts[0].date, d(2025, 1, 10));
        assert_eq!(parts[1].date, d(2025, 2, 10));
    }

    #[test]
    fn test_schedule_on_closing_day_shifts_whole_group() {
        // Bought ON the closing day: entire schedule starts next month
        let parts = build_schedule(9_000, 2, d(2025, 1, 15), Some(15)).unwrap();
        assert_eq!(parts[0].date, d(2025, 2, 15));
        assert_eq!(parts[1].date, d(2025, 3, 15));
    }

    #[test]
    fn test_schedule_shift_with_clamping_keeps_anchor() {
        // Bought Jan 31, closing day 20: first slice clamps to Feb 28,
        // but later slices snap back to the day-31 anchor
        let parts = build_schedule(30_000, 3, d(2025, 1, 31), Some(20)).unwrap();
        assert_eq!(parts[0].date, d(2025, 2, 28));
        assert_eq!(parts[1].date, d(2025, 3, 31));
        assert_eq!(parts[2].date, d(2025, 4, 30));
    }
}
