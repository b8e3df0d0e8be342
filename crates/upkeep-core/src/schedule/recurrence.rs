//! Next-occurrence rule.
//!
//! Month-based steps use jiff's calendar arithmetic, which clamps to the last
//! day of a shorter month: 2024-01-31 plus one month is 2024-02-29. Steps are
//! applied to the previous occurrence, so a clamped day carries forward
//! (2024-01-31, 2024-02-29, 2024-03-29, ...).

use jiff::{civil::Date, Span, ToSpan};

use crate::models::Frequency;

/// Calendar interval between two occurrences.
pub fn interval(frequency: Frequency) -> Span {
    match frequency {
        Frequency::Daily => 1.day(),
        Frequency::Weekly => 7.days(),
        Frequency::Monthly => 1.month(),
        Frequency::Quarterly => 3.months(),
        Frequency::SemiAnnually => 6.months(),
        Frequency::Annually => 1.year(),
    }
}

/// Returns the occurrence following `date`.
///
/// There is no error path: if the step cannot be applied (the calendar
/// overflows), `date` is returned unchanged and the caller must treat the
/// sequence as stalled.
///
/// ```rust
/// use jiff::civil::date;
/// use upkeep_core::{models::Frequency, schedule::next_occurrence};
///
/// assert_eq!(next_occurrence(date(2024, 1, 1), Frequency::Weekly), date(2024, 1, 8));
/// assert_eq!(next_occurrence(date(2024, 1, 31), Frequency::Monthly), date(2024, 2, 29));
/// ```
pub fn next_occurrence(date: Date, frequency: Frequency) -> Date {
    date.checked_add(interval(frequency)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_fixed_day_steps() {
        assert_eq!(next_occurrence(date(2024, 2, 28), Frequency::Daily), date(2024, 2, 29));
        assert_eq!(next_occurrence(date(2024, 12, 31), Frequency::Daily), date(2025, 1, 1));
        assert_eq!(next_occurrence(date(2024, 12, 30), Frequency::Weekly), date(2025, 1, 6));
    }

    #[test]
    fn test_calendar_month_steps() {
        assert_eq!(next_occurrence(date(2024, 1, 15), Frequency::Monthly), date(2024, 2, 15));
        assert_eq!(next_occurrence(date(2024, 11, 30), Frequency::Quarterly), date(2025, 2, 28));
        assert_eq!(next_occurrence(date(2024, 8, 31), Frequency::SemiAnnually), date(2025, 2, 28));
        assert_eq!(next_occurrence(date(2024, 2, 29), Frequency::Annually), date(2025, 2, 28));
    }

    #[test]
    fn test_clamped_day_carries_forward() {
        let feb = next_occurrence(date(2024, 1, 31), Frequency::Monthly);
        let mar = next_occurrence(feb, Frequency::Monthly);
        assert_eq!(feb, date(2024, 2, 29));
        assert_eq!(mar, date(2024, 3, 29));
    }

    #[test]
    fn test_every_frequency_advances() {
        let start = date(2024, 6, 5);
        for frequency in Frequency::ALL {
            assert!(next_occurrence(start, frequency) > start, "{frequency:?} must advance");
        }
    }

    #[test]
    fn test_overflow_leaves_date_unchanged() {
        let last = date(9999, 12, 31);
        assert_eq!(next_occurrence(last, Frequency::Daily), last);
        assert_eq!(next_occurrence(last, Frequency::Annually), last);
    }
}
