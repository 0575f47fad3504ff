use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// late-fine policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineConfig {
    /// day of the month fees fall due
    pub due_day: u32,
    /// flat fine charged per day past due
    pub daily_rate: Money,
}

impl Default for FineConfig {
    fn default() -> Self {
        Self {
            due_day: 10,
            daily_rate: Money::from_major(5),
        }
    }
}

/// computes the late fine for a payment date
pub struct FineCalculator {
    pub config: FineConfig,
}

impl FineCalculator {
    pub fn new(config: FineConfig) -> Self {
        Self { config }
    }

    /// assess the fine owed when paying on `payment_date`
    ///
    /// the due date is the configured day of the payment date's own
    /// month and year, clamped to the month's last day; paying on or
    /// before it costs nothing
    pub fn assess(&self, payment_date: NaiveDate) -> FineAssessment {
        let due_date = payment_date
            .with_day(self.config.due_day)
            .unwrap_or_else(|| last_day_of_month(payment_date));

        if payment_date <= due_date {
            return FineAssessment {
                due_date,
                late_days: 0,
                fine_amount: Money::ZERO,
            };
        }

        let late_days = (payment_date - due_date).num_days() as u32;
        FineAssessment {
            due_date,
            late_days,
            fine_amount: self.config.daily_rate.times(late_days),
        }
    }
}

impl Default for FineCalculator {
    fn default() -> Self {
        Self::new(FineConfig::default())
    }
}

/// fine calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineAssessment {
    pub due_date: NaiveDate,
    pub late_days: u32,
    pub fine_amount: Money,
}

impl FineAssessment {
    pub fn is_late(&self) -> bool {
        self.late_days > 0
    }
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_on_due_date_no_fine() {
        let calc = FineCalculator::default();
        let result = calc.assess(date(2025, 4, 10));
        assert_eq!(result.fine_amount, Money::ZERO);
        assert_eq!(result.late_days, 0);
        assert!(!result.is_late());
    }

    #[test]
    fn test_one_day_late() {
        let calc = FineCalculator::default();
        let result = calc.assess(date(2025, 4, 11));
        assert_eq!(result.late_days, 1);
        assert_eq!(result.fine_amount, Money::from_major(5));
    }

    #[test]
    fn test_ten_days_late() {
        let calc = FineCalculator::default();
        let result = calc.assess(date(2025, 4, 20));
        assert_eq!(result.late_days, 10);
        assert_eq!(result.fine_amount, Money::from_major(50));
    }

    #[test]
    fn test_before_due_date() {
        let calc = FineCalculator::default();
        let result = calc.assess(date(2025, 4, 5));
        assert_eq!(result.fine_amount, Money::ZERO);
        assert_eq!(result.due_date, date(2025, 4, 10));
    }

    #[test]
    fn test_due_day_clamped_to_short_month() {
        let calc = FineCalculator::new(FineConfig {
            due_day: 31,
            daily_rate: Money::from_major(5),
        });

        // february has no 31st; the due date clamps to month end
        let result = calc.assess(date(2025, 2, 28));
        assert_eq!(result.due_date, date(2025, 2, 28));
        assert_eq!(result.fine_amount, Money::ZERO);

        let result = calc.assess(date(2024, 2, 29));
        assert_eq!(result.due_date, date(2024, 2, 29));

        let result = calc.assess(date(2025, 4, 20));
        assert_eq!(result.due_date, date(2025, 4, 30));
        assert!(!result.is_late());
    }

    #[test]
    fn test_custom_policy() {
        let calc = FineCalculator::new(FineConfig {
            due_day: 5,
            daily_rate: Money::from_major(10),
        });
        let result = calc.assess(date(2025, 6, 8));
        assert_eq!(result.late_days, 3);
        assert_eq!(result.fine_amount, Money::from_major(30));
    }
}
