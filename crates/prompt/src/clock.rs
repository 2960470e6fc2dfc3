//! Time source for the optional date of issue.

use chrono::{Local, NaiveDate};

/// Supplies "today". The only place the generator reads the time.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// "October 18, 2026"
pub fn format_issue_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_formatting() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let clock = FixedClock(date);
        assert_eq!(format_issue_date(clock.today()), "March 5, 2026");
    }
}
