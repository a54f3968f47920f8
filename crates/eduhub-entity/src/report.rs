//! Report rows: a principal plus an aggregated monetary total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::principal::Principal;

/// Salary is quoted per month; accrual uses a fixed 30-day month.
pub const DAYS_PER_MONTH: i64 = 30;

/// One row of a report list.
///
/// For staff roles `total` is the salary accrued since the principal was
/// created. For students it is the sum of all recorded payments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalReport {
    /// The principal.
    #[serde(flatten)]
    pub principal: Principal,
    /// Aggregated total in the smallest currency unit.
    pub total: i64,
}

/// Whole days elapsed between two instants, never negative.
pub fn days_worked(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now.date_naive() - since.date_naive()).num_days().max(0)
}

/// Salary accrued over the days worked at a daily rate of `salary / 30`.
pub fn accrued_salary(monthly_salary: i64, since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    days_worked(since, now).saturating_mul(monthly_salary / DAYS_PER_MONTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_accrual_uses_whole_days() {
        let now = Utc::now();
        assert_eq!(
            accrued_salary(3_000_000, now - Duration::days(45), now),
            45 * 100_000
        );
    }

    #[test]
    fn test_accrual_never_negative() {
        let now = Utc::now();
        assert_eq!(accrued_salary(3_000_000, now + Duration::days(3), now), 0);
    }

    #[test]
    fn test_daily_rate_truncates() {
        let now = Utc::now();
        assert_eq!(accrued_salary(100, now - Duration::days(1), now), 3);
    }
}
