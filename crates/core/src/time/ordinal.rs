use chrono::{Datelike, Duration, NaiveDate};

/// Day count since the common era; 0001-01-01 is day 1.
pub fn day_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce())
}

/// Date whose ordinal is `floor((ordinal(a) + ordinal(b)) / 2)`.
///
/// Odd spans round toward the earlier date. The bounds are not required to be
/// ordered; a reversed pair yields the same date as the ordered one.
pub fn midpoint(a: NaiveDate, b: NaiveDate) -> NaiveDate {
    // floor((x + y) / 2) == x + floor((y - x) / 2) for integers, and the
    // result always lies between two valid dates so the addition can't overflow.
    let half_span = (day_ordinal(b) - day_ordinal(a)).div_euclid(2);
    a + Duration::days(half_span)
}
