use chrono::NaiveDate;

/// Number of calendar days covered by `[start, end]`, counting both ends.
///
/// Returns 0 when `start` is after `end`.
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    if start > end {
        return 0;
    }
    (end - start).num_days() + 1
}
