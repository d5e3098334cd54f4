use chrono::{Datelike, NaiveDate};

/// Completed years between `dob` and `today`. Negative when `dob` lies in
/// the future.
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i32 {
    if dob > today {
        return -age_in_years(today, dob);
    }
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years
}
