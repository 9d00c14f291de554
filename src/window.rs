use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

/// Start of the current week: the most recent Monday at 00:00 in the given
/// civil offset, as a UTC instant. A Monday maps to itself.
pub fn week_start(now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let local = now.with_timezone(&offset);
    let back = local.weekday().num_days_from_monday() as i64;
    let date = local.date_naive() - Duration::days(back);
    local_midnight(date, offset)
}

/// Local midnight `days` days before `now`'s local date, as a UTC instant.
pub fn days_ago_start(now: DateTime<Utc>, offset: FixedOffset, days: i64) -> DateTime<Utc> {
    let local = now.with_timezone(&offset);
    let date = local.date_naive() - Duration::days(days);
    local_midnight(date, offset)
}

fn local_midnight(date: chrono::NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    // A fixed offset never produces an ambiguous local time.
    Utc.from_utc_datetime(&(date.and_time(NaiveTime::MIN) - offset))
}
