use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

use crate::model::Shift;

/// Chevauchement d'intervalles semi-ouverts : les bornes qui se touchent
/// ne comptent pas.
pub(super) fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Bornes de la semaine ISO contenant `day` : [lundi 00:00:00, dimanche 23:59:59] UTC.
pub(super) fn week_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let monday = day - Duration::days(i64::from(day.weekday().num_days_from_monday()));
    let sunday = monday + Duration::days(6);
    let start = Utc.from_utc_datetime(&monday.and_hms_opt(0, 0, 0).unwrap());
    let end = Utc.from_utc_datetime(&sunday.and_hms_opt(23, 59, 59).unwrap());
    (start, end)
}

/// Durée d'un shift en heures fractionnaires.
pub(super) fn shift_hours(shift: &Shift) -> f64 {
    (shift.end_at - shift.start_at).num_seconds() as f64 / 3600.0
}

/// Bornes UTC d'une fenêtre de dates incluses.
pub(super) fn window_bounds(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let lo = Utc.from_utc_datetime(&start.and_hms_opt(0, 0, 0).unwrap());
    let hi = Utc.from_utc_datetime(&end.and_hms_opt(23, 59, 59).unwrap());
    (lo, hi)
}
