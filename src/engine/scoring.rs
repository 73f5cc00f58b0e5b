use chrono::{Datelike, Duration, TimeZone, Utc};

use super::util;
use crate::model::{EmployeeId, PlanData, Shift};

/// Issue du scoring d'un couple (employé, shift).
///
/// `Vetoed` remplace la sentinelle numérique : une préférence
/// `do_not_schedule` chevauchante exclut l'employé, quel que soit le poids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefScore {
    Vetoed,
    Eligible(i32),
}

/// Score de préférence d'un employé pour un shift.
///
/// Seules les préférences du même jour de semaine, actives à la date du
/// shift et munies d'une fenêtre horaire complète participent. Une fenêtre
/// dont la fin ne dépasse pas le début s'étend au lendemain (cas 22:00–06:00).
/// Le score retenu est le poids maximal des préférences chevauchantes.
pub(super) fn preference_score(data: &PlanData, employee: &EmployeeId, shift: &Shift) -> PrefScore {
    let start = shift.start_at;
    let end = shift.end_at;
    let day = start.date_naive();
    let weekday = start.weekday().num_days_from_monday() as u8;

    let mut best = 0i32;
    for pref in data
        .preferences
        .iter()
        .filter(|p| &p.employee_id == employee && p.weekday == Some(weekday))
    {
        if pref.active_start.is_some_and(|d| day < d) {
            continue;
        }
        if pref.active_end.is_some_and(|d| day > d) {
            continue;
        }

        // Une préférence sans fenêtre horaire ne participe pas au scoring.
        let (Some(from), Some(to)) = (pref.start_time, pref.end_time) else {
            continue;
        };

        let win_start = Utc.from_utc_datetime(&day.and_time(from));
        let mut win_end = Utc.from_utc_datetime(&day.and_time(to));
        if win_end <= win_start {
            win_end += Duration::days(1);
        }

        if util::overlaps(start, end, win_start, win_end) {
            if pref.do_not_schedule {
                return PrefScore::Vetoed;
            }
            best = best.max(i32::from(pref.weight.unwrap_or(0)));
        }
    }

    PrefScore::Eligible(best)
}
