use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::util;
use crate::model::{EmployeeId, PlanData, RoleId, ScheduleId};

/// Compteur d'heures affectées par employé sur la fenêtre de la requête,
/// toutes fonctions confondues. Local à une invocation du moteur ; sert
/// uniquement de départage de dernier rang.
#[derive(Debug, Default)]
pub(super) struct WindowTally {
    hours: HashMap<EmployeeId, f64>,
}

impl WindowTally {
    /// Initialise le compteur depuis les affectations persistées du planning
    /// qui chevauchent la fenêtre.
    pub(super) fn seed(
        data: &PlanData,
        schedule: &ScheduleId,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Self {
        let mut hours: HashMap<EmployeeId, f64> = HashMap::new();
        for a in &data.assignments {
            let Some(shift) = data.find_shift(&a.shift_id) else {
                continue;
            };
            if &shift.schedule_id != schedule {
                continue;
            }
            if util::overlaps(shift.start_at, shift.end_at, window_start, window_end) {
                *hours.entry(a.employee_id.clone()).or_insert(0.0) += util::shift_hours(shift);
            }
        }
        Self { hours }
    }

    pub(super) fn hours(&self, employee: &EmployeeId) -> f64 {
        self.hours.get(employee).copied().unwrap_or(0.0)
    }

    pub(super) fn add(&mut self, employee: &EmployeeId, hours: f64) {
        *self.hours.entry(employee.clone()).or_insert(0.0) += hours;
    }
}

/// Heures déjà affectées à l'employé sur ce rôle dans la semaine ISO donnée.
///
/// Recalculé à chaque shift depuis les affectations persistées (la semaine
/// pertinente change de shift en shift), plutôt que mis en cache : les lignes
/// écrites plus tôt dans la même passe comptent ainsi dans le plafond.
pub(super) fn role_week_hours(
    data: &PlanData,
    employee: &EmployeeId,
    role: &RoleId,
    week_start: DateTime<Utc>,
    week_end: DateTime<Utc>,
) -> f64 {
    data.assignments
        .iter()
        .filter(|a| &a.employee_id == employee)
        .filter_map(|a| data.find_shift(&a.shift_id))
        .filter(|s| &s.role_id == role)
        .filter(|s| util::overlaps(s.start_at, s.end_at, week_start, week_end))
        .map(util::shift_hours)
        .sum()
}
