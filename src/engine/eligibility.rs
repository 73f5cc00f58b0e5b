use chrono::{DateTime, Utc};

use super::util;
use crate::model::{EmployeeId, PlanData};

/// Tolérance flottante sur le plafond hebdomadaire d'heures.
pub(super) const CAP_TOLERANCE: f64 = 1e-6;

/// Vrai si une indisponibilité de l'employé chevauche [start, end).
pub(super) fn blocked_by_unavailability(
    data: &PlanData,
    employee: &EmployeeId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> bool {
    data.unavailability
        .iter()
        .any(|u| &u.employee_id == employee && util::overlaps(u.start_at, u.end_at, start, end))
}

/// Vrai si ajouter `shift_hours` ferait dépasser le plafond hebdomadaire.
/// Sans plafond, passe toujours.
pub(super) fn exceeds_weekly_cap(
    role_week_hours: f64,
    shift_hours: f64,
    role_cap: Option<f64>,
) -> bool {
    match role_cap {
        Some(cap) => role_week_hours + shift_hours > cap + CAP_TOLERANCE,
        None => false,
    }
}

/// Garde défensive : vrai si l'employé tient déjà une affectation dont le
/// shift chevauche [start, end). Protège contre un état incohérent écrit
/// en dehors du moteur.
pub(super) fn holds_overlapping_assignment(
    data: &PlanData,
    employee: &EmployeeId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> bool {
    data.assignments
        .iter()
        .filter(|a| &a.employee_id == employee)
        .filter_map(|a| data.find_shift(&a.shift_id))
        .any(|s| util::overlaps(s.start_at, s.end_at, start, end))
}
