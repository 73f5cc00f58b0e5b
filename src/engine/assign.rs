use std::collections::HashSet;

use super::eligibility::{blocked_by_unavailability, exceeds_weekly_cap, holds_overlapping_assignment};
use super::scoring::{preference_score, PrefScore};
use super::tally::{role_week_hours, WindowTally};
use super::types::{AssignPolicy, AssignReport, AssignRequest, PlanError};
use super::{mutate, util};
use crate::model::{EmployeeId, PlanData, Shift, ShiftId};

/// Candidat classé pour un shift, avec ses métriques de départage.
#[derive(Debug)]
struct Candidate {
    score: i32,
    role_week_hours: f64,
    window_hours: f64,
    employee: EmployeeId,
}

/// Passe gloutonne d'auto-assignation.
///
/// Parcourt les shifts de la fenêtre en ordre déterministe (début croissant
/// puis id), construit par shift une liste de candidats filtrée et classée,
/// et remplit les postes vacants. Chaque choix alimente les compteurs vus
/// par les shifts suivants. Un shift insatisfiable est compté et passé,
/// jamais bloquant.
pub(super) fn auto_assign(data: &mut PlanData, req: &AssignRequest) -> Result<AssignReport, PlanError> {
    let (window_start, window_end) = util::window_bounds(req.start_date, req.end_date);

    let schedule = data
        .find_schedule(&req.schedule_id)
        .ok_or_else(|| PlanError::ScheduleNotFound(req.schedule_id.as_str().to_string()))?;
    let org_id = schedule.org_id.clone();

    // Shifts de l'org chevauchant la fenêtre, restreints au planning demandé.
    // L'ordre (début, id) est porteur : il rend la passe déterministe et donne
    // aux shifts les plus précoces la priorité sur les candidats rares.
    let mut shifts: Vec<Shift> = data
        .shifts
        .iter()
        .filter(|s| s.org_id == org_id && s.schedule_id == req.schedule_id)
        .filter(|s| util::overlaps(s.start_at, s.end_at, window_start, window_end))
        .cloned()
        .collect();
    shifts.sort_by(|a, b| a.start_at.cmp(&b.start_at).then_with(|| a.id.cmp(&b.id)));

    // Purge préalable (politique reassign_all, hors prévisualisation), pour
    // que chaque vérification d'éligibilité parte d'une table rase.
    if req.policy == AssignPolicy::ReassignAll && !req.dry_run {
        let in_scope: HashSet<&ShiftId> = shifts.iter().map(|s| &s.id).collect();
        data.assignments.retain(|a| !in_scope.contains(&a.shift_id));
    }

    let employees: Vec<EmployeeId> = data.employees_of(&org_id).map(|e| e.id.clone()).collect();
    let mut tally = WindowTally::seed(data, &req.schedule_id, window_start, window_end);
    let mut report = AssignReport::new(req.policy);

    for shift in &shifts {
        let seats_needed = shift.required_staff_count.max(1) as usize;
        let already = data.assignments_for_shift(&shift.id).count();
        if already >= seats_needed {
            report.skipped_full += 1;
            continue;
        }
        let seats_available = seats_needed - already;

        let (week_start, week_end) = util::week_bounds(shift.start_at.date_naive());
        let role_cap = data
            .find_role(&shift.role_id)
            .and_then(|r| r.weekly_hours_cap)
            .map(f64::from);
        let hours = util::shift_hours(shift);

        let mut candidates: Vec<Candidate> = Vec::new();
        for emp in &employees {
            if data.assignment_exists(&shift.id, emp) {
                continue;
            }
            if blocked_by_unavailability(data, emp, shift.start_at, shift.end_at) {
                continue;
            }
            let week_hours = role_week_hours(data, emp, &shift.role_id, week_start, week_end);
            if exceeds_weekly_cap(week_hours, hours, role_cap) {
                continue;
            }
            match preference_score(data, emp, shift) {
                PrefScore::Vetoed => continue,
                PrefScore::Eligible(score) => candidates.push(Candidate {
                    score,
                    role_week_hours: week_hours,
                    window_hours: tally.hours(emp),
                    employee: emp.clone(),
                }),
            }
        }

        if candidates.is_empty() {
            report.skipped_no_candidates += 1;
            continue;
        }

        // Meilleur score d'abord ; à égalité : moins d'heures sur ce rôle
        // cette semaine, puis moins d'heures sur la fenêtre, puis id.
        candidates.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.role_week_hours.total_cmp(&b.role_week_hours))
                .then(a.window_hours.total_cmp(&b.window_hours))
                .then(a.employee.cmp(&b.employee))
        });

        let mut picked: Vec<EmployeeId> = Vec::new();
        for _ in 0..seats_available {
            let found = candidates.iter().position(|c| {
                !holds_overlapping_assignment(data, &c.employee, shift.start_at, shift.end_at)
            });
            let Some(idx) = found else {
                break;
            };
            let chosen = candidates.remove(idx);
            tally.add(&chosen.employee, hours);
            picked.push(chosen.employee);
        }

        if !picked.is_empty() {
            if !req.dry_run {
                for emp in &picked {
                    mutate::push_assignment(data, shift.id.clone(), emp.clone())?;
                }
            }
            // Le bilan compte les postes remplis, prévisualisation comprise.
            report.assigned += picked.len() as u32;
        }
    }

    Ok(report)
}
