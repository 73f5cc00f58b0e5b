use super::{util, Conflict, ConflictKind};
use crate::model::{PlanData, Shift};

/// Audit des double-bookings : pour chaque employé, toute paire
/// d'affectations dont les shifts se chevauchent.
pub(super) fn detect_conflicts(data: &PlanData) -> Vec<Conflict> {
    let mut out = Vec::new();

    for employee in &data.employees {
        let mut shifts: Vec<&Shift> = data
            .assignments
            .iter()
            .filter(|a| a.employee_id == employee.id)
            .filter_map(|a| data.find_shift(&a.shift_id))
            .collect();
        shifts.sort_by(|a, b| a.start_at.cmp(&b.start_at).then_with(|| a.id.cmp(&b.id)));

        for (idx, a) in shifts.iter().enumerate() {
            for b in shifts.iter().skip(idx + 1) {
                if util::overlaps(a.start_at, a.end_at, b.start_at, b.end_at) {
                    out.push(Conflict {
                        employee: employee.id.clone(),
                        shift_a: a.id.clone(),
                        shift_b: b.id.clone(),
                        kind: ConflictKind::Overlap,
                    });
                }
            }
        }
    }

    out
}
