use super::eligibility::holds_overlapping_assignment;
use super::types::PlanError;
use crate::model::{Assignment, EmployeeId, PlanData, ShiftId};

/// Insère une affectation en garantissant l'unicité de la paire
/// (shift, employé). Un doublon est un conflit, jamais un écrasement.
pub(super) fn push_assignment(
    data: &mut PlanData,
    shift_id: ShiftId,
    employee_id: EmployeeId,
) -> Result<(), PlanError> {
    if data.assignment_exists(&shift_id, &employee_id) {
        return Err(PlanError::DuplicateAssignment {
            shift: shift_id.as_str().to_string(),
            employee: employee_id.as_str().to_string(),
        });
    }
    data.assignments.push(Assignment {
        shift_id,
        employee_id,
    });
    Ok(())
}

/// Affectation manuelle : vérifie l'existence du shift et de l'employé,
/// refuse le doublon et le double-booking.
pub(super) fn assign(
    data: &mut PlanData,
    shift_id: &ShiftId,
    employee_id: &EmployeeId,
) -> Result<(), PlanError> {
    let shift = data
        .find_shift(shift_id)
        .ok_or_else(|| PlanError::UnknownShift(shift_id.as_str().to_string()))?
        .clone();
    if data.find_employee(employee_id).is_none() {
        return Err(PlanError::UnknownEmployee(employee_id.as_str().to_string()));
    }
    if data.assignment_exists(shift_id, employee_id) {
        return Err(PlanError::DuplicateAssignment {
            shift: shift_id.as_str().to_string(),
            employee: employee_id.as_str().to_string(),
        });
    }
    if holds_overlapping_assignment(data, employee_id, shift.start_at, shift.end_at) {
        return Err(PlanError::AssignInvalid("employee already booked on an overlapping shift"));
    }
    push_assignment(data, shift.id, employee_id.clone())
}

/// Retire une affectation existante.
pub(super) fn unassign(
    data: &mut PlanData,
    shift_id: &ShiftId,
    employee_id: &EmployeeId,
) -> Result<(), PlanError> {
    let before = data.assignments.len();
    data.assignments
        .retain(|a| !(&a.shift_id == shift_id && &a.employee_id == employee_id));
    if data.assignments.len() == before {
        return Err(PlanError::AssignmentNotFound {
            shift: shift_id.as_str().to_string(),
            employee: employee_id.as_str().to_string(),
        });
    }
    Ok(())
}
