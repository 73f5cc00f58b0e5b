mod assign;
mod conflicts;
mod eligibility;
mod mutate;
mod scoring;
mod tally;
mod types;
mod util;

pub use scoring::PrefScore;
pub use types::{
    AssignPolicy, AssignReport, AssignRequest, Conflict, ConflictKind, PlanError,
};

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{
    Employee, EmployeeId, JobRole, LocationId, OrgId, PlanData, RoleId, Schedule, ScheduleId,
    Shift, ShiftId,
};

/// Planner : encapsule un jeu de données en cours de construction et
/// porte le moteur d'auto-assignation.
#[derive(Debug, Default)]
pub struct Planner {
    data: PlanData,
}

impl Planner {
    pub fn new() -> Self {
        Self {
            data: PlanData::default(),
        }
    }

    pub fn data(&self) -> &PlanData {
        &self.data
    }
    pub fn data_mut(&mut self) -> &mut PlanData {
        &mut self.data
    }

    pub fn add_employees(&mut self, employees: Vec<Employee>) {
        self.data.employees.extend(employees);
    }

    pub fn create_schedule(
        &mut self,
        org_id: OrgId,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> ScheduleId {
        let schedule = Schedule::new(org_id, range_start, range_end);
        let id = schedule.id.clone();
        self.data.schedules.push(schedule);
        id
    }

    pub fn create_role(
        &mut self,
        org_id: OrgId,
        name: &str,
        weekly_hours_cap: Option<u32>,
    ) -> RoleId {
        let role = JobRole::new(org_id, name, weekly_hours_cap);
        let id = role.id.clone();
        self.data.roles.push(role);
        id
    }

    /// Crée un shift rattaché à un planning existant.
    pub fn create_shift(
        &mut self,
        schedule_id: &ScheduleId,
        role_id: RoleId,
        location_id: Option<LocationId>,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        required_staff_count: u32,
        notes: Option<String>,
    ) -> Result<ShiftId, PlanError> {
        let schedule = self
            .data
            .find_schedule(schedule_id)
            .ok_or_else(|| PlanError::ScheduleNotFound(schedule_id.as_str().to_string()))?;
        let shift = Shift::new(
            schedule.org_id.clone(),
            schedule_id.clone(),
            role_id,
            location_id,
            start_at,
            end_at,
            required_staff_count,
            notes,
        )
        .map_err(|_| PlanError::InvalidTimeRange)?;
        let id = shift.id.clone();
        self.data.shifts.push(shift);
        Ok(id)
    }

    /// Passe d'auto-assignation gloutonne sur une fenêtre de dates.
    pub fn auto_assign(&mut self, req: &AssignRequest) -> Result<AssignReport, PlanError> {
        assign::auto_assign(&mut self.data, req)
    }

    /// Affectation manuelle d'un employé à un shift.
    pub fn assign(&mut self, shift: &ShiftId, employee: &EmployeeId) -> Result<(), PlanError> {
        mutate::assign(&mut self.data, shift, employee)
    }

    /// Retrait d'une affectation.
    pub fn unassign(&mut self, shift: &ShiftId, employee: &EmployeeId) -> Result<(), PlanError> {
        mutate::unassign(&mut self.data, shift, employee)
    }

    /// Liste les double-bookings présents dans le jeu de données.
    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        conflicts::detect_conflicts(&self.data)
    }
}
