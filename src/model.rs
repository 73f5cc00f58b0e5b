use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(String);

        impl $name {
            pub fn new<S: AsRef<str>>(s: S) -> Self {
                Self(s.as_ref().to_owned())
            }
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

id_type!(/// Identifiant fort pour Organization
    OrgId);
id_type!(/// Identifiant fort pour Employee
    EmployeeId);
id_type!(/// Identifiant fort pour Schedule
    ScheduleId);
id_type!(/// Identifiant fort pour Shift
    ShiftId);
id_type!(/// Identifiant fort pour JobRole
    RoleId);
id_type!(/// Identifiant fort pour Location
    LocationId);

/// Employé d'une organisation (lecture seule pour le moteur).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub org_id: OrgId,
    pub display_name: String,
}

impl Employee {
    pub fn new<D: Into<String>>(org_id: OrgId, display_name: D) -> Self {
        Self {
            id: EmployeeId::random(),
            org_id,
            display_name: display_name.into(),
        }
    }
}

/// Rôle métier, avec plafond hebdomadaire d'heures optionnel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRole {
    pub id: RoleId,
    pub org_id: OrgId,
    pub name: String,
    #[serde(default)]
    pub weekly_hours_cap: Option<u32>,
}

impl JobRole {
    pub fn new<N: Into<String>>(org_id: OrgId, name: N, weekly_hours_cap: Option<u32>) -> Self {
        Self {
            id: RoleId::random(),
            org_id,
            name: name.into(),
            weekly_hours_cap,
        }
    }
}

/// Lieu de travail (scope optionnel des shifts et préférences).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub org_id: OrgId,
    pub name: String,
}

impl Location {
    pub fn new<N: Into<String>>(org_id: OrgId, name: N) -> Self {
        Self {
            id: LocationId::random(),
            org_id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Draft,
    Published,
    Archived,
}

/// Planning : une plage de dates versionnée pour une organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub org_id: OrgId,
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    pub version: u32,
    pub status: ScheduleStatus,
}

impl Schedule {
    pub fn new(org_id: OrgId, range_start: NaiveDate, range_end: NaiveDate) -> Self {
        Self {
            id: ScheduleId::random(),
            org_id,
            range_start,
            range_end,
            version: 1,
            status: ScheduleStatus::Draft,
        }
    }
}

/// Créneau de travail (UTC) avec nombre de postes requis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub org_id: OrgId,
    pub schedule_id: ScheduleId,
    pub role_id: RoleId,
    #[serde(default)]
    pub location_id: Option<LocationId>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub required_staff_count: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Shift {
    /// Crée un shift en validant `end > start` et `required_staff_count >= 1`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        org_id: OrgId,
        schedule_id: ScheduleId,
        role_id: RoleId,
        location_id: Option<LocationId>,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        required_staff_count: u32,
        notes: Option<String>,
    ) -> Result<Self, String> {
        if end_at <= start_at {
            return Err("shift end must be strictly after start".to_string());
        }
        if required_staff_count == 0 {
            return Err("required_staff_count must be >= 1".to_string());
        }
        Ok(Self {
            id: ShiftId::random(),
            org_id,
            schedule_id,
            role_id,
            location_id,
            start_at,
            end_at,
            required_staff_count,
            notes,
        })
    }
}

/// Affectation (shift, employé) — identité composite, au plus une ligne par paire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub shift_id: ShiftId,
    pub employee_id: EmployeeId,
}

/// Indisponibilité concrète (non récurrente) d'un employé, intervalle UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unavailability {
    pub employee_id: EmployeeId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Unavailability {
    pub fn new(
        employee_id: EmployeeId,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        reason: Option<String>,
    ) -> Result<Self, String> {
        if end_at <= start_at {
            return Err("unavailability end must be after start".to_string());
        }
        Ok(Self {
            employee_id,
            start_at,
            end_at,
            reason,
        })
    }
}

/// Préférence hebdomadaire récurrente d'un employé.
///
/// `weekday` : 0 = lundi .. 6 = dimanche. Si `do_not_schedule` est vrai,
/// tout shift chevauchant la fenêtre est interdit, quel que soit `weight`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub weekday: Option<u8>,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub active_start: Option<NaiveDate>,
    #[serde(default)]
    pub active_end: Option<NaiveDate>,
    #[serde(default)]
    pub role_id: Option<RoleId>,
    #[serde(default)]
    pub location_id: Option<LocationId>,
    /// Poids 0..5 ; `None` vaut 0 au scoring.
    #[serde(default)]
    pub weight: Option<u8>,
    #[serde(default)]
    pub do_not_schedule: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Jeu de données complet d'une instance (multi-org).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlanData {
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub roles: Vec<JobRole>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub unavailability: Vec<Unavailability>,
    #[serde(default)]
    pub preferences: Vec<Preference>,
}

impl PlanData {
    pub fn find_schedule<'a>(&'a self, id: &ScheduleId) -> Option<&'a Schedule> {
        self.schedules.iter().find(|s| &s.id == id)
    }
    pub fn find_employee<'a>(&'a self, id: &EmployeeId) -> Option<&'a Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }
    pub fn find_role<'a>(&'a self, id: &RoleId) -> Option<&'a JobRole> {
        self.roles.iter().find(|r| &r.id == id)
    }
    pub fn find_shift<'a>(&'a self, id: &ShiftId) -> Option<&'a Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }

    pub fn employees_of<'a>(&'a self, org: &'a OrgId) -> impl Iterator<Item = &'a Employee> {
        self.employees.iter().filter(move |e| &e.org_id == org)
    }

    pub fn assignments_for_shift<'a>(
        &'a self,
        shift: &'a ShiftId,
    ) -> impl Iterator<Item = &'a Assignment> {
        self.assignments.iter().filter(move |a| &a.shift_id == shift)
    }

    pub fn assignment_exists(&self, shift: &ShiftId, employee: &EmployeeId) -> bool {
        self.assignments
            .iter()
            .any(|a| &a.shift_id == shift && &a.employee_id == employee)
    }
}
