use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{EmployeeId, ScheduleId, ShiftId};

/// Politique d'auto-assignation.
///
/// `FillMissing` ne touche que les postes vacants ; `ReassignAll` purge
/// d'abord toutes les affectations des shifts concernés.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignPolicy {
    FillMissing,
    ReassignAll,
}

impl Default for AssignPolicy {
    fn default() -> Self {
        Self::FillMissing
    }
}

impl std::fmt::Display for AssignPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FillMissing => f.write_str("fill_missing"),
            Self::ReassignAll => f.write_str("reassign_all"),
        }
    }
}

/// Requête d'auto-assignation sur une fenêtre de dates (incluses).
#[derive(Debug, Clone)]
pub struct AssignRequest {
    pub schedule_id: ScheduleId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub policy: AssignPolicy,
    /// Calcule le plan sans rien écrire (prévisualisation).
    pub dry_run: bool,
}

impl AssignRequest {
    pub fn new(schedule_id: ScheduleId, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            schedule_id,
            start_date,
            end_date,
            policy: AssignPolicy::default(),
            dry_run: false,
        }
    }

    pub fn policy(mut self, policy: AssignPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Bilan d'une passe d'auto-assignation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignReport {
    pub assigned: u32,
    pub skipped_full: u32,
    pub skipped_no_candidates: u32,
    pub policy: AssignPolicy,
}

impl AssignReport {
    pub(crate) fn new(policy: AssignPolicy) -> Self {
        Self {
            assigned: 0,
            skipped_full: 0,
            skipped_no_candidates: 0,
            policy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Overlap,
}

/// Double-booking détecté entre deux affectations d'un même employé.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub employee: EmployeeId,
    pub shift_a: ShiftId,
    pub shift_b: ShiftId,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("invalid time range: end must be after start")]
    InvalidTimeRange,
    #[error("schedule not found: {0}")]
    ScheduleNotFound(String),
    #[error("unknown employee: {0}")]
    UnknownEmployee(String),
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("assignment already exists for shift {shift} and employee {employee}")]
    DuplicateAssignment { shift: String, employee: String },
    #[error("assign invalid: {0}")]
    AssignInvalid(&'static str),
    #[error("no assignment for shift {shift} and employee {employee}")]
    AssignmentNotFound { shift: String, employee: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
