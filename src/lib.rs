#![forbid(unsafe_code)]
//! Planif — bibliothèque d'auto-assignation d'employés sur des shifts, locale (sans BD).
//!
//! - Stockage fichiers (JSON/CSV).
//! - Moteur glouton déterministe : contraintes dures (indisponibilités,
//!   plafonds hebdomadaires par rôle, double-booking) puis préférences pondérées.
//! - Politiques `fill_missing` / `reassign_all`, prévisualisation `dry_run`.
//! - Tout en UTC ; parsing RFC3339 ; affichage local en dehors de la lib.

pub mod engine;
pub mod io;
pub mod model;
pub mod storage;

pub use engine::{
    AssignPolicy, AssignReport, AssignRequest, Conflict, ConflictKind, PlanError, Planner,
    PrefScore,
};
pub use model::{
    Assignment, Employee, EmployeeId, JobRole, Location, LocationId, OrgId, PlanData, Preference,
    RoleId, Schedule, ScheduleId, ScheduleStatus, Shift, ShiftId, Unavailability,
};
pub use storage::{JsonStorage, Storage};
