#![forbid(unsafe_code)]
//! Shiftplan — génération de plannings mensuels d'équipe (sans BD).
//!
//! - Stockage fichiers (JSON/CSV).
//! - Remplissage glouton jour par jour, équité par jours travaillés.
//! - Congés, plafond mensuel, 5 jours consécutifs au plus.
//! - Affectations imposées prioritaires, jamais filtrées.

pub mod io;
pub mod model;
pub mod scheduler;
pub mod storage;

pub use model::{
    Assignment, DayRequirement, Employee, EmployeeId, EmployeeStatus, ShiftPattern,
    ShiftPatternId, SpecificAssignment, Workspace,
};
pub use scheduler::{
    generate, generate_placements, generate_with, parse_month, FirstPreference, GenerateOptions,
    Issue, IssueKind, Origin, Placement, RandomPicker, SchedError, Scheduler, ShiftPicker,
};
pub use storage::{JsonStorage, Storage};
