use crate::model::{Assignment, EmployeeId, ShiftPatternId, DEFAULT_REQUIRED_STAFF};
use chrono::NaiveDate;
use thiserror::Error;

/// Options de génération
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Effectif visé pour les dates sans exigence.
    pub default_required_staff: u32,
    /// Au-delà, le remplissage refuse de prolonger une série de jours travaillés.
    pub max_consecutive_days: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            default_required_staff: DEFAULT_REQUIRED_STAFF,
            max_consecutive_days: 5,
        }
    }
}

/// Provenance d'une affectation générée
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Issue d'une affectation imposée (jamais filtrée).
    Fixed,
    /// Choisie par le remplissage glouton.
    Greedy,
}

/// Affectation avec sa provenance, avant effacement du marqueur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub assignment: Assignment,
    pub origin: Origin,
}

impl Placement {
    pub fn is_fixed(&self) -> bool {
        self.origin == Origin::Fixed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    Understaffed { assigned: u32, required: u32 },
    DayOffViolation,
    OverCap { worked: u32, cap: u32 },
    LongStreak { days: u32 },
    UnknownEmployee,
    UnknownPattern(ShiftPatternId),
}

/// Anomalie signalée au calendrier (le planning reste valide).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub date: NaiveDate,
    pub employee: Option<EmployeeId>,
    pub kind: IssueKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid month: {0} (expected YYYY-MM)")]
    InvalidMonth(String),
    #[error("unknown employee: {0}")]
    UnknownEmployee(String),
    #[error("unknown shift pattern: {0}")]
    UnknownPattern(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
