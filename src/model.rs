use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Plafond mensuel appliqué quand aucun n'est précisé.
pub const DEFAULT_MAX_SHIFTS_PER_MONTH: u32 = 22;
/// Effectif requis pour un jour sans exigence enregistrée.
pub const DEFAULT_REQUIRED_STAFF: u32 = 3;
/// Nombre maximal de shifts préférés par employé.
pub const MAX_PREFERRED_SHIFTS: usize = 3;

/// Identifiant fort pour Employee
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour ShiftPattern
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftPatternId(String);

impl ShiftPatternId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ShiftPatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Statut contractuel. N'intervient pas dans la génération.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Leave,
    Maternity,
    TemporaryTransfer,
    Resigned,
}

impl std::str::FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "active" => Ok(Self::Active),
            "leave" => Ok(Self::Leave),
            "maternity" => Ok(Self::Maternity),
            "temporary_transfer" => Ok(Self::TemporaryTransfer),
            "resigned" => Ok(Self::Resigned),
            other => Err(format!("unknown employee status: {other}")),
        }
    }
}

fn default_max_shifts() -> u32 {
    DEFAULT_MAX_SHIFTS_PER_MONTH
}

/// Employé planifiable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub last_name: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub employee_number: String,
    #[serde(default)]
    pub status: EmployeeStatus,
    /// Shifts préférés, par ordre de préférence.
    #[serde(default)]
    pub preferred_shifts: Vec<ShiftPatternId>,
    /// Jours de congé demandés.
    #[serde(default)]
    pub days_off: Vec<NaiveDate>,
    #[serde(default = "default_max_shifts")]
    pub max_shifts_per_month: u32,
}

impl Employee {
    pub fn new<L: Into<String>, F: Into<String>>(last_name: L, first_name: F) -> Self {
        Self {
            id: EmployeeId::random(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            employee_number: String::new(),
            status: EmployeeStatus::Active,
            preferred_shifts: Vec::new(),
            days_off: Vec::new(),
            max_shifts_per_month: DEFAULT_MAX_SHIFTS_PER_MONTH,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    pub fn is_off(&self, date: NaiveDate) -> bool {
        self.days_off.contains(&date)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("employee id cannot be empty".to_string());
        }
        if self.preferred_shifts.len() > MAX_PREFERRED_SHIFTS {
            return Err(format!(
                "employee {} has {} preferred shifts (max {MAX_PREFERRED_SHIFTS})",
                self.id,
                self.preferred_shifts.len()
            ));
        }
        Ok(())
    }
}

/// Créneau horaire réutilisable (ex. « early: 09:00–17:00 »)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPattern {
    pub id: ShiftPatternId,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ShiftPattern {
    pub fn new<I: AsRef<str>, N: Into<String>>(
        id: I,
        name: N,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: ShiftPatternId::new(id),
            name: name.into(),
            start_time,
            end_time,
        }
    }
}

/// Affectation imposée pour une date. Un champ vide rend l'entrée inerte.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificAssignment {
    #[serde(default)]
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub shift_pattern_id: ShiftPatternId,
}

impl SpecificAssignment {
    pub fn new(employee_id: EmployeeId, shift_pattern_id: ShiftPatternId) -> Self {
        Self { employee_id, shift_pattern_id }
    }

    pub fn is_complete(&self) -> bool {
        !self.employee_id.is_empty() && !self.shift_pattern_id.is_empty()
    }
}

fn default_required_staff() -> u32 {
    DEFAULT_REQUIRED_STAFF
}

/// Exigence d'effectif pour une date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRequirement {
    pub date: NaiveDate,
    #[serde(default = "default_required_staff")]
    pub required_staff: u32,
    #[serde(default)]
    pub specific_assignments: Vec<SpecificAssignment>,
}

impl DayRequirement {
    pub fn new(date: NaiveDate, required_staff: u32) -> Self {
        Self {
            date,
            required_staff,
            specific_assignments: Vec::new(),
        }
    }

    pub fn with_assignment(mut self, employee_id: EmployeeId, shift_pattern_id: ShiftPatternId) -> Self {
        self.specific_assignments
            .push(SpecificAssignment::new(employee_id, shift_pattern_id));
        self
    }
}

/// Cellule du planning : un employé, une date, un shift.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub shift_pattern_id: ShiftPatternId,
}

/// État complet persisté (employés, shifts, exigences, planning)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub shift_patterns: Vec<ShiftPattern>,
    #[serde(default)]
    pub day_requirements: Vec<DayRequirement>,
    #[serde(default)]
    pub schedule: Vec<Assignment>,
}

impl Workspace {
    pub fn find_employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }
    pub fn find_employee_by_number(&self, number: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.employee_number == number)
    }
    pub fn find_pattern(&self, id: &ShiftPatternId) -> Option<&ShiftPattern> {
        self.shift_patterns.iter().find(|p| &p.id == id)
    }
    pub fn find_requirement(&self, date: NaiveDate) -> Option<&DayRequirement> {
        self.day_requirements.iter().find(|r| r.date == date)
    }

    /// Remplace (ou ajoute) l'exigence d'une date.
    pub fn upsert_requirement(&mut self, requirement: DayRequirement) {
        match self
            .day_requirements
            .iter_mut()
            .find(|r| r.date == requirement.date)
        {
            Some(existing) => *existing = requirement,
            None => self.day_requirements.push(requirement),
        }
    }

    /// Résout un employé par id ou par matricule.
    pub fn resolve_employee(&self, key: &str) -> Option<&Employee> {
        self.find_employee(&EmployeeId::new(key))
            .or_else(|| self.find_employee_by_number(key))
    }
}
