mod assignment;
mod audit;
mod mutate;
mod picker;
mod state;
mod types;
mod util;

pub use picker::{FirstPreference, RandomPicker, ShiftPicker};
pub use types::{GenerateOptions, Issue, IssueKind, Origin, Placement, SchedError};
pub use util::parse_month;
pub(crate) use util::{month_dates, same_month};

use crate::model::{
    Assignment, DayRequirement, Employee, EmployeeId, ShiftPattern, ShiftPatternId, Workspace,
};
use chrono::NaiveDate;

/// Génère le planning du mois de `month` (seuls l'année et le mois comptent).
///
/// Les affectations imposées sortent en premier, puis le remplissage glouton
/// jour par jour. Le shift de chaque employé retenu est tiré au hasard parmi
/// ses préférences : deux appels peuvent donc différer sur ce seul point.
pub fn generate(
    employees: &[Employee],
    shift_patterns: &[ShiftPattern],
    day_requirements: &[DayRequirement],
    month: NaiveDate,
) -> Vec<Assignment> {
    generate_with(
        employees,
        shift_patterns,
        day_requirements,
        month,
        &GenerateOptions::default(),
        &mut RandomPicker::from_entropy(),
    )
}

/// Comme [`generate`], avec options et stratégie de choix du shift explicites.
pub fn generate_with(
    employees: &[Employee],
    shift_patterns: &[ShiftPattern],
    day_requirements: &[DayRequirement],
    month: NaiveDate,
    opts: &GenerateOptions,
    picker: &mut dyn ShiftPicker,
) -> Vec<Assignment> {
    generate_placements(employees, shift_patterns, day_requirements, month, opts, picker)
        .into_iter()
        .map(|p| p.assignment)
        .collect()
}

/// Résultat complet, provenance (imposée / gloutonne) comprise.
///
/// Le catalogue de shifts n'est pas consulté : les ids sont repris tels quels.
pub fn generate_placements(
    employees: &[Employee],
    _shift_patterns: &[ShiftPattern],
    day_requirements: &[DayRequirement],
    month: NaiveDate,
    opts: &GenerateOptions,
    picker: &mut dyn ShiftPicker,
) -> Vec<Placement> {
    assignment::generate_placements(employees, day_requirements, month, opts, picker)
}

/// Scheduler : encapsule un Workspace (roster, shifts, exigences, planning)
#[derive(Debug, Default)]
pub struct Scheduler {
    workspace: Workspace,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            workspace: Workspace::default(),
        }
    }

    pub fn with_workspace(workspace: Workspace) -> Self {
        Self { workspace }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }
    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }
    pub fn into_workspace(self) -> Workspace {
        self.workspace
    }

    pub fn add_employees(&mut self, employees: Vec<Employee>) {
        self.workspace.employees.extend(employees);
    }

    pub fn add_patterns(&mut self, patterns: Vec<ShiftPattern>) {
        self.workspace.shift_patterns.extend(patterns);
    }

    pub fn set_requirement(&mut self, requirement: DayRequirement) {
        self.workspace.upsert_requirement(requirement);
    }

    /// Régénère le mois et remplace ses cellules dans le planning courant.
    /// Renvoie le nombre d'affectations produites.
    pub fn generate_month(
        &mut self,
        month: NaiveDate,
        opts: &GenerateOptions,
        picker: &mut dyn ShiftPicker,
    ) -> usize {
        let generated = generate_with(
            &self.workspace.employees,
            &self.workspace.shift_patterns,
            &self.workspace.day_requirements,
            month,
            opts,
            picker,
        );
        let n = generated.len();
        mutate::replace_month(self, month, generated);
        n
    }

    pub fn set_assignment(
        &mut self,
        employee: &EmployeeId,
        date: NaiveDate,
        pattern: &ShiftPatternId,
    ) -> Result<(), SchedError> {
        mutate::set_assignment(self, employee, date, pattern)
    }

    pub fn clear_assignment(&mut self, employee: &EmployeeId, date: NaiveDate) -> Option<Assignment> {
        mutate::clear_assignment(self, employee, date)
    }

    /// Cellules du mois, triées par date puis par ordre du roster.
    pub fn assignments_for_month(&self, month: NaiveDate) -> Vec<&Assignment> {
        let rank = |id: &EmployeeId| {
            self.workspace
                .employees
                .iter()
                .position(|e| &e.id == id)
                .unwrap_or(usize::MAX)
        };
        let mut out: Vec<&Assignment> = self
            .workspace
            .schedule
            .iter()
            .filter(|a| same_month(a.date, month))
            .collect();
        out.sort_by_key(|a| (a.date, rank(&a.employee_id)));
        out
    }

    pub fn audit(&self, month: NaiveDate, opts: &GenerateOptions) -> Vec<Issue> {
        audit::audit(&self.workspace, month, opts)
    }
}
