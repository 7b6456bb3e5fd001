use super::{util::day_gap, Placement};
use crate::model::{Employee, EmployeeId};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Compteurs d'un employé, propres à une génération.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct EmployeeState {
    pub work_days: u32,
    pub consecutive_days: u32,
    pub last_work_date: Option<NaiveDate>,
}

impl EmployeeState {
    /// Construit l'état de départ à partir des dates imposées, dans l'ordre
    /// d'insertion. La série se mesure sur les dates triées, mais le dernier
    /// jour travaillé reste celui de la dernière affectation insérée.
    fn from_fixed_dates(dates: &[NaiveDate]) -> Self {
        let mut sorted = dates.to_vec();
        sorted.sort();
        let mut run = 0u32;
        let mut prev: Option<NaiveDate> = None;
        for date in sorted {
            run = match prev {
                Some(p) if day_gap(p, date) == 1 => run + 1,
                _ => 1,
            };
            prev = Some(date);
        }
        Self {
            work_days: dates.len() as u32,
            consecutive_days: run,
            last_work_date: dates.last().copied(),
        }
    }

    /// Règle de consécutivité : seule la veille est regardée.
    /// Un écart différent d'un jour remet la série stockée à zéro.
    pub fn streak_allows(&mut self, date: NaiveDate, max_consecutive: u32) -> bool {
        let Some(last) = self.last_work_date else {
            return true;
        };
        if day_gap(last, date) == 1 {
            return self.consecutive_days < max_consecutive;
        }
        self.consecutive_days = 0;
        true
    }

    pub fn record(&mut self, date: NaiveDate) {
        self.work_days += 1;
        self.consecutive_days = match self.last_work_date {
            Some(last) if day_gap(last, date) == 1 => self.consecutive_days + 1,
            _ => 1,
        };
        self.last_work_date = Some(date);
    }
}

/// États de tous les employés du roster pour une génération.
#[derive(Debug, Default)]
pub(super) struct Ledger<'a> {
    states: HashMap<&'a EmployeeId, EmployeeState>,
}

impl<'a> Ledger<'a> {
    pub fn new(employees: &'a [Employee]) -> Self {
        Self {
            states: employees
                .iter()
                .map(|e| (&e.id, EmployeeState::default()))
                .collect(),
        }
    }

    /// Intègre les affectations imposées; les ids hors roster sont ignorés.
    pub fn seed_fixed(&mut self, placements: &[Placement]) {
        let mut dates: HashMap<&EmployeeId, Vec<NaiveDate>> = HashMap::new();
        for p in placements.iter().filter(|p| p.is_fixed()) {
            dates
                .entry(&p.assignment.employee_id)
                .or_default()
                .push(p.assignment.date);
        }
        for (id, state) in self.states.iter_mut() {
            if let Some(list) = dates.get(*id) {
                *state = EmployeeState::from_fixed_dates(list);
            }
        }
    }

    pub fn work_days(&self, id: &EmployeeId) -> u32 {
        self.states.get(id).map_or(0, |s| s.work_days)
    }

    pub fn get_mut(&mut self, id: &EmployeeId) -> Option<&mut EmployeeState> {
        self.states.get_mut(id)
    }

    #[cfg(test)]
    pub fn get(&self, id: &EmployeeId) -> Option<&EmployeeState> {
        self.states.get(id)
    }
}
