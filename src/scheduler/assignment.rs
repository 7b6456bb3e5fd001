use super::{
    state::Ledger,
    util::{month_dates, same_month},
    GenerateOptions, Origin, Placement, ShiftPicker,
};
use crate::model::{Assignment, DayRequirement, Employee, EmployeeId};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub(super) fn generate_placements(
    employees: &[Employee],
    day_requirements: &[DayRequirement],
    month: NaiveDate,
    opts: &GenerateOptions,
    picker: &mut dyn ShiftPicker,
) -> Vec<Placement> {
    let dates = month_dates(month);
    let mut placements = seed_fixed(employees, day_requirements, month);
    let fixed_count = placements.len();

    let mut ledger = Ledger::new(employees);
    ledger.seed_fixed(&placements);

    let mut underfilled = 0usize;
    for date in dates {
        let required = day_requirements
            .iter()
            .find(|r| r.date == date)
            .map_or(opts.default_required_staff, |r| r.required_staff);

        let today: Vec<&EmployeeId> = placements
            .iter()
            .filter(|p| p.assignment.date == date)
            .map(|p| &p.assignment.employee_id)
            .collect();
        // les doublons imposés comptent chacun pour une place
        let remaining = (required as usize).saturating_sub(today.len());
        let assigned: HashSet<&EmployeeId> = today.iter().copied().collect();
        if remaining == 0 {
            continue;
        }

        // ordre du roster conservé : le tri par jours travaillés est stable
        let mut pool: Vec<&Employee> = employees
            .iter()
            .filter(|e| {
                if assigned.contains(&e.id) {
                    return false;
                }
                if ledger.work_days(&e.id) >= e.max_shifts_per_month {
                    return false;
                }
                if e.is_off(date) || e.preferred_shifts.is_empty() {
                    return false;
                }
                ledger
                    .get_mut(&e.id)
                    .map_or(true, |st| st.streak_allows(date, opts.max_consecutive_days))
            })
            .collect();
        pool.sort_by_key(|e| ledger.work_days(&e.id));

        debug!(%date, required, already = today.len(), pool = pool.len(), "filling day");
        if pool.len() < remaining {
            underfilled += 1;
        }

        let mut picked = Vec::with_capacity(remaining.min(pool.len()));
        for employee in pool.into_iter().take(remaining) {
            let prefs = &employee.preferred_shifts;
            let Some(shift) = picker.pick(prefs).or_else(|| prefs.first()) else {
                continue;
            };
            if let Some(state) = ledger.get_mut(&employee.id) {
                state.record(date);
            }
            picked.push(Placement {
                assignment: Assignment {
                    employee_id: employee.id.clone(),
                    date,
                    shift_pattern_id: shift.clone(),
                },
                origin: Origin::Greedy,
            });
        }
        placements.extend(picked);
    }

    info!(
        month = %month.format("%Y-%m"),
        fixed = fixed_count,
        greedy = placements.len() - fixed_count,
        underfilled,
        "schedule generated"
    );
    placements
}

/// Affectations imposées du mois, dans l'ordre exigence puis sous-affectation.
fn seed_fixed(
    employees: &[Employee],
    day_requirements: &[DayRequirement],
    month: NaiveDate,
) -> Vec<Placement> {
    let mut out = Vec::new();
    for req in day_requirements.iter().filter(|r| same_month(r.date, month)) {
        for specific in req.specific_assignments.iter().filter(|s| s.is_complete()) {
            if !employees.iter().any(|e| e.id == specific.employee_id) {
                warn!(
                    employee = %specific.employee_id,
                    date = %req.date,
                    "fixed assignment references an employee outside the roster"
                );
            }
            out.push(Placement {
                assignment: Assignment {
                    employee_id: specific.employee_id.clone(),
                    date: req.date,
                    shift_pattern_id: specific.shift_pattern_id.clone(),
                },
                origin: Origin::Fixed,
            });
        }
    }
    out
}
