use super::{util::same_month, SchedError, Scheduler};
use crate::model::{Assignment, EmployeeId, ShiftPatternId};
use chrono::NaiveDate;

/// Pose (ou remplace) le shift d'une cellule (employé, date).
pub(super) fn set_assignment(
    scheduler: &mut Scheduler,
    employee: &EmployeeId,
    date: NaiveDate,
    pattern: &ShiftPatternId,
) -> Result<(), SchedError> {
    if scheduler.workspace.find_employee(employee).is_none() {
        return Err(SchedError::UnknownEmployee(employee.to_string()));
    }
    if scheduler.workspace.find_pattern(pattern).is_none() {
        return Err(SchedError::UnknownPattern(pattern.to_string()));
    }

    let schedule = &mut scheduler.workspace.schedule;
    match schedule
        .iter_mut()
        .find(|a| &a.employee_id == employee && a.date == date)
    {
        Some(existing) => existing.shift_pattern_id = pattern.clone(),
        None => schedule.push(Assignment {
            employee_id: employee.clone(),
            date,
            shift_pattern_id: pattern.clone(),
        }),
    }
    Ok(())
}

/// Vide une cellule. Renvoie l'affectation retirée, s'il y en avait une.
pub(super) fn clear_assignment(
    scheduler: &mut Scheduler,
    employee: &EmployeeId,
    date: NaiveDate,
) -> Option<Assignment> {
    let schedule = &mut scheduler.workspace.schedule;
    let pos = schedule
        .iter()
        .position(|a| &a.employee_id == employee && a.date == date)?;
    Some(schedule.remove(pos))
}

/// Remplace les affectations du mois par `generated`, garde les autres mois.
pub(super) fn replace_month(scheduler: &mut Scheduler, month: NaiveDate, generated: Vec<Assignment>) {
    let schedule = &mut scheduler.workspace.schedule;
    schedule.retain(|a| !same_month(a.date, month));
    schedule.extend(generated);
}
