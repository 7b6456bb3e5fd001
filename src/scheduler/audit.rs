use super::{
    util::{day_gap, month_dates, same_month},
    GenerateOptions, Issue, IssueKind,
};
use crate::model::{Assignment, EmployeeId, Workspace};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub(super) fn audit(ws: &Workspace, month: NaiveDate, opts: &GenerateOptions) -> Vec<Issue> {
    let mut out = Vec::new();
    let in_month: Vec<&Assignment> = ws
        .schedule
        .iter()
        .filter(|a| same_month(a.date, month))
        .collect();

    for date in month_dates(month) {
        let required = ws
            .find_requirement(date)
            .map_or(opts.default_required_staff, |r| r.required_staff);
        let assigned = in_month.iter().filter(|a| a.date == date).count() as u32;
        if assigned < required {
            out.push(Issue {
                date,
                employee: None,
                kind: IssueKind::Understaffed { assigned, required },
            });
        }
    }

    let mut per_employee: BTreeMap<&EmployeeId, Vec<NaiveDate>> = BTreeMap::new();
    for a in &in_month {
        if ws.find_pattern(&a.shift_pattern_id).is_none() {
            out.push(Issue {
                date: a.date,
                employee: Some(a.employee_id.clone()),
                kind: IssueKind::UnknownPattern(a.shift_pattern_id.clone()),
            });
        }
        match ws.find_employee(&a.employee_id) {
            None => out.push(Issue {
                date: a.date,
                employee: Some(a.employee_id.clone()),
                kind: IssueKind::UnknownEmployee,
            }),
            Some(e) => {
                if e.is_off(a.date) {
                    out.push(Issue {
                        date: a.date,
                        employee: Some(e.id.clone()),
                        kind: IssueKind::DayOffViolation,
                    });
                }
                per_employee.entry(&e.id).or_default().push(a.date);
            }
        }
    }

    for (id, mut dates) in per_employee {
        dates.sort();
        dates.dedup();
        let cap = ws
            .find_employee(id)
            .map_or(u32::MAX, |e| e.max_shifts_per_month);
        if dates.len() as u32 > cap {
            out.push(Issue {
                date: dates[cap as usize],
                employee: Some(id.clone()),
                kind: IssueKind::OverCap {
                    worked: dates.len() as u32,
                    cap,
                },
            });
        }

        let mut run = 0u32;
        let mut prev: Option<NaiveDate> = None;
        for &date in &dates {
            run = match prev {
                Some(p) if day_gap(p, date) == 1 => run + 1,
                _ => 1,
            };
            if run == opts.max_consecutive_days.saturating_add(1) {
                out.push(Issue {
                    date,
                    employee: Some(id.clone()),
                    kind: IssueKind::LongStreak { days: run },
                });
            }
            prev = Some(date);
        }
    }

    out.sort_by_key(|i| i.date);
    out
}
