use crate::model::{
    DayRequirement, Employee, EmployeeId, ShiftPattern, ShiftPatternId, SpecificAssignment,
    Workspace, DEFAULT_MAX_SHIFTS_PER_MONTH, DEFAULT_REQUIRED_STAFF,
};
use crate::scheduler::{month_dates, same_month};
use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate, NaiveTime};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import d'employés depuis CSV, header
/// `id,last_name,first_name,employee_number,status,preferred_shifts,days_off,max_shifts`.
/// Les listes sont séparées par `;`. Un id vide en génère un.
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let last = field(&rec, 1).context("missing last_name")?;
        let first = field(&rec, 2).context("missing first_name")?;
        if last.is_empty() && first.is_empty() {
            bail!("invalid employee row (empty name)");
        }
        let mut employee = Employee::new(last, first);
        if let Some(id) = field(&rec, 0).filter(|s| !s.is_empty()) {
            employee.id = EmployeeId::new(id);
        }
        let who = employee.display_name();
        employee.employee_number = field(&rec, 3).unwrap_or_default().to_string();
        if let Some(status) = field(&rec, 4) {
            employee.status = status
                .parse()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid status for {who}"))?;
        }
        employee.preferred_shifts = split_list(field(&rec, 5).unwrap_or_default())
            .map(ShiftPatternId::new)
            .collect();
        employee.days_off = split_list(field(&rec, 6).unwrap_or_default())
            .map(parse_date)
            .collect::<anyhow::Result<_>>()
            .with_context(|| format!("invalid days_off for {who}"))?;
        employee.max_shifts_per_month = match field(&rec, 7).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid max_shifts for {who}"))?,
            None => DEFAULT_MAX_SHIFTS_PER_MONTH,
        };
        employee.validate().map_err(anyhow::Error::msg)?;
        out.push(employee);
    }
    Ok(out)
}

/// Import de shifts, header `id,name,start_time,end_time` (`HH:MM`).
pub fn import_patterns_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ShiftPattern>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = field(&rec, 0).context("missing id")?;
        let name = field(&rec, 1).context("missing name")?;
        if id.is_empty() || name.is_empty() {
            bail!("invalid shift pattern row (empty)");
        }
        let start = parse_time(field(&rec, 2).context("missing start_time")?)?;
        let end = parse_time(field(&rec, 3).context("missing end_time")?)?;
        out.push(ShiftPattern::new(id, name, start, end));
    }
    Ok(out)
}

/// Import d'exigences, header `date,required_staff,specific_assignments`
/// avec `employe:shift;employe:shift` pour les affectations imposées.
pub fn import_requirements_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<DayRequirement>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let date = parse_date(field(&rec, 0).context("missing date")?)?;
        let required_staff = match field(&rec, 1).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid required_staff for {date}"))?,
            None => DEFAULT_REQUIRED_STAFF,
        };
        let mut req = DayRequirement::new(date, required_staff);
        req.specific_assignments = parse_specific(field(&rec, 2).unwrap_or_default())
            .with_context(|| format!("invalid specific_assignments for {date}"))?;
        out.push(req);
    }
    Ok(out)
}

/// Paires `employe:shift` séparées par `;`.
pub fn parse_specific(raw: &str) -> anyhow::Result<Vec<SpecificAssignment>> {
    split_list(raw)
        .map(|pair| -> anyhow::Result<SpecificAssignment> {
            let (emp, pattern) = pair
                .split_once(':')
                .with_context(|| format!("expected employee:pattern, got {pair}"))?;
            Ok(SpecificAssignment::new(
                EmployeeId::new(emp.trim()),
                ShiftPatternId::new(pattern.trim()),
            ))
        })
        .collect()
}

fn field(rec: &StringRecord, idx: usize) -> Option<&str> {
    rec.get(idx).map(str::trim)
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(';').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

fn parse_time(raw: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .with_context(|| format!("invalid time: {raw}"))
}

/// Export JSON du workspace (jolie mise en forme)
pub fn export_workspace_json<P: AsRef<Path>>(path: P, ws: &Workspace) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(ws)?;
    fs::write(path, s)?;
    Ok(())
}

/// Matrice du mois : une ligne par employé, une colonne par jour,
/// cellule = nom du shift (vide si absent ou inconnu).
pub fn render_schedule_csv(ws: &Workspace, month: NaiveDate) -> anyhow::Result<String> {
    let dates = month_dates(month);
    let mut w = WriterBuilder::new().has_headers(false).from_writer(Vec::new());

    let mut header = Vec::with_capacity(dates.len() + 1);
    header.push("name".to_string());
    let mut m = itoa::Buffer::new();
    let mut d = itoa::Buffer::new();
    for date in &dates {
        header.push(format!("{}/{}", m.format(date.month()), d.format(date.day())));
    }
    w.write_record(&header)?;

    let cells: Vec<_> = ws
        .schedule
        .iter()
        .filter(|a| same_month(a.date, month))
        .collect();
    for employee in &ws.employees {
        let mut row = Vec::with_capacity(dates.len() + 1);
        row.push(employee.display_name());
        for date in &dates {
            let name = cells
                .iter()
                .find(|a| a.employee_id == employee.id && a.date == *date)
                .and_then(|a| ws.find_pattern(&a.shift_pattern_id))
                .map(|p| p.name.clone())
                .unwrap_or_default();
            row.push(name);
        }
        w.write_record(&row)?;
    }

    let bytes = w
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing csv buffer: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Export CSV de la matrice du mois
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    ws: &Workspace,
    month: NaiveDate,
) -> anyhow::Result<()> {
    let csv = render_schedule_csv(ws, month)?;
    fs::write(path, csv)?;
    Ok(())
}
