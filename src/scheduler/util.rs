use super::SchedError;
use chrono::{Datelike, NaiveDate};

/// Tous les jours du mois de `month`, dans l'ordre.
pub(crate) fn month_dates(month: NaiveDate) -> Vec<NaiveDate> {
    let Some(first) = month.with_day(1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .collect()
}

pub(crate) fn same_month(date: NaiveDate, month: NaiveDate) -> bool {
    date.year() == month.year() && date.month() == month.month()
}

/// Écart signé en jours calendaires (`to - from`).
pub(super) fn day_gap(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Parse `YYYY-MM` (ou une date complète) vers le premier jour du mois.
pub fn parse_month(raw: &str) -> Result<NaiveDate, SchedError> {
    let raw = raw.trim();
    let parsed = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map_err(|_| SchedError::InvalidMonth(raw.to_string()))?;
    parsed
        .with_day(1)
        .ok_or_else(|| SchedError::InvalidMonth(raw.to_string()))
}
