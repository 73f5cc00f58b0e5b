use crate::model::{
    Employee, EmployeeId, LocationId, OrgId, PlanData, Preference, RoleId, ScheduleId, Shift,
    Unavailability,
};
use anyhow::{bail, Context};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import d'employés depuis CSV : header `display_name[,id]`.
pub fn import_employees_csv<P: AsRef<Path>>(path: P, org: &OrgId) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let display = rec.get(0).context("missing display_name")?.trim();
        if display.is_empty() {
            bail!("invalid employee row (empty display_name)");
        }
        let mut employee = Employee::new(org.clone(), display.to_string());
        if let Some(id) = rec.get(1) {
            let id = id.trim();
            if !id.is_empty() {
                employee.id = EmployeeId::new(id);
            }
        }
        out.push(employee);
    }
    Ok(out)
}

/// Import de shifts : header
/// `schedule_id,role_id,start,end,required_staff_count[,location_id][,notes]`.
///
/// `start`/`end` acceptent un instant RFC3339 ou une date `YYYY-MM-DD`
/// (minuit UTC ; une date en fin d'intervalle est exclusive, lendemain).
pub fn import_shifts_csv<P: AsRef<Path>>(path: P, data: &PlanData) -> anyhow::Result<Vec<Shift>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let schedule_id = ScheduleId::new(rec.get(0).context("missing schedule_id")?.trim());
        let role_id = RoleId::new(rec.get(1).context("missing role_id")?.trim());
        let (start, _) = parse_point(rec.get(2).context("missing start")?.trim())?;
        let (mut end, end_was_date) = parse_point(rec.get(3).context("missing end")?.trim())?;
        if end_was_date {
            end += Duration::days(1);
        }
        let seats: u32 = rec
            .get(4)
            .context("missing required_staff_count")?
            .trim()
            .parse()
            .context("required_staff_count must be an integer")?;

        let schedule = data
            .find_schedule(&schedule_id)
            .with_context(|| format!("unknown schedule: {}", schedule_id.as_str()))?;
        if data.find_role(&role_id).is_none() {
            bail!("unknown role: {}", role_id.as_str());
        }

        let location_id = rec
            .get(5)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(LocationId::new);
        let notes = rec
            .get(6)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let shift = Shift::new(
            schedule.org_id.clone(),
            schedule_id,
            role_id,
            location_id,
            start,
            end,
            seats,
            notes,
        )
        .map_err(anyhow::Error::msg)?;
        out.push(shift);
    }
    Ok(out)
}

/// Import d'indisponibilités : header `employee_id,start,end[,reason]`.
pub fn import_unavailability_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Unavailability>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let employee_id = EmployeeId::new(rec.get(0).context("missing employee_id")?.trim());
        let (start, _) = parse_point(rec.get(1).context("missing start")?.trim())?;
        let (mut end, end_was_date) = parse_point(rec.get(2).context("missing end")?.trim())?;
        if end_was_date {
            end += Duration::days(1);
        }
        let reason = rec
            .get(3)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let u = Unavailability::new(employee_id, start, end, reason).map_err(anyhow::Error::msg)?;
        out.push(u);
    }
    Ok(out)
}

/// Import de préférences : header
/// `employee_id,weekday,start_time,end_time,weight,do_not_schedule[,active_start][,active_end]`.
///
/// `weekday` : 0 = lundi .. 6 = dimanche. Les colonnes vides restent `None`.
pub fn import_preferences_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Preference>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let employee_id = EmployeeId::new(rec.get(0).context("missing employee_id")?.trim());

        let weekday = opt_field(&rec, 1)
            .map(|s| s.parse::<u8>().context("invalid weekday"))
            .transpose()?;
        if let Some(d) = weekday {
            if d > 6 {
                bail!("weekday out of range (0=Monday..6=Sunday): {d}");
            }
        }
        let start_time = opt_field(&rec, 2).map(parse_time).transpose()?;
        let end_time = opt_field(&rec, 3).map(parse_time).transpose()?;
        let weight = opt_field(&rec, 4)
            .map(|s| s.parse::<u8>().context("invalid weight"))
            .transpose()?;
        if let Some(w) = weight {
            if w > 5 {
                bail!("weight out of range (0..5): {w}");
            }
        }
        let do_not_schedule = match opt_field(&rec, 5) {
            Some(flag) => parse_bool(flag)
                .with_context(|| format!("invalid do_not_schedule for {}", employee_id.as_str()))?,
            None => false,
        };
        let active_start = opt_field(&rec, 6).map(parse_date).transpose()?;
        let active_end = opt_field(&rec, 7).map(parse_date).transpose()?;

        out.push(Preference {
            employee_id,
            weekday,
            start_time,
            end_time,
            active_start,
            active_end,
            role_id: None,
            location_id: None,
            weight,
            do_not_schedule,
            notes: None,
        });
    }
    Ok(out)
}

fn opt_field<'a>(rec: &'a csv::StringRecord, idx: usize) -> Option<&'a str> {
    rec.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

fn parse_time(raw: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .with_context(|| format!("invalid time: {raw}"))
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

/// Point temporel : RFC3339, sinon date `YYYY-MM-DD` à minuit UTC.
/// Le booléen indique qu'une date nue a été lue (fin d'intervalle exclusive).
fn parse_point(raw: &str) -> anyhow::Result<(DateTime<Utc>, bool)> {
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return Ok((dt, false));
    }
    let date = parse_date(raw)?;
    let datetime = date
        .and_hms_opt(0, 0, 0)
        .context("invalid midnight conversion")?;
    Ok((Utc.from_utc_datetime(&datetime), true))
}

/// Export JSON du jeu de données (jolie mise en forme).
pub fn export_data_json<P: AsRef<Path>>(path: P, data: &PlanData) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(data)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des affectations :
/// header `shift_id,employee_id,display_name,role,start,end`.
pub fn export_assignments_csv<P: AsRef<Path>>(path: P, data: &PlanData) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["shift_id", "employee_id", "display_name", "role", "start", "end"])?;
    for a in &data.assignments {
        let shift = data.find_shift(&a.shift_id);
        let display = data
            .find_employee(&a.employee_id)
            .map(|e| e.display_name.as_str())
            .unwrap_or("");
        let role = shift
            .and_then(|s| data.find_role(&s.role_id))
            .map(|r| r.name.as_str())
            .unwrap_or("");
        let start = shift.map(|s| s.start_at.to_rfc3339()).unwrap_or_default();
        let end = shift.map(|s| s.end_at.to_rfc3339()).unwrap_or_default();
        w.write_record([
            a.shift_id.as_str(),
            a.employee_id.as_str(),
            display,
            role,
            start.as_str(),
            end.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
