#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use planif::{
    io,
    engine::{AssignPolicy, AssignRequest, ConflictKind, Planner},
    model::{EmployeeId, OrgId, ScheduleId, ShiftId},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planification de shifts (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du jeu de données
    #[arg(long, global = true, default_value = "plan.json")]
    data: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un planning (imprime son id)
    CreateSchedule {
        #[arg(long)]
        org: String,
        /// YYYY-MM-DD
        #[arg(long)]
        from: String,
        /// YYYY-MM-DD
        #[arg(long)]
        to: String,
    },

    /// Créer un rôle métier (imprime son id)
    AddRole {
        #[arg(long)]
        org: String,
        #[arg(long)]
        name: String,
        /// Plafond hebdomadaire d'heures (optionnel)
        #[arg(long)]
        weekly_hours_cap: Option<u32>,
    },

    /// Importer des employés depuis un CSV
    ImportEmployees {
        #[arg(long)]
        csv: String,
        #[arg(long)]
        org: String,
    },

    /// Importer des shifts depuis un CSV
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Importer des indisponibilités depuis un CSV
    ImportUnavailability {
        #[arg(long)]
        csv: String,
    },

    /// Importer des préférences depuis un CSV
    ImportPreferences {
        #[arg(long)]
        csv: String,
    },

    /// Auto-assigner les postes vacants d'un planning
    AutoAssign {
        #[arg(long)]
        schedule: String,
        /// YYYY-MM-DD
        #[arg(long)]
        from: String,
        /// YYYY-MM-DD
        #[arg(long)]
        to: String,
        /// "fill_missing" (défaut) ou "reassign_all"
        #[arg(long, default_value = "fill_missing")]
        policy: String,
        /// Calcule le plan sans rien écrire
        #[arg(long)]
        dry_run: bool,
    },

    /// Affecter manuellement un employé à un shift
    Assign {
        #[arg(long)]
        shift_id: String,
        #[arg(long)]
        employee_id: String,
    },

    /// Retirer une affectation
    Unassign {
        #[arg(long)]
        shift_id: String,
        #[arg(long)]
        employee_id: String,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier les double-bookings
    Check {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(raw, "%Y-%m-%d")?)
}

fn parse_policy(raw: &str) -> Result<AssignPolicy> {
    match raw {
        "fill_missing" => Ok(AssignPolicy::FillMissing),
        "reassign_all" => Ok(AssignPolicy::ReassignAll),
        other => bail!("unknown policy: {other} (expected fill_missing or reassign_all)"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.data)?;
    let mut planner = Planner::new();
    *planner.data_mut() = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::CreateSchedule { org, from, to } => {
            let id = planner.create_schedule(OrgId::new(org), parse_date(&from)?, parse_date(&to)?);
            storage.save(planner.data())?;
            println!("{}", id.as_str());
            0
        }
        Commands::AddRole {
            org,
            name,
            weekly_hours_cap,
        } => {
            let id = planner.create_role(OrgId::new(org), &name, weekly_hours_cap);
            storage.save(planner.data())?;
            println!("{}", id.as_str());
            0
        }
        Commands::ImportEmployees { csv, org } => {
            let employees = io::import_employees_csv(csv, &OrgId::new(org))?;
            planner.add_employees(employees);
            storage.save(planner.data())?;
            0
        }
        Commands::ImportShifts { csv } => {
            let shifts = io::import_shifts_csv(csv, planner.data())?;
            planner.data_mut().shifts.extend(shifts);
            storage.save(planner.data())?;
            0
        }
        Commands::ImportUnavailability { csv } => {
            let records = io::import_unavailability_csv(csv)?;
            planner.data_mut().unavailability.extend(records);
            storage.save(planner.data())?;
            0
        }
        Commands::ImportPreferences { csv } => {
            let prefs = io::import_preferences_csv(csv)?;
            planner.data_mut().preferences.extend(prefs);
            storage.save(planner.data())?;
            0
        }
        Commands::AutoAssign {
            schedule,
            from,
            to,
            policy,
            dry_run,
        } => {
            let req = AssignRequest::new(
                ScheduleId::new(schedule),
                parse_date(&from)?,
                parse_date(&to)?,
            )
            .policy(parse_policy(&policy)?)
            .dry_run(dry_run);
            let report = planner.auto_assign(&req)?;
            if !dry_run {
                storage.save(planner.data())?;
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
            // Code 2 = WARNING : des shifts restent non couverts
            if report.skipped_no_candidates > 0 {
                2
            } else {
                0
            }
        }
        Commands::Assign {
            shift_id,
            employee_id,
        } => {
            planner.assign(&ShiftId::new(shift_id), &EmployeeId::new(employee_id))?;
            storage.save(planner.data())?;
            0
        }
        Commands::Unassign {
            shift_id,
            employee_id,
        } => {
            planner.unassign(&ShiftId::new(shift_id), &EmployeeId::new(employee_id))?;
            storage.save(planner.data())?;
            0
        }
        Commands::List { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_data_json(path, planner.data())?;
            }
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, planner.data())?;
            }
            // impression compacte
            for s in &planner.data().shifts {
                let assigned: Vec<&str> = planner
                    .data()
                    .assignments_for_shift(&s.id)
                    .filter_map(|a| planner.data().find_employee(&a.employee_id))
                    .map(|e| e.display_name.as_str())
                    .collect();
                println!(
                    "{} | {} → {} | {}/{} | {}",
                    s.id.as_str(),
                    s.start_at.to_rfc3339(),
                    s.end_at.to_rfc3339(),
                    assigned.len(),
                    s.required_staff_count,
                    if assigned.is_empty() {
                        "-".to_string()
                    } else {
                        assigned.join(", ")
                    }
                );
            }
            0
        }
        Commands::Check { report } => {
            let conflicts = planner.detect_conflicts();
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["employee_id", "shift_a", "shift_b", "kind"])?;
                    for c in &conflicts {
                        w.write_record([
                            c.employee.as_str(),
                            c.shift_a.as_str(),
                            c.shift_b.as_str(),
                            match c.kind {
                                ConflictKind::Overlap => "overlap",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}
