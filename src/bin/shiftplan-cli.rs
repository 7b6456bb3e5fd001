#![forbid(unsafe_code)]
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use shiftplan::{
    io,
    model::{DayRequirement, EmployeeId, ShiftPatternId},
    scheduler::{parse_month, GenerateOptions, IssueKind, RandomPicker, Scheduler},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de plannings mensuels (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du workspace
    #[arg(long, global = true, default_value = "shiftplan.json")]
    workspace: String,

    #[command(subcommand)]
    cmd: Commands,
}

/// Réglages de génération partagés
#[derive(Args, Debug, Clone, Copy)]
struct GenArgs {
    /// Effectif visé pour les jours sans exigence
    #[arg(long, default_value_t = 3)]
    default_required_staff: u32,
    #[arg(long, default_value_t = 5)]
    max_consecutive_days: u32,
}

impl From<GenArgs> for GenerateOptions {
    fn from(a: GenArgs) -> Self {
        Self {
            default_required_staff: a.default_required_staff,
            max_consecutive_days: a.max_consecutive_days,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer des employés depuis un CSV
    ImportEmployees {
        #[arg(long)]
        csv: String,
    },

    /// Importer des shifts depuis un CSV
    ImportPatterns {
        #[arg(long)]
        csv: String,
    },

    /// Importer des exigences journalières depuis un CSV
    ImportRequirements {
        #[arg(long)]
        csv: String,
    },

    /// Définir l'exigence d'une date
    Require {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        staff: u32,
        /// "employe:shift;employe:shift"
        #[arg(long)]
        fixed: Option<String>,
    },

    /// Générer le planning d'un mois (remplace ce mois)
    Generate {
        /// YYYY-MM
        #[arg(long)]
        month: String,
        /// Graine du tirage des shifts (reproductible)
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        tuning: GenArgs,
    },

    /// Poser un shift sur une cellule
    Set {
        /// id ou matricule
        #[arg(long)]
        employee: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        shift: String,
    },

    /// Vider une cellule
    Clear {
        #[arg(long)]
        employee: String,
        #[arg(long)]
        date: String,
    },

    /// Lister le planning d'un mois
    List {
        #[arg(long)]
        month: String,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Exporter la matrice du mois en CSV
    ExportCsv {
        #[arg(long)]
        month: String,
        #[arg(long)]
        out: String,
    },

    /// Vérifier le planning d'un mois
    Check {
        #[arg(long)]
        month: String,
        #[command(flatten)]
        tuning: GenArgs,
        /// Export CSV des anomalies (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

fn resolve_employee(scheduler: &Scheduler, key: &str) -> Result<EmployeeId> {
    scheduler
        .workspace()
        .resolve_employee(key)
        .map(|e| e.id.clone())
        .ok_or_else(|| anyhow!("unknown employee: {key}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.workspace)?;
    let mut scheduler = Scheduler::with_workspace(storage.load_or_default()?);

    let code = match cli.cmd {
        Commands::ImportEmployees { csv } => {
            let employees = io::import_employees_csv(csv)?;
            println!("{} employee(s) imported", employees.len());
            scheduler.add_employees(employees);
            storage.save(scheduler.workspace())?;
            0
        }
        Commands::ImportPatterns { csv } => {
            let patterns = io::import_patterns_csv(csv)?;
            println!("{} shift pattern(s) imported", patterns.len());
            scheduler.add_patterns(patterns);
            storage.save(scheduler.workspace())?;
            0
        }
        Commands::ImportRequirements { csv } => {
            let requirements = io::import_requirements_csv(csv)?;
            println!("{} requirement(s) imported", requirements.len());
            for req in requirements {
                scheduler.set_requirement(req);
            }
            storage.save(scheduler.workspace())?;
            0
        }
        Commands::Require { date, staff, fixed } => {
            let mut req = DayRequirement::new(parse_date(&date)?, staff);
            if let Some(raw) = fixed {
                req.specific_assignments = io::parse_specific(&raw)?;
            }
            scheduler.set_requirement(req);
            storage.save(scheduler.workspace())?;
            0
        }
        Commands::Generate { month, seed, tuning } => {
            let month = parse_month(&month)?;
            let opts = GenerateOptions::from(tuning);
            let n = match seed {
                Some(seed) => {
                    scheduler.generate_month(month, &opts, &mut RandomPicker::seeded(seed))
                }
                None => scheduler.generate_month(month, &opts, &mut RandomPicker::from_entropy()),
            };
            storage.save(scheduler.workspace())?;
            println!("{n} assignment(s) generated for {}", month.format("%Y-%m"));
            0
        }
        Commands::Set {
            employee,
            date,
            shift,
        } => {
            let id = resolve_employee(&scheduler, &employee)?;
            scheduler.set_assignment(&id, parse_date(&date)?, &ShiftPatternId::new(shift))?;
            storage.save(scheduler.workspace())?;
            0
        }
        Commands::Clear { employee, date } => {
            let id = resolve_employee(&scheduler, &employee)?;
            if scheduler.clear_assignment(&id, parse_date(&date)?).is_none() {
                eprintln!("nothing to clear");
            }
            storage.save(scheduler.workspace())?;
            0
        }
        Commands::List { month, out_json } => {
            let month = parse_month(&month)?;
            if let Some(path) = out_json {
                io::export_workspace_json(path, scheduler.workspace())?;
            }
            let ws = scheduler.workspace();
            for a in scheduler.assignments_for_month(month) {
                let who = ws
                    .find_employee(&a.employee_id)
                    .map(|e| e.display_name())
                    .unwrap_or_else(|| a.employee_id.to_string());
                let shift = ws
                    .find_pattern(&a.shift_pattern_id)
                    .map(|p| p.name.as_str())
                    .unwrap_or("-");
                println!("{} | {} | {}", a.date, who, shift);
            }
            0
        }
        Commands::ExportCsv { month, out } => {
            let month = parse_month(&month)?;
            io::export_schedule_csv(out, scheduler.workspace(), month)?;
            0
        }
        Commands::Check { month, tuning, report } => {
            let month = parse_month(&month)?;
            let issues = scheduler.audit(month, &GenerateOptions::from(tuning));
            if issues.is_empty() {
                println!("OK: no issues");
                0
            } else {
                eprintln!("Found {} issue(s)", issues.len());
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["date", "employee_id", "kind", "detail"])?;
                    for issue in &issues {
                        let (kind, detail) = match &issue.kind {
                            IssueKind::Understaffed { assigned, required } => {
                                ("understaffed", format!("{assigned}/{required}"))
                            }
                            IssueKind::DayOffViolation => ("day_off", String::new()),
                            IssueKind::OverCap { worked, cap } => {
                                ("over_cap", format!("{worked}/{cap}"))
                            }
                            IssueKind::LongStreak { days } => ("streak", days.to_string()),
                            IssueKind::UnknownEmployee => ("unknown_employee", String::new()),
                            IssueKind::UnknownPattern(id) => ("unknown_pattern", id.to_string()),
                        };
                        let date = issue.date.to_string();
                        let employee = issue
                            .employee
                            .as_ref()
                            .map(|e| e.as_str())
                            .unwrap_or("");
                        w.write_record([date.as_str(), employee, kind, detail.as_str()])?;
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
