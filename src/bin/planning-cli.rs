#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use planning_hebdo::{
    io, load_config_from_file,
    render::{HtmlPage, PlanRenderer, TextTable},
    scheduler::{PlanStatus, Scheduler, Selection},
    Config, ConfigError,
};
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planning hebdomadaire de cabinet (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de configuration
    #[arg(long, global = true, default_value = "config.json")]
    config: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Valider la configuration et lister tous les problèmes
    Check,

    /// Résumé de la configuration chargée
    Info,

    /// Générer le planning de la semaine
    Generate {
        /// liste "zone1,zone2,..." (défaut : toutes)
        #[arg(long)]
        areas: Option<String>,
        /// liste "nom1,nom2,..." (défaut : tout le personnel)
        #[arg(long)]
        staff: Option<String>,
        /// Budget ajusté "nom=heures" (répétable)
        #[arg(long = "max-hours", value_parser = parse_hours_override)]
        max_hours: Vec<(String, u32)>,
        #[arg(long)]
        out_csv: Option<String>,
        /// Affectations brutes (slot,area,staff)
        #[arg(long)]
        out_raw_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_html: Option<String>,
        /// Classeur xlsx (grille + affectations brutes)
        #[arg(long)]
        out_xlsx: Option<String>,
        /// Dossier recevant les exports horodatés (csv, json, html, xlsx)
        #[arg(long)]
        out_dir: Option<String>,
        /// Titre de la page HTML
        #[arg(long, default_value = "Weekly roster")]
        title: String,
    },
}

fn parse_hours_override(raw: &str) -> Result<(String, u32), String> {
    let (name, hours) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=hours, got {raw:?}"))?;
    let hours = hours
        .trim()
        .parse()
        .map_err(|_| format!("invalid hours in {raw:?}"))?;
    Ok((name.trim().to_string(), hours))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn load(path: &str) -> Result<Config> {
    match load_config_from_file(path) {
        Ok(config) => Ok(config),
        Err(err @ ConfigError::Invalid(_)) => {
            for problem in err.problems() {
                eprintln!("• {problem}");
            }
            bail!(err)
        }
        Err(err) => Err(err.into()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let config = load(&cli.config)?;

    let code = match cli.cmd {
        Commands::Check => {
            println!(
                "OK: {} area(s), {} staff member(s)",
                config.areas().len(),
                config.staff().len()
            );
            0
        }
        Commands::Info => {
            let meta = config.meta();
            let rules = config.rules();
            println!(
                "Practice: {}",
                meta.practice_name.as_deref().unwrap_or("unknown")
            );
            println!("Version: {}", meta.version.as_deref().unwrap_or("unknown"));
            println!("Areas: {}", config.areas().len());
            println!("Staff: {}", config.staff().len());
            println!("Preferred assignments: {}", config.preferred_len());
            if let Some(priority) = &rules.reception_priority {
                println!("Reception priority: {priority}");
            }
            if rules.defer_secondary_reception {
                println!("Secondary reception deferred ({:?})", rules.deferral_scope);
            }
            0
        }
        Commands::Generate {
            areas,
            staff,
            max_hours,
            out_csv,
            out_raw_csv,
            out_json,
            out_html,
            out_xlsx,
            out_dir,
            title,
        } => {
            let mut selection = Selection::all();
            if let Some(list) = areas {
                selection = selection.with_areas(split_list(&list));
            }
            if let Some(list) = staff {
                selection = selection.with_staff(split_list(&list));
            }
            for (name, hours) in max_hours {
                selection = selection.with_max_hours(name, hours);
            }

            let plan = Scheduler::new(&config).generate(&selection)?;
            print!("{}", TextTable.render(&plan));

            let html = HtmlPage { title };
            if let Some(path) = out_csv {
                io::export_roster_csv(path, &plan.roster)?;
            }
            if let Some(path) = out_raw_csv {
                io::export_assignments_csv(path, &plan)?;
            }
            if let Some(path) = out_json {
                io::export_plan_json(path, &plan)?;
            }
            if let Some(path) = out_html {
                io::export_rendered(path, &plan, &html)?;
            }
            if let Some(path) = out_xlsx {
                io::export_roster_xlsx(path, &plan)?;
            }
            if let Some(dir) = out_dir {
                let dir = Path::new(&dir);
                std::fs::create_dir_all(dir)?;
                let now = Utc::now();
                let target = |ext: &str| -> PathBuf {
                    dir.join(io::timestamped_file_name("roster", ext, now))
                };
                io::export_roster_csv(target("csv"), &plan.roster)?;
                io::export_plan_json(target("json"), &plan)?;
                io::export_rendered(target("html"), &plan, &html)?;
                io::export_roster_xlsx(target("xlsx"), &plan)?;
            }

            match plan.status {
                // Code 2 = WARNING : aucune affectation possible
                PlanStatus::NoAssignments => {
                    eprintln!("Warning: no assignments possible, check the configuration");
                    2
                }
                PlanStatus::Gaps { count } => {
                    eprintln!("Found {count} coverage gap(s)");
                    0
                }
                PlanStatus::Complete => 0,
            }
        }
    };

    std::process::exit(code);
}
